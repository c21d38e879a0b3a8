use crate::error::{GeometryError, Result};
use crate::math::{Point3, Rotation3, Vector3, TOLERANCE};

/// An analytic surface bounding CSG cells.
///
/// Each surface splits space into a negative side (`evaluate < 0`) and a
/// positive side. Axis-aligned variants are kept distinct because transport
/// codes treat them as cheaper special cases.
#[derive(Debug, Clone, PartialEq)]
pub enum CsgSurface {
    /// General plane `a*x + b*y + c*z = d`.
    Plane { a: f64, b: f64, c: f64, d: f64 },
    /// Plane `x = x0`.
    XPlane { x0: f64 },
    /// Plane `y = y0`.
    YPlane { y0: f64 },
    /// Plane `z = z0`.
    ZPlane { z0: f64 },
    /// Infinite cylinder parallel to the z axis.
    ZCylinder { x0: f64, y0: f64, r: f64 },
    /// Infinite cylinder with an arbitrary axis (unit length).
    Cylinder {
        center: Point3,
        axis: Vector3,
        r: f64,
    },
    Sphere { center: Point3, r: f64 },
}

impl CsgSurface {
    /// Creates a general cylinder, normalizing the axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or the axis is zero-length.
    pub fn cylinder(center: Point3, axis: Vector3, r: f64) -> Result<Self> {
        if r < TOLERANCE {
            return Err(
                GeometryError::Degenerate("cylinder radius must be positive".into()).into(),
            );
        }
        let len = axis.norm();
        if len < TOLERANCE {
            return Err(
                GeometryError::Degenerate("cylinder axis must be non-zero".into()).into(),
            );
        }
        Ok(Self::Cylinder {
            center,
            axis: axis / len,
            r,
        })
    }

    /// Creates a z-aligned cylinder.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn z_cylinder(x0: f64, y0: f64, r: f64) -> Result<Self> {
        if r < TOLERANCE {
            return Err(
                GeometryError::Degenerate("cylinder radius must be positive".into()).into(),
            );
        }
        Ok(Self::ZCylinder { x0, y0, r })
    }

    /// Returns the surface type name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plane { .. } => "plane",
            Self::XPlane { .. } => "x-plane",
            Self::YPlane { .. } => "y-plane",
            Self::ZPlane { .. } => "z-plane",
            Self::ZCylinder { .. } => "z-cylinder",
            Self::Cylinder { .. } => "cylinder",
            Self::Sphere { .. } => "sphere",
        }
    }

    /// Returns the defining coefficients by name.
    #[must_use]
    pub fn coefficients(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Self::Plane { a, b, c, d } => vec![("a", a), ("b", b), ("c", c), ("d", d)],
            Self::XPlane { x0 } => vec![("x0", x0)],
            Self::YPlane { y0 } => vec![("y0", y0)],
            Self::ZPlane { z0 } => vec![("z0", z0)],
            Self::ZCylinder { x0, y0, r } => vec![("x0", x0), ("y0", y0), ("r", r)],
            Self::Cylinder { center, axis, r } => vec![
                ("x0", center.x),
                ("y0", center.y),
                ("z0", center.z),
                ("u", axis.x),
                ("v", axis.y),
                ("w", axis.z),
                ("r", r),
            ],
            Self::Sphere { center, r } => {
                vec![("x0", center.x), ("y0", center.y), ("z0", center.z), ("r", r)]
            }
        }
    }

    /// Evaluates the implicit surface function at `p`.
    #[must_use]
    pub fn evaluate(&self, p: &Point3) -> f64 {
        match *self {
            Self::Plane { a, b, c, d } => a * p.x + b * p.y + c * p.z - d,
            Self::XPlane { x0 } => p.x - x0,
            Self::YPlane { y0 } => p.y - y0,
            Self::ZPlane { z0 } => p.z - z0,
            Self::ZCylinder { x0, y0, r } => (p.x - x0).powi(2) + (p.y - y0).powi(2) - r * r,
            Self::Cylinder { center, axis, r } => {
                let d = p - center;
                let along = d.dot(&axis);
                d.norm_squared() - along * along - r * r
            }
            Self::Sphere { center, r } => (p - center).norm_squared() - r * r,
        }
    }

    /// Returns the surface moved by `offset`.
    #[must_use]
    pub fn translate(&self, offset: &Vector3) -> Self {
        match *self {
            Self::Plane { a, b, c, d } => Self::Plane {
                a,
                b,
                c,
                d: d + a * offset.x + b * offset.y + c * offset.z,
            },
            Self::XPlane { x0 } => Self::XPlane { x0: x0 + offset.x },
            Self::YPlane { y0 } => Self::YPlane { y0: y0 + offset.y },
            Self::ZPlane { z0 } => Self::ZPlane { z0: z0 + offset.z },
            Self::ZCylinder { x0, y0, r } => Self::ZCylinder {
                x0: x0 + offset.x,
                y0: y0 + offset.y,
                r,
            },
            Self::Cylinder { center, axis, r } => Self::Cylinder {
                center: center + offset,
                axis,
                r,
            },
            Self::Sphere { center, r } => Self::Sphere {
                center: center + offset,
                r,
            },
        }
    }

    /// Returns the surface rotated about the origin.
    ///
    /// Axis-aligned variants generalize to [`CsgSurface::Plane`] or
    /// [`CsgSurface::Cylinder`].
    #[must_use]
    pub fn rotate(&self, rotation: &Rotation3) -> Self {
        match *self {
            Self::Plane { a, b, c, d } => {
                let n = rotation * Vector3::new(a, b, c);
                Self::Plane {
                    a: n.x,
                    b: n.y,
                    c: n.z,
                    d,
                }
            }
            Self::XPlane { x0 } => Self::Plane { a: 1.0, b: 0.0, c: 0.0, d: x0 }.rotate(rotation),
            Self::YPlane { y0 } => Self::Plane { a: 0.0, b: 1.0, c: 0.0, d: y0 }.rotate(rotation),
            Self::ZPlane { z0 } => Self::Plane { a: 0.0, b: 0.0, c: 1.0, d: z0 }.rotate(rotation),
            Self::ZCylinder { x0, y0, r } => Self::Cylinder {
                center: Point3::new(x0, y0, 0.0),
                axis: Vector3::z(),
                r,
            }
            .rotate(rotation),
            Self::Cylinder { center, axis, r } => Self::Cylinder {
                center: rotation * center,
                axis: rotation * axis,
                r,
            },
            Self::Sphere { center, r } => Self::Sphere {
                center: rotation * center,
                r,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    // ── Evaluation ─────────────────────────────────────────────

    #[test]
    fn z_cylinder_sign() {
        let s = CsgSurface::z_cylinder(0.0, 0.0, 1.0).unwrap();
        assert!(s.evaluate(&p(0.5, 0.0, 7.0)) < 0.0);
        assert!(s.evaluate(&p(2.0, 0.0, -3.0)) > 0.0);
    }

    #[test]
    fn general_cylinder_ignores_axial_offset() {
        let s = CsgSurface::cylinder(p(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 5.0), 1.0).unwrap();
        assert_relative_eq!(s.evaluate(&p(1.0, 0.0, 100.0)), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_cylinders_are_rejected() {
        assert!(CsgSurface::z_cylinder(0.0, 0.0, 0.0).is_err());
        assert!(CsgSurface::cylinder(p(0.0, 0.0, 0.0), Vector3::zeros(), 1.0).is_err());
    }

    // ── Transforms ─────────────────────────────────────────────

    #[test]
    fn translated_plane_moves_offset() {
        let s = CsgSurface::Plane { a: 1.0, b: 1.0, c: 0.0, d: 1.0 };
        let moved = s.translate(&Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved.evaluate(&p(2.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn rotated_x_plane_becomes_general_plane() {
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2);
        let s = CsgSurface::XPlane { x0: 2.0 }.rotate(&rot);
        assert_eq!(s.kind(), "plane");
        assert_relative_eq!(s.evaluate(&p(0.0, 2.0, 0.0)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rotated_z_cylinder_keeps_radius() {
        let rot = Rotation3::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2);
        let s = CsgSurface::z_cylinder(0.0, 0.0, 2.0).unwrap().rotate(&rot);
        assert_eq!(s.kind(), "cylinder");
        assert_relative_eq!(s.evaluate(&p(2.0, 50.0, 0.0)), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn coefficients_are_named() {
        let s = CsgSurface::ZCylinder { x0: 1.0, y0: 2.0, r: 3.0 };
        assert_eq!(s.coefficients(), vec![("x0", 1.0), ("y0", 2.0), ("r", 3.0)]);
        assert_eq!(CsgSurface::ZPlane { z0: 4.0 }.coefficients(), vec![("z0", 4.0)]);
    }
}
