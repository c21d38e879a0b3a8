//! Translators from declared geometry units to catalog entries.

mod assembly;
mod pin;
mod reactor_core;

pub use assembly::TranslateAssembly;
pub use pin::TranslatePin;
pub use reactor_core::TranslateCore;
