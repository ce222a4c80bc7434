//! Named, reusable step selections.

mod store;
mod types;

pub use store::PresetStore;
pub use types::{PROTECTED_PRESETS, PresetError, PresetRecord, is_protected, validate_name};
