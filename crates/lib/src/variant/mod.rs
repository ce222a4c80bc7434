//! Variant configuration store.
//!
//! One [`ConfigStore`] exists per session. It starts from built-in defaults,
//! accepts partial updates restricted to an allow-list of fields, derives the
//! deployment directory from the installed RTEMS toolchains, and persists
//! itself on a best-effort basis.

mod locator;
mod session;
mod store;
mod types;

pub use locator::{DirectoryLocator, InstallLocator};
pub use session::{FileSession, MemorySession, SessionError, SessionStorage};
pub use store::ConfigStore;
pub use types::{
  DEFAULT_DEPLOYMENT_DIRECTORY, DEFAULT_SELECTED_STEPS, Platform, UpdateOutcome, VariantConfig, VariantUpdate,
};
