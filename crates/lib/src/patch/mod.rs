//! Patch-document generation.
//!
//! A [`PatchDocument`] parameterizes the downstream qualification tool: it
//! names the build directory, the specification search paths, and an ordered
//! list of `set` operations against items of the specification tree.
//!
//! ```yaml
//! build-directory: build-sparc-gr740-smp-user-qual
//! post-process-items:
//! - uid: /variant
//!   path: /arch
//!   action: set
//!   value: sparc
//! spec-paths:
//! - spec-spec
//! - spec-glossary
//! - config
//! ```

mod bsp;
mod document;
mod generator;
mod types;

pub use bsp::{BSP_EXTRAS, BspExtras, ExtraTemplate, ExtraValue, extras_for};
pub use document::{CONFIG_VARIANTS_DIR, PatchDocument, SPEC_PATHS, write_atomic, write_document};
pub use generator::{generate, parent_directory};
pub use types::{PatchAction, PatchError, PatchItem, PatchList};
