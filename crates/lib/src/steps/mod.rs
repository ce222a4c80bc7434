//! Build-step metadata registry.
//!
//! Loads the static descriptor that lists every optional build step and the
//! categories they are grouped into, and answers lookup and validation
//! queries against it.
//!
//! # Descriptor Format
//!
//! ```yaml
//! categories:
//!   - id: build
//!     name: Build
//! build-steps:
//!   - uid: steps/build-bsp
//!     name: Build BSP
//!     category: build
//!     is_default: true
//! default_build_steps: [steps/build-bsp]
//! ```
//!
//! Only `uid` (and `id` for categories) is required. The registry never
//! reports a parse failure: a corrupt or missing descriptor yields an empty
//! registry, so callers must treat "no steps" as a degraded but valid state.

mod registry;
mod source;
mod types;

pub use registry::Registry;
pub use source::{EMBEDDED_DESCRIPTOR, RegistryHandle, StepSource};
pub use types::{BuildStepDescriptor, CategoryDescriptor, FALLBACK_CATEGORY, StepError, Validation};
