//! qdp-lib: Variant configuration and patch synthesis for RTEMS QDP builds
//!
//! This crate provides the pieces a QDP build host needs:
//! - `steps`: the build-step registry and its categories
//! - `variant`: the per-session variant configuration store
//! - `presets`: named step selections on disk
//! - `patch`: the patch document handed to the qualification tool
//! - `protocol`: the request/response surface tying them together

pub mod consts;
pub mod patch;
pub mod platform;
pub mod presets;
pub mod protocol;
pub mod settings;
pub mod steps;
pub mod variant;
