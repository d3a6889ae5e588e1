//! # parlay
//!
//! Typed custom-parameter declaration and change dispatch for
//! creative-coding plugin hosts.
//!
//! Plugin hosts in this family expose a low-level parameter interface: the
//! plugin registers parameters one by one with a manager object, then polls
//! raw values out of an input snapshot every tick. This crate wraps that
//! interface in typed descriptors with per-parameter change callbacks, so a
//! plugin reacts to edits instead of re-reading everything each frame.
//!
//! ## Main Types
//!
//! - [`ParamRegistry`] - owns the descriptors, forwards registrations to
//!   the host, drives per-tick updates and pulse dispatch
//! - [`NumericParam`] - numeric vector descriptor with fixed arity 1-4
//!   ([`ScalarParam`] for arity 1)
//! - [`StringParam`] - string/file/folder/operator-reference descriptor
//! - [`ParamManager`] / [`ParamInputs`] - the traits the host side
//!   implements
//! - [`NumericInfo`] / [`StringInfo`] - the metadata handed to the host at
//!   registration
//!
//! ## Lifecycle
//!
//! ```ignore
//! use parlay::prelude::*;
//!
//! let mut registry = ParamRegistry::new();
//! registry.init(Box::new(host_manager));          // once, at plugin setup
//!
//! registry.append_rgb(
//!     NumericParam::<3>::new("Color").with_defaults([1.0, 1.0, 1.0]),
//!     Some(Box::new(|v| println!("color is now {:?}", v))),
//! )?;
//! registry.append_pulse(
//!     ScalarParam::new("Reset"),
//!     Some(Box::new(|| println!("reset!"))),
//! )?;
//!
//! registry.update(&inputs);                       // once per host tick
//! registry.pulse_pressed("Reset");                // on a host button press
//! ```
//!
//! ## Thread Safety
//!
//! None, on purpose: registration, updates, pulse events and callbacks all
//! run synchronously on the host's single processing thread. Nothing here
//! is `Send` or `Sync`.

pub mod error;
pub mod host;
pub mod info;
pub mod param;
pub mod registry;

// Re-exports for convenience
pub use error::{ParamError, ParamResult};
pub use host::{ParamInputs, ParamManager};
pub use info::{NumericInfo, StringInfo, DEFAULT_PAGE, MAX_COMPONENTS};
pub use param::{
    NumericCallback, NumericParam, Param, PulseCallback, ScalarParam, StringCallback, StringParam,
};
pub use registry::ParamRegistry;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use parlay::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ParamError, ParamResult};
    pub use crate::host::{ParamInputs, ParamManager};
    pub use crate::info::{NumericInfo, StringInfo};
    pub use crate::param::{
        NumericCallback, NumericParam, Param, PulseCallback, ScalarParam, StringCallback,
        StringParam,
    };
    pub use crate::registry::ParamRegistry;
}
