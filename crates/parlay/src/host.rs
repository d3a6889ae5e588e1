//! Host collaborator contract.
//!
//! The host owns the parameter UI, the tick loop, and the event stream; this
//! crate only calls into it. Two traits express that boundary:
//!
//! - [`ParamManager`] - one registration method per parameter shape. Called
//!   exactly once per descriptor, during setup, to make the parameter
//!   visible and editable in the host.
//! - [`ParamInputs`] - the per-tick snapshot of current parameter values,
//!   keyed by parameter name.
//!
//! Anything can sit on the other end of these traits: an FFI bridge into a
//! real host, the simulator in `demos/ramp`, or a test double.

use crate::error::ParamResult;
use crate::info::{NumericInfo, StringInfo};

/// The host's parameter manager.
///
/// Each method registers one parameter of the matching shape. A host that
/// cannot register the parameter (duplicate name, malformed metadata, ...)
/// reports [`ParamError::Rejected`](crate::ParamError::Rejected); the
/// registry propagates the rejection to the caller untranslated and performs
/// no bookkeeping for the failed parameter.
///
/// `append_float` and `append_int` take the component count because their
/// arity is chosen by the plugin (1-4); the fixed-shape methods (XY, RGB,
/// ...) imply theirs.
pub trait ParamManager {
    /// Register a float parameter with `components` components.
    fn append_float(&mut self, info: &NumericInfo, components: usize) -> ParamResult<()>;

    /// Register an integer parameter with `components` components.
    fn append_int(&mut self, info: &NumericInfo, components: usize) -> ParamResult<()>;

    /// Register a 2-component XY position parameter.
    fn append_xy(&mut self, info: &NumericInfo) -> ParamResult<()>;

    /// Register a 3-component XYZ position parameter.
    fn append_xyz(&mut self, info: &NumericInfo) -> ParamResult<()>;

    /// Register a 2-component UV texture-coordinate parameter.
    fn append_uv(&mut self, info: &NumericInfo) -> ParamResult<()>;

    /// Register a 3-component UVW texture-coordinate parameter.
    fn append_uvw(&mut self, info: &NumericInfo) -> ParamResult<()>;

    /// Register a 3-component RGB color parameter.
    fn append_rgb(&mut self, info: &NumericInfo) -> ParamResult<()>;

    /// Register a 4-component RGBA color parameter.
    fn append_rgba(&mut self, info: &NumericInfo) -> ParamResult<()>;

    /// Register an on/off toggle parameter.
    fn append_toggle(&mut self, info: &NumericInfo) -> ParamResult<()>;

    /// Register a momentary pulse button.
    fn append_pulse(&mut self, info: &NumericInfo) -> ParamResult<()>;

    /// Register a free-form string parameter.
    fn append_string(&mut self, info: &StringInfo) -> ParamResult<()>;

    /// Register a file-picker parameter.
    fn append_file(&mut self, info: &StringInfo) -> ParamResult<()>;

    /// Register a folder-picker parameter.
    fn append_folder(&mut self, info: &StringInfo) -> ParamResult<()>;

    /// Register a reference to a CHOP operator, by path.
    fn append_chop(&mut self, info: &StringInfo) -> ParamResult<()>;

    /// Register a reference to a TOP operator, by path.
    fn append_top(&mut self, info: &StringInfo) -> ParamResult<()>;

    /// Register a reference to a DAT operator, by path.
    fn append_dat(&mut self, info: &StringInfo) -> ParamResult<()>;

    /// Register a reference to any operator, by path.
    fn append_object(&mut self, info: &StringInfo) -> ParamResult<()>;
}

/// The host's per-tick view of current parameter values.
///
/// Values are keyed by the name the parameter was registered under. Asking
/// for a name that was never registered is a host-contract violation this
/// crate does not guard against; implementations choose what they return
/// for it.
pub trait ParamInputs {
    /// Current value of component `component` of numeric parameter `name`.
    fn numeric(&self, name: &str, component: usize) -> f64;

    /// Current value of string parameter `name`.
    fn string(&self, name: &str) -> &str;
}
