//! Parameter descriptors: a named, typed value snapshot plus an optional
//! change callback.
//!
//! A descriptor is bound to one host-visible parameter by name. On every
//! host tick the registry asks each descriptor to [`update`](Param::update)
//! itself from the host's input snapshot; when the freshly read value
//! differs from the stored one, the descriptor overwrites its snapshot and
//! fires its callback once with the complete new value.
//!
//! Snapshots start zeroed (numeric) or empty (string), so the first tick
//! fires callbacks for every parameter whose host value differs from that,
//! a convenient way to pull the initial state into the plugin.
//!
//! # Thread Safety
//!
//! Deliberately none. Descriptors live on the host's single processing
//! thread; callbacks are plain `FnMut` closures invoked synchronously on
//! that thread, with no `Send`/`Sync` bounds.

use log::trace;

use crate::host::ParamInputs;
use crate::info::{NumericInfo, StringInfo, MAX_COMPONENTS};

/// Change callback for an N-component numeric parameter. Receives the
/// complete updated vector, not just the changed components.
pub type NumericCallback<const N: usize> = Box<dyn FnMut(&[f64; N])>;

/// Change callback for a string parameter.
pub type StringCallback = Box<dyn FnMut(&str)>;

/// Callback for a pulse button press. Pulses have no persistent value, so
/// there is nothing to pass.
pub type PulseCallback = Box<dyn FnMut()>;

// =============================================================================
// Param Trait - the update capability
// =============================================================================

/// Capability shared by all descriptor shapes: identity accessors plus
/// "refresh yourself from host state and notify on change".
///
/// Object-safe so the registry can keep descriptors of mixed shapes and
/// arities in one ordered list.
pub trait Param {
    /// Unique parameter name, fixed at construction. Doubles as the host
    /// lookup key and the pulse-dispatch match key.
    fn name(&self) -> &'static str;

    /// Display label ("" = host falls back to the name).
    fn label(&self) -> &'static str;

    /// Display page/group in the host UI.
    fn page(&self) -> &'static str;

    /// Re-read this parameter's value from `inputs`; if it differs from the
    /// stored snapshot, overwrite the snapshot and fire the callback once
    /// with the full new value.
    fn update(&mut self, inputs: &dyn ParamInputs);
}

// =============================================================================
// NumericParam - fixed-arity numeric vector
// =============================================================================

/// Numeric parameter with a fixed arity `N` (1 for scalar/toggle/pulse,
/// 2 for XY/UV, 3 for XYZ/UVW/RGB, 4 for RGBA).
///
/// Components are compared independently during [`update`](Param::update);
/// any single differing component marks the whole value changed and fires
/// one callback with the complete vector.
///
/// # Example
///
/// ```ignore
/// let color = NumericParam::<3>::new("Color")
///     .with_label("Tint Color")
///     .with_defaults([1.0, 1.0, 1.0]);
/// ```
pub struct NumericParam<const N: usize> {
    info: NumericInfo,
    value: [f64; N],
    callback: Option<NumericCallback<N>>,
}

/// One-component numeric parameter; the shape used for scalars, toggles and
/// pulses.
pub type ScalarParam = NumericParam<1>;

impl<const N: usize> NumericParam<N> {
    /// Create a descriptor named `name` on the default page, with a zeroed
    /// snapshot and no callback.
    pub fn new(name: &'static str) -> Self {
        debug_assert!(
            N >= 1 && N <= MAX_COMPONENTS,
            "numeric parameters have 1 to {} components",
            MAX_COMPONENTS
        );
        Self {
            info: NumericInfo::new(name),
            value: [0.0; N],
            callback: None,
        }
    }

    // === Builder methods ===

    /// Set the display label.
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.info.label = label;
        self
    }

    /// Set the display page/group.
    pub fn with_page(mut self, page: &'static str) -> Self {
        self.info.page = page;
        self
    }

    /// Set the host-side default value per component.
    ///
    /// Defaults only seed the host UI; the local snapshot still starts at
    /// zero and syncs on the first tick.
    pub fn with_defaults(mut self, defaults: [f64; N]) -> Self {
        self.info.defaults[..N].copy_from_slice(&defaults);
        self
    }

    /// Set a hard range for every component and have the host clamp to it.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.info.mins = [min; MAX_COMPONENTS];
        self.info.maxes = [max; MAX_COMPONENTS];
        self.info.clamp_mins = [true; MAX_COMPONENTS];
        self.info.clamp_maxes = [true; MAX_COMPONENTS];
        self
    }

    /// Set the slider range for every component (UI hint, no clamping).
    pub fn with_slider_range(mut self, min: f64, max: f64) -> Self {
        self.info.slider_mins = [min; MAX_COMPONENTS];
        self.info.slider_maxes = [max; MAX_COMPONENTS];
        self
    }

    // === Callbacks and value access ===

    /// Attach, replace, or clear (`None`) the change callback.
    pub fn set_callback(&mut self, callback: Option<NumericCallback<N>>) {
        self.callback = callback;
    }

    /// The current stored snapshot.
    #[inline]
    pub fn value(&self) -> &[f64; N] {
        &self.value
    }

    /// The metadata forwarded to the host at registration.
    pub fn info(&self) -> &NumericInfo {
        &self.info
    }

    /// Number of components (the arity `N`).
    #[inline]
    pub const fn components(&self) -> usize {
        N
    }
}

impl NumericParam<1> {
    /// Set the host-side default value. Scalar shorthand for
    /// [`with_defaults`](Self::with_defaults).
    pub fn with_default(self, default: f64) -> Self {
        self.with_defaults([default])
    }
}

impl<const N: usize> Param for NumericParam<N> {
    fn name(&self) -> &'static str {
        self.info.name
    }

    fn label(&self) -> &'static str {
        self.info.label
    }

    fn page(&self) -> &'static str {
        self.info.page
    }

    fn update(&mut self, inputs: &dyn ParamInputs) {
        let mut changed = false;

        for (i, slot) in self.value.iter_mut().enumerate() {
            let v = inputs.numeric(self.info.name, i);
            if v != *slot {
                *slot = v;
                changed = true;
            }
        }

        if changed {
            trace!("parameter {:?} changed to {:?}", self.info.name, self.value);
            if let Some(callback) = &mut self.callback {
                callback(&self.value);
            }
        }
    }
}

// =============================================================================
// StringParam - single string value
// =============================================================================

/// String parameter; also the shape behind file/folder pickers and operator
/// references (which carry an operator path as their value).
pub struct StringParam {
    info: StringInfo,
    value: String,
    callback: Option<StringCallback>,
}

impl StringParam {
    /// Create a descriptor named `name` on the default page, with an empty
    /// snapshot and no callback.
    pub fn new(name: &'static str) -> Self {
        Self {
            info: StringInfo::new(name),
            value: String::new(),
            callback: None,
        }
    }

    // === Builder methods ===

    /// Set the display label.
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.info.label = label;
        self
    }

    /// Set the display page/group.
    pub fn with_page(mut self, page: &'static str) -> Self {
        self.info.page = page;
        self
    }

    /// Set the host-side default value.
    pub fn with_default(mut self, default: &'static str) -> Self {
        self.info.default = default;
        self
    }

    // === Callbacks and value access ===

    /// Attach, replace, or clear (`None`) the change callback.
    pub fn set_callback(&mut self, callback: Option<StringCallback>) {
        self.callback = callback;
    }

    /// The current stored snapshot.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The metadata forwarded to the host at registration.
    pub fn info(&self) -> &StringInfo {
        &self.info
    }
}

impl Param for StringParam {
    fn name(&self) -> &'static str {
        self.info.name
    }

    fn label(&self) -> &'static str {
        self.info.label
    }

    fn page(&self) -> &'static str {
        self.info.page
    }

    fn update(&mut self, inputs: &dyn ParamInputs) {
        let v = inputs.string(self.info.name);
        if v != self.value {
            self.value.clear();
            self.value.push_str(v);
            trace!("parameter {:?} changed to {:?}", self.info.name, self.value);
            if let Some(callback) = &mut self.callback {
                callback(&self.value);
            }
        }
    }
}
