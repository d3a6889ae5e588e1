//! Built metadata forwarded to the host at registration time.
//!
//! The host's parameter manager receives one of these structs for every
//! `append_*` call. They carry the identity of the parameter (name, label,
//! page) plus the option fields the host uses to build its UI: defaults,
//! hard ranges, slider ranges, and clamp flags.
//!
//! Option arrays are always [`MAX_COMPONENTS`] wide regardless of the
//! parameter's declared arity; only the first N entries are meaningful for
//! an N-component parameter. This mirrors the fixed-width descriptor
//! structs hosts of this kind expose.

/// Maximum number of components a numeric parameter can declare (RGBA).
pub const MAX_COMPONENTS: usize = 4;

/// Page a parameter lands on when the author doesn't pick one.
pub const DEFAULT_PAGE: &str = "Custom";

/// Metadata for a numeric-family parameter (float, int, vector, color,
/// toggle, pulse).
///
/// An empty `label` tells the host to display the name instead.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericInfo {
    /// Unique parameter name; the host lookup key.
    pub name: &'static str,
    /// Display label ("" = fall back to name).
    pub label: &'static str,
    /// Display page/group in the host UI.
    pub page: &'static str,
    /// Default value per component.
    pub defaults: [f64; MAX_COMPONENTS],
    /// Hard minimum per component, honored when the matching clamp flag is set.
    pub mins: [f64; MAX_COMPONENTS],
    /// Hard maximum per component, honored when the matching clamp flag is set.
    pub maxes: [f64; MAX_COMPONENTS],
    /// Slider minimum per component (UI hint only).
    pub slider_mins: [f64; MAX_COMPONENTS],
    /// Slider maximum per component (UI hint only).
    pub slider_maxes: [f64; MAX_COMPONENTS],
    /// Whether the host clamps values below `mins`.
    pub clamp_mins: [bool; MAX_COMPONENTS],
    /// Whether the host clamps values above `maxes`.
    pub clamp_maxes: [bool; MAX_COMPONENTS],
}

impl NumericInfo {
    /// Create metadata with host-conventional option defaults:
    /// value 0, range 0..=1, sliders 0..=1, no clamping.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            label: "",
            page: DEFAULT_PAGE,
            defaults: [0.0; MAX_COMPONENTS],
            mins: [0.0; MAX_COMPONENTS],
            maxes: [1.0; MAX_COMPONENTS],
            slider_mins: [0.0; MAX_COMPONENTS],
            slider_maxes: [1.0; MAX_COMPONENTS],
            clamp_mins: [false; MAX_COMPONENTS],
            clamp_maxes: [false; MAX_COMPONENTS],
        }
    }
}

/// Metadata for a string-family parameter (string, file, folder, operator
/// references).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringInfo {
    /// Unique parameter name; the host lookup key.
    pub name: &'static str,
    /// Display label ("" = fall back to name).
    pub label: &'static str,
    /// Display page/group in the host UI.
    pub page: &'static str,
    /// Default value.
    pub default: &'static str,
}

impl StringInfo {
    /// Create metadata with an empty default value.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            label: "",
            page: DEFAULT_PAGE,
            default: "",
        }
    }
}
