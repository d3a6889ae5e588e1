//! The parameter registry: registration bookkeeping, the per-tick update
//! loop, and by-name pulse dispatch.
//!
//! A plugin creates one [`ParamRegistry`] per instance, binds the host's
//! parameter manager with [`init`](ParamRegistry::init), and declares its
//! parameters through the `append_*` methods during setup. After that the
//! host drives everything: [`update`](ParamRegistry::update) once per tick,
//! [`pulse_pressed`](ParamRegistry::pulse_pressed) once per button press.
//!
//! Each `append_*` does three things: forwards the descriptor's metadata to
//! the matching manager method (which is what makes the parameter appear in
//! the host UI), attaches the supplied callback, and takes ownership of the
//! descriptor in registration order. Pulse parameters go into their own
//! list; they have no persistent value to poll, so a tick never touches
//! them.
//!
//! Descriptors are never removed; the registry lives as long as the plugin
//! instance.

use log::{debug, trace, warn};

use crate::error::{ParamError, ParamResult};
use crate::host::{ParamInputs, ParamManager};
use crate::param::{
    NumericCallback, NumericParam, Param, PulseCallback, ScalarParam, StringCallback, StringParam,
};

/// A registered pulse button: the descriptor plus its press callback.
struct PulseEntry {
    param: ScalarParam,
    callback: Option<PulseCallback>,
}

/// Owns every registered descriptor and forwards host traffic to them.
#[derive(Default)]
pub struct ParamRegistry {
    manager: Option<Box<dyn ParamManager>>,
    params: Vec<Box<dyn Param>>,
    pulses: Vec<PulseEntry>,
}

impl ParamRegistry {
    /// Create an empty registry. [`init`](Self::init) must be called before
    /// any `append_*`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the host's parameter manager. Call exactly once, before any
    /// `append_*`.
    pub fn init(&mut self, manager: Box<dyn ParamManager>) {
        if self.manager.is_some() {
            warn!("replacing an already-bound parameter manager");
        }
        self.manager = Some(manager);
    }

    fn manager_mut(&mut self) -> ParamResult<&mut dyn ParamManager> {
        match self.manager.as_mut() {
            Some(manager) => Ok(manager.as_mut()),
            None => Err(ParamError::NotInitialized),
        }
    }

    // =========================================================================
    // Numeric shapes
    // =========================================================================

    /// Register a float parameter of any arity 1-4.
    pub fn append_float<const N: usize>(
        &mut self,
        mut param: NumericParam<N>,
        callback: Option<NumericCallback<N>>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_float(param.info(), N)?;
        param.set_callback(callback);
        debug!("registered float parameter {:?} ({N} components)", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register an integer parameter of any arity 1-4.
    pub fn append_int<const N: usize>(
        &mut self,
        mut param: NumericParam<N>,
        callback: Option<NumericCallback<N>>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_int(param.info(), N)?;
        param.set_callback(callback);
        debug!("registered int parameter {:?} ({N} components)", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a 2-component XY position parameter.
    pub fn append_xy(
        &mut self,
        mut param: NumericParam<2>,
        callback: Option<NumericCallback<2>>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_xy(param.info())?;
        param.set_callback(callback);
        debug!("registered XY parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a 3-component XYZ position parameter.
    pub fn append_xyz(
        &mut self,
        mut param: NumericParam<3>,
        callback: Option<NumericCallback<3>>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_xyz(param.info())?;
        param.set_callback(callback);
        debug!("registered XYZ parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a 2-component UV texture-coordinate parameter.
    pub fn append_uv(
        &mut self,
        mut param: NumericParam<2>,
        callback: Option<NumericCallback<2>>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_uv(param.info())?;
        param.set_callback(callback);
        debug!("registered UV parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a 3-component UVW texture-coordinate parameter.
    pub fn append_uvw(
        &mut self,
        mut param: NumericParam<3>,
        callback: Option<NumericCallback<3>>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_uvw(param.info())?;
        param.set_callback(callback);
        debug!("registered UVW parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a 3-component RGB color parameter.
    pub fn append_rgb(
        &mut self,
        mut param: NumericParam<3>,
        callback: Option<NumericCallback<3>>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_rgb(param.info())?;
        param.set_callback(callback);
        debug!("registered RGB parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a 4-component RGBA color parameter.
    pub fn append_rgba(
        &mut self,
        mut param: NumericParam<4>,
        callback: Option<NumericCallback<4>>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_rgba(param.info())?;
        param.set_callback(callback);
        debug!("registered RGBA parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register an on/off toggle.
    pub fn append_toggle(
        &mut self,
        mut param: ScalarParam,
        callback: Option<NumericCallback<1>>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_toggle(param.info())?;
        param.set_callback(callback);
        debug!("registered toggle parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a momentary pulse button.
    ///
    /// Pulses are routed into their own dispatch list instead of the update
    /// list: they carry no persistent value, so ticks never touch them and
    /// only [`pulse_pressed`](Self::pulse_pressed) can fire their callback.
    pub fn append_pulse(
        &mut self,
        param: ScalarParam,
        callback: Option<PulseCallback>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_pulse(param.info())?;
        debug!("registered pulse parameter {:?}", param.name());
        self.pulses.push(PulseEntry { param, callback });
        Ok(())
    }

    // =========================================================================
    // String shapes
    // =========================================================================

    /// Register a free-form string parameter.
    pub fn append_string(
        &mut self,
        mut param: StringParam,
        callback: Option<StringCallback>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_string(param.info())?;
        param.set_callback(callback);
        debug!("registered string parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a file-picker parameter.
    pub fn append_file(
        &mut self,
        mut param: StringParam,
        callback: Option<StringCallback>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_file(param.info())?;
        param.set_callback(callback);
        debug!("registered file parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a folder-picker parameter.
    pub fn append_folder(
        &mut self,
        mut param: StringParam,
        callback: Option<StringCallback>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_folder(param.info())?;
        param.set_callback(callback);
        debug!("registered folder parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a CHOP operator reference.
    pub fn append_chop(
        &mut self,
        mut param: StringParam,
        callback: Option<StringCallback>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_chop(param.info())?;
        param.set_callback(callback);
        debug!("registered CHOP parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a TOP operator reference.
    pub fn append_top(
        &mut self,
        mut param: StringParam,
        callback: Option<StringCallback>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_top(param.info())?;
        param.set_callback(callback);
        debug!("registered TOP parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a DAT operator reference.
    pub fn append_dat(
        &mut self,
        mut param: StringParam,
        callback: Option<StringCallback>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_dat(param.info())?;
        param.set_callback(callback);
        debug!("registered DAT parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    /// Register a generic operator reference.
    pub fn append_object(
        &mut self,
        mut param: StringParam,
        callback: Option<StringCallback>,
    ) -> ParamResult<()> {
        self.manager_mut()?.append_object(param.info())?;
        param.set_callback(callback);
        debug!("registered object parameter {:?}", param.name());
        self.params.push(Box::new(param));
        Ok(())
    }

    // =========================================================================
    // Host-driven dispatch
    // =========================================================================

    /// Refresh every registered parameter from `inputs`, in registration
    /// order, firing change callbacks along the way. Call once per host
    /// tick.
    pub fn update(&mut self, inputs: &dyn ParamInputs) {
        for param in &mut self.params {
            param.update(inputs);
        }
    }

    /// Dispatch a host pulse event: fire the callback of every pulse
    /// parameter named `name`. No match is a silent no-op.
    pub fn pulse_pressed(&mut self, name: &str) {
        for entry in &mut self.pulses {
            if entry.param.name() == name {
                trace!("pulse {:?} pressed", name);
                if let Some(callback) = &mut entry.callback {
                    callback();
                }
            }
        }
    }

    /// Number of parameters in the per-tick update list.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Number of registered pulse parameters.
    pub fn pulse_count(&self) -> usize {
        self.pulses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{NumericInfo, StringInfo};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Records every registration as (shape, name) into shared state so
    /// tests can inspect it after the registry has taken ownership.
    #[derive(Default)]
    struct RecordingManager {
        calls: Rc<RefCell<Vec<(&'static str, &'static str)>>>,
    }

    impl RecordingManager {
        fn record(&self, shape: &'static str, name: &'static str) -> ParamResult<()> {
            self.calls.borrow_mut().push((shape, name));
            Ok(())
        }
    }

    impl ParamManager for RecordingManager {
        fn append_float(&mut self, info: &NumericInfo, _components: usize) -> ParamResult<()> {
            self.record("float", info.name)
        }
        fn append_int(&mut self, info: &NumericInfo, _components: usize) -> ParamResult<()> {
            self.record("int", info.name)
        }
        fn append_xy(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.record("xy", info.name)
        }
        fn append_xyz(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.record("xyz", info.name)
        }
        fn append_uv(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.record("uv", info.name)
        }
        fn append_uvw(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.record("uvw", info.name)
        }
        fn append_rgb(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.record("rgb", info.name)
        }
        fn append_rgba(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.record("rgba", info.name)
        }
        fn append_toggle(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.record("toggle", info.name)
        }
        fn append_pulse(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.record("pulse", info.name)
        }
        fn append_string(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.record("string", info.name)
        }
        fn append_file(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.record("file", info.name)
        }
        fn append_folder(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.record("folder", info.name)
        }
        fn append_chop(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.record("chop", info.name)
        }
        fn append_top(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.record("top", info.name)
        }
        fn append_dat(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.record("dat", info.name)
        }
        fn append_object(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.record("object", info.name)
        }
    }

    /// Rejects every registration.
    struct RefusingManager;

    impl ParamManager for RefusingManager {
        fn append_float(&mut self, info: &NumericInfo, _components: usize) -> ParamResult<()> {
            Err(ParamError::Rejected {
                name: info.name.to_string(),
                message: "duplicate name".to_string(),
            })
        }
        fn append_int(&mut self, info: &NumericInfo, c: usize) -> ParamResult<()> {
            self.append_float(info, c)
        }
        fn append_xy(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.append_float(info, 2)
        }
        fn append_xyz(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.append_float(info, 3)
        }
        fn append_uv(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.append_float(info, 2)
        }
        fn append_uvw(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.append_float(info, 3)
        }
        fn append_rgb(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.append_float(info, 3)
        }
        fn append_rgba(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.append_float(info, 4)
        }
        fn append_toggle(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.append_float(info, 1)
        }
        fn append_pulse(&mut self, info: &NumericInfo) -> ParamResult<()> {
            self.append_float(info, 1)
        }
        fn append_string(&mut self, info: &StringInfo) -> ParamResult<()> {
            Err(ParamError::Rejected {
                name: info.name.to_string(),
                message: "duplicate name".to_string(),
            })
        }
        fn append_file(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.append_string(info)
        }
        fn append_folder(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.append_string(info)
        }
        fn append_chop(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.append_string(info)
        }
        fn append_top(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.append_string(info)
        }
        fn append_dat(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.append_string(info)
        }
        fn append_object(&mut self, info: &StringInfo) -> ParamResult<()> {
            self.append_string(info)
        }
    }

    #[derive(Default)]
    struct MapInputs {
        numeric: HashMap<&'static str, Vec<f64>>,
        strings: HashMap<&'static str, String>,
    }

    impl ParamInputs for MapInputs {
        fn numeric(&self, name: &str, component: usize) -> f64 {
            self.numeric
                .get(name)
                .and_then(|v| v.get(component))
                .copied()
                .unwrap_or(0.0)
        }

        fn string(&self, name: &str) -> &str {
            self.strings.get(name).map(String::as_str).unwrap_or("")
        }
    }

    fn recording_registry() -> (ParamRegistry, Rc<RefCell<Vec<(&'static str, &'static str)>>>) {
        let manager = RecordingManager::default();
        let calls = manager.calls.clone();
        let mut registry = ParamRegistry::new();
        registry.init(Box::new(manager));
        (registry, calls)
    }

    #[test]
    fn test_append_before_init_fails() {
        let mut registry = ParamRegistry::new();
        let result = registry.append_float(ScalarParam::new("Speed"), None);
        assert!(matches!(result, Err(ParamError::NotInitialized)));
        assert_eq!(registry.param_count(), 0);
    }

    #[test]
    fn test_append_forwards_one_call_per_shape() {
        let (mut registry, calls) = recording_registry();

        registry.append_float(ScalarParam::new("Speed"), None).unwrap();
        registry.append_rgb(NumericParam::<3>::new("Color"), None).unwrap();
        registry.append_toggle(ScalarParam::new("Active"), None).unwrap();
        registry.append_pulse(ScalarParam::new("Reset"), None).unwrap();
        registry.append_file(StringParam::new("Source"), None).unwrap();
        registry.append_dat(StringParam::new("Table"), None).unwrap();

        assert_eq!(
            calls.borrow().as_slice(),
            &[
                ("float", "Speed"),
                ("rgb", "Color"),
                ("toggle", "Active"),
                ("pulse", "Reset"),
                ("file", "Source"),
                ("dat", "Table"),
            ]
        );
        assert_eq!(registry.param_count(), 5);
        assert_eq!(registry.pulse_count(), 1);
    }

    #[test]
    fn test_host_rejection_propagates_and_registers_nothing() {
        let mut registry = ParamRegistry::new();
        registry.init(Box::new(RefusingManager));

        let result = registry.append_float(ScalarParam::new("Speed"), None);
        assert!(matches!(result, Err(ParamError::Rejected { .. })));

        let result = registry.append_pulse(ScalarParam::new("Reset"), None);
        assert!(result.is_err());

        assert_eq!(registry.param_count(), 0);
        assert_eq!(registry.pulse_count(), 0);
    }

    #[test]
    fn test_update_fires_callbacks_in_registration_order() {
        let (mut registry, _) = recording_registry();
        let order = Rc::new(RefCell::new(Vec::new()));

        for name in ["A", "B", "C"] {
            let sink = order.clone();
            registry
                .append_float(
                    ScalarParam::new(name),
                    Some(Box::new(move |_: &[f64; 1]| sink.borrow_mut().push(name))),
                )
                .unwrap();
        }

        let mut inputs = MapInputs::default();
        inputs.numeric.insert("A", vec![1.0]);
        inputs.numeric.insert("B", vec![1.0]);
        inputs.numeric.insert("C", vec![1.0]);

        registry.update(&inputs);
        assert_eq!(order.borrow().as_slice(), &["A", "B", "C"]);
    }

    #[test]
    fn test_update_mixes_numeric_and_string_params() {
        let (mut registry, _) = recording_registry();
        let order = Rc::new(RefCell::new(Vec::new()));

        let sink = order.clone();
        registry
            .append_rgb(
                NumericParam::<3>::new("Color"),
                Some(Box::new(move |v: &[f64; 3]| {
                    sink.borrow_mut().push(format!("Color={:?}", v))
                })),
            )
            .unwrap();
        let sink = order.clone();
        registry
            .append_string(
                StringParam::new("Mode"),
                Some(Box::new(move |v: &str| {
                    sink.borrow_mut().push(format!("Mode={}", v))
                })),
            )
            .unwrap();

        let mut inputs = MapInputs::default();
        inputs.numeric.insert("Color", vec![0.0, 0.0, 1.0]);
        inputs.strings.insert("Mode", "additive".to_string());

        registry.update(&inputs);
        registry.update(&inputs);

        assert_eq!(
            order.borrow().as_slice(),
            &["Color=[0.0, 0.0, 1.0]".to_string(), "Mode=additive".to_string()]
        );
    }

    #[test]
    fn test_tick_never_fires_pulse_callbacks() {
        let (mut registry, _) = recording_registry();
        let fired = Rc::new(RefCell::new(0));

        let counter = fired.clone();
        registry
            .append_pulse(
                ScalarParam::new("Reset"),
                Some(Box::new(move || *counter.borrow_mut() += 1)),
            )
            .unwrap();

        // A host value under the pulse's name must not reach it via update.
        let mut inputs = MapInputs::default();
        inputs.numeric.insert("Reset", vec![1.0]);

        registry.update(&inputs);
        assert_eq!(*fired.borrow(), 0);

        registry.pulse_pressed("Reset");
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_pulse_pressed_matches_by_name_only() {
        let (mut registry, _) = recording_registry();
        let fired = Rc::new(RefCell::new(Vec::new()));

        for name in ["Start", "Stop"] {
            let sink = fired.clone();
            registry
                .append_pulse(
                    ScalarParam::new(name),
                    Some(Box::new(move || sink.borrow_mut().push(name))),
                )
                .unwrap();
        }

        registry.pulse_pressed("Stop");
        assert_eq!(fired.borrow().as_slice(), &["Stop"]);
    }

    #[test]
    fn test_pulse_pressed_fires_every_duplicate() {
        let (mut registry, _) = recording_registry();
        let fired = Rc::new(RefCell::new(0));

        for _ in 0..2 {
            let counter = fired.clone();
            registry
                .append_pulse(
                    ScalarParam::new("Go"),
                    Some(Box::new(move || *counter.borrow_mut() += 1)),
                )
                .unwrap();
        }

        registry.pulse_pressed("Go");
        assert_eq!(*fired.borrow(), 2);
    }

    #[test]
    fn test_pulse_pressed_without_match_is_noop() {
        let (mut registry, _) = recording_registry();
        registry.append_pulse(ScalarParam::new("Reset"), None).unwrap();

        // Unknown name, and a known name with no callback attached.
        registry.pulse_pressed("DoesNotExist");
        registry.pulse_pressed("Reset");
    }
}
