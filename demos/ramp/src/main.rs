//! Simulated-host demo.
//!
//! There is no real host in this workspace, so this binary plays one: it
//! implements the [`ParamManager`] and [`ParamInputs`] collaborators over
//! in-memory maps, registers a small parameter page, then scripts a few
//! "user edits" across ticks and a pulse press so the change callbacks can
//! be watched in the log output.
//!
//! Run with `RUST_LOG=trace` to also see the per-change trace lines.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::info;
use parlay::prelude::*;

/// Current parameter values as the "host" sees them. The manager seeds this
/// from registration defaults; the script below mutates it to simulate user
/// edits.
#[derive(Default)]
struct SimState {
    numeric: HashMap<String, Vec<f64>>,
    strings: HashMap<String, String>,
}

/// Host-side registration: remembers each parameter and seeds its value
/// from the declared defaults.
struct SimManager {
    state: Rc<RefCell<SimState>>,
}

impl SimManager {
    fn register_numeric(
        &mut self,
        shape: &str,
        info: &NumericInfo,
        components: usize,
    ) -> ParamResult<()> {
        info!("host: added {} parameter {:?} on page {:?}", shape, info.name, info.page);
        self.state
            .borrow_mut()
            .numeric
            .insert(info.name.to_string(), info.defaults[..components].to_vec());
        Ok(())
    }

    fn register_string(&mut self, shape: &str, info: &StringInfo) -> ParamResult<()> {
        info!("host: added {} parameter {:?} on page {:?}", shape, info.name, info.page);
        self.state
            .borrow_mut()
            .strings
            .insert(info.name.to_string(), info.default.to_string());
        Ok(())
    }
}

impl ParamManager for SimManager {
    fn append_float(&mut self, info: &NumericInfo, components: usize) -> ParamResult<()> {
        self.register_numeric("float", info, components)
    }
    fn append_int(&mut self, info: &NumericInfo, components: usize) -> ParamResult<()> {
        self.register_numeric("int", info, components)
    }
    fn append_xy(&mut self, info: &NumericInfo) -> ParamResult<()> {
        self.register_numeric("XY", info, 2)
    }
    fn append_xyz(&mut self, info: &NumericInfo) -> ParamResult<()> {
        self.register_numeric("XYZ", info, 3)
    }
    fn append_uv(&mut self, info: &NumericInfo) -> ParamResult<()> {
        self.register_numeric("UV", info, 2)
    }
    fn append_uvw(&mut self, info: &NumericInfo) -> ParamResult<()> {
        self.register_numeric("UVW", info, 3)
    }
    fn append_rgb(&mut self, info: &NumericInfo) -> ParamResult<()> {
        self.register_numeric("RGB", info, 3)
    }
    fn append_rgba(&mut self, info: &NumericInfo) -> ParamResult<()> {
        self.register_numeric("RGBA", info, 4)
    }
    fn append_toggle(&mut self, info: &NumericInfo) -> ParamResult<()> {
        self.register_numeric("toggle", info, 1)
    }
    fn append_pulse(&mut self, info: &NumericInfo) -> ParamResult<()> {
        info!("host: added pulse parameter {:?} on page {:?}", info.name, info.page);
        Ok(())
    }
    fn append_string(&mut self, info: &StringInfo) -> ParamResult<()> {
        self.register_string("string", info)
    }
    fn append_file(&mut self, info: &StringInfo) -> ParamResult<()> {
        self.register_string("file", info)
    }
    fn append_folder(&mut self, info: &StringInfo) -> ParamResult<()> {
        self.register_string("folder", info)
    }
    fn append_chop(&mut self, info: &StringInfo) -> ParamResult<()> {
        self.register_string("CHOP", info)
    }
    fn append_top(&mut self, info: &StringInfo) -> ParamResult<()> {
        self.register_string("TOP", info)
    }
    fn append_dat(&mut self, info: &StringInfo) -> ParamResult<()> {
        self.register_string("DAT", info)
    }
    fn append_object(&mut self, info: &StringInfo) -> ParamResult<()> {
        self.register_string("object", info)
    }
}

/// One tick's read-only view of the host state.
struct SimInputs<'a> {
    state: &'a SimState,
}

impl ParamInputs for SimInputs<'_> {
    fn numeric(&self, name: &str, component: usize) -> f64 {
        self.state
            .numeric
            .get(name)
            .and_then(|v| v.get(component))
            .copied()
            .unwrap_or(0.0)
    }

    fn string(&self, name: &str) -> &str {
        self.state.strings.get(name).map(String::as_str).unwrap_or("")
    }
}

/// What the "plugin" does with its parameters: callbacks write into this,
/// the render loop reads it.
#[derive(Debug, Default)]
struct Engine {
    speed: f64,
    color: [f64; 3],
    active: bool,
    source: String,
    phase: f64,
}

fn main() -> ParamResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let state = Rc::new(RefCell::new(SimState::default()));
    let engine = Rc::new(RefCell::new(Engine::default()));

    let mut registry = ParamRegistry::new();
    registry.init(Box::new(SimManager { state: state.clone() }));

    let sink = engine.clone();
    registry
        .append_float(
            ScalarParam::new("Speed")
                .with_page("Ramp")
                .with_default(1.0)
                .with_range(0.0, 10.0)
                .with_slider_range(0.0, 4.0),
            Some(Box::new(move |v: &[f64; 1]| {
                info!("speed -> {}", v[0]);
                sink.borrow_mut().speed = v[0];
            })),
        )?;

    let sink = engine.clone();
    registry
        .append_rgb(
            NumericParam::<3>::new("Color")
                .with_page("Ramp")
                .with_defaults([1.0, 1.0, 1.0]),
            Some(Box::new(move |v: &[f64; 3]| {
                info!("color -> {:?}", v);
                sink.borrow_mut().color = *v;
            })),
        )?;

    let sink = engine.clone();
    registry
        .append_toggle(
            ScalarParam::new("Active").with_page("Ramp").with_default(1.0),
            Some(Box::new(move |v: &[f64; 1]| {
                let on = v[0] != 0.0;
                info!("active -> {}", on);
                sink.borrow_mut().active = on;
            })),
        )?;

    let sink = engine.clone();
    registry
        .append_file(
            StringParam::new("Source").with_page("Ramp"),
            Some(Box::new(move |v: &str| {
                info!("source -> {:?}", v);
                sink.borrow_mut().source = v.to_string();
            })),
        )?;

    let sink = engine.clone();
    registry
        .append_pulse(
            ScalarParam::new("Reset").with_page("Ramp"),
            Some(Box::new(move || {
                info!("reset pressed, rewinding phase");
                sink.borrow_mut().phase = 0.0;
            })),
        )?;

    // Scripted session: (tick, edit to apply before that tick).
    for tick in 1u32..=6 {
        match tick {
            2 => {
                state.borrow_mut().numeric.insert("Speed".into(), vec![2.5]);
            }
            3 => {
                state
                    .borrow_mut()
                    .numeric
                    .insert("Color".into(), vec![0.2, 0.4, 1.0]);
            }
            4 => {
                state.borrow_mut().numeric.insert("Active".into(), vec![0.0]);
            }
            6 => {
                state
                    .borrow_mut()
                    .strings
                    .insert("Source".into(), "clips/loop.mov".into());
            }
            _ => {}
        }

        {
            let snapshot = state.borrow();
            registry.update(&SimInputs { state: &snapshot });
        }

        {
            let mut engine = engine.borrow_mut();
            if engine.active {
                engine.phase += engine.speed;
            }
        }

        if tick == 5 {
            registry.pulse_pressed("Reset");
        }

        info!("tick {}: {:?}", tick, engine.borrow());
    }

    Ok(())
}
