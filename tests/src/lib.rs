//! Testing utilities for the molt host.
//!
//! In-process stand-ins for the pieces that normally live behind the module
//! boundary: a recording application module, a scripted artifact loader, and
//! a stub platform. All single-threaded, like the host itself.

use molt_host::loader::{ArtifactLoader, ModuleDescriptor, ModuleLoadError};
use molt_host::watch;
use molt_kernel::{
    AppHooks, ArenaBlock, ButtonState, CapabilityTable, DeviceChange, DeviceId, DropPayload,
    HostEvent, ModuleLifecycle, PlatformServices, SensorKind, TouchPhase, WheelDirection,
    WindowId,
};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Shared, ordered log of everything a mock observed.
pub type SharedLog = Rc<RefCell<Vec<String>>>;

/// A fresh empty log.
pub fn shared_log() -> SharedLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Application module mock that overrides every optional hook and records
/// each call, in order, into a shared log.
pub struct RecordingHooks {
    log: SharedLog,
}

impl RecordingHooks {
    pub fn new(log: SharedLog) -> Self {
        Self { log }
    }

    fn record(&self, entry: impl Into<String>) {
        self.log.borrow_mut().push(entry.into());
    }
}

impl ModuleLifecycle for RecordingHooks {
    fn teardown(&mut self) {
        self.record("teardown");
    }
}

impl AppHooks for RecordingHooks {
    fn init(&mut self, arena: ArenaBlock, _caps: &CapabilityTable, w: u32, h: u32) {
        self.record(format!("init {:#x} {w}x{h}", arena.base as usize));
    }
    fn update(&mut self, dt_seconds: f32) {
        self.record(format!("update {dt_seconds:.4}"));
    }
    fn render(&mut self) {
        self.record("render");
    }

    fn low_memory(&mut self) {
        self.record("low_memory");
    }
    fn window_shown(&mut self, window: WindowId, visible: bool) {
        self.record(format!("window_shown {window} {visible}"));
    }
    fn window_moved(&mut self, window: WindowId, x: i32, y: i32) {
        self.record(format!("window_moved {window} {x},{y}"));
    }
    fn window_resized(&mut self, window: WindowId, width: i32, height: i32) {
        self.record(format!("window_resized {window} {width}x{height}"));
    }
    fn window_min_maxed(&mut self, window: WindowId, maximized: bool) {
        self.record(format!("window_min_maxed {window} {maximized}"));
    }
    fn window_hovered(&mut self, window: WindowId, entered: bool) {
        self.record(format!("window_hovered {window} {entered}"));
    }
    fn window_focused(&mut self, window: WindowId, gained: bool) {
        self.record(format!("window_focused {window} {gained}"));
    }
    fn window_closed(&mut self, window: WindowId) {
        self.record(format!("window_closed {window}"));
    }
    fn keyboard(&mut self, window: WindowId, state: ButtonState, repeat: bool, scancode: u8) {
        self.record(format!("keyboard {window} {state:?} {repeat} {scancode}"));
    }
    fn mouse_motion(&mut self, window: WindowId, device: DeviceId, x: i32, y: i32, dx: i32, dy: i32) {
        self.record(format!("mouse_motion {window} {device} {x},{y} {dx},{dy}"));
    }
    fn mouse_button(
        &mut self,
        window: WindowId,
        device: DeviceId,
        button: u8,
        state: ButtonState,
        clicks: u8,
        x: i32,
        y: i32,
    ) {
        self.record(format!(
            "mouse_button {window} {device} {button} {state:?} {clicks} {x},{y}"
        ));
    }
    fn mouse_wheel(
        &mut self,
        window: WindowId,
        device: DeviceId,
        x: i32,
        y: i32,
        direction: WheelDirection,
    ) {
        self.record(format!("mouse_wheel {window} {device} {x},{y} {direction:?}"));
    }
    fn joy_device(&mut self, device: DeviceId, change: DeviceChange) {
        self.record(format!("joy_device {device} {change:?}"));
    }
    fn joy_button(&mut self, device: DeviceId, button: u8, state: ButtonState) {
        self.record(format!("joy_button {device} {button} {state:?}"));
    }
    fn joy_axis(&mut self, device: DeviceId, axis: u8, value: i16) {
        self.record(format!("joy_axis {device} {axis} {value}"));
    }
    fn joy_hat(&mut self, device: DeviceId, hat: u8, value: u8) {
        self.record(format!("joy_hat {device} {hat} {value}"));
    }
    fn joy_ball(&mut self, device: DeviceId, ball: u8, dx: i16, dy: i16) {
        self.record(format!("joy_ball {device} {ball} {dx},{dy}"));
    }
    fn controller_device(&mut self, device: DeviceId, change: DeviceChange) {
        self.record(format!("controller_device {device} {change:?}"));
    }
    fn controller_button(&mut self, device: DeviceId, button: u8, state: ButtonState) {
        self.record(format!("controller_button {device} {button} {state:?}"));
    }
    fn controller_axis(&mut self, device: DeviceId, axis: u8, value: i16) {
        self.record(format!("controller_axis {device} {axis} {value}"));
    }
    fn controller_touchpad(
        &mut self,
        device: DeviceId,
        phase: TouchPhase,
        finger: i32,
        x: f32,
        y: f32,
        pressure: f32,
    ) {
        self.record(format!(
            "controller_touchpad {device} {phase:?} {finger} {x},{y} {pressure}"
        ));
    }
    fn controller_sensor(&mut self, device: DeviceId, sensor: SensorKind, data: &[f32]) {
        self.record(format!("controller_sensor {device} {sensor:?} {}", data.len()));
    }
    fn audio_device(&mut self, device: DeviceId, change: DeviceChange, capture: bool) {
        self.record(format!("audio_device {device} {change:?} {capture}"));
    }
    fn channel_finished(&mut self, channel: u32) {
        self.record(format!("channel_finished {channel}"));
    }
    fn music_finished(&mut self) {
        self.record("music_finished");
    }
    fn touch_finger(
        &mut self,
        window: WindowId,
        touch: i64,
        finger: i64,
        phase: TouchPhase,
        x: f32,
        y: f32,
        _dx: f32,
        _dy: f32,
        _pressure: f32,
    ) {
        self.record(format!("touch_finger {window} {touch}/{finger} {phase:?} {x},{y}"));
    }
    fn dropped(&mut self, window: WindowId, payload: &DropPayload) {
        self.record(format!("dropped {window} {payload:?}"));
    }
    fn sensor(&mut self, device: DeviceId, sensor: SensorKind, data: &[f32]) {
        self.record(format!("sensor {device} {sensor:?} {}", data.len()));
    }
    fn user_event(&mut self, window: WindowId, kind: u32, code: i32) {
        self.record(format!("user_event {window} {kind} {code}"));
    }
}

/// A module that overrides nothing optional, like an artifact exporting only
/// the three required entry points: every event category falls through the
/// default no-op bodies.
pub struct MinimalHooks;

impl ModuleLifecycle for MinimalHooks {}

impl AppHooks for MinimalHooks {
    fn init(&mut self, _arena: ArenaBlock, _caps: &CapabilityTable, _w: u32, _h: u32) {}
    fn update(&mut self, _dt_seconds: f32) {}
    fn render(&mut self) {}
}

/// In-process module produced by [`ScriptedLoader`].
pub struct ScriptedModule {
    log: SharedLog,
}

impl ModuleLifecycle for ScriptedModule {
    fn teardown(&mut self) {
        self.log.borrow_mut().push("teardown".to_string());
    }
}

impl AppHooks for ScriptedModule {
    fn init(&mut self, arena: ArenaBlock, _caps: &CapabilityTable, _w: u32, _h: u32) {
        self.log
            .borrow_mut()
            .push(format!("init {:#x}", arena.base as usize));
    }
    fn update(&mut self, _dt_seconds: f32) {}
    fn render(&mut self) {}
}

/// Artifact loader over in-process modules, scripted per test: the next
/// load can be made to come up vacant or to fail on a required symbol, and
/// every load/unload lands in the shared log in order.
pub struct ScriptedLoader {
    log: SharedLog,
    /// How many upcoming loads find no artifact.
    pub vacant_loads: u32,
    /// Makes the next load fail resolution of this required symbol.
    pub fail_with_missing: Option<&'static str>,
    generation: u64,
}

impl ScriptedLoader {
    pub fn new(log: SharedLog) -> Self {
        Self {
            log,
            vacant_loads: 0,
            fail_with_missing: None,
            generation: 0,
        }
    }
}

impl ArtifactLoader for ScriptedLoader {
    type Module = dyn AppHooks;

    fn load(&mut self, path: &Path) -> Result<ModuleDescriptor<dyn AppHooks>, ModuleLoadError> {
        self.log.borrow_mut().push("load".to_string());

        if let Some(symbol) = self.fail_with_missing.take() {
            return Err(ModuleLoadError::MissingRequiredSymbol {
                symbol: symbol.to_string(),
                path: path.to_path_buf(),
                detail: "undefined symbol".to_string(),
            });
        }
        if self.vacant_loads > 0 {
            self.vacant_loads -= 1;
            return Ok(ModuleDescriptor::vacant(path));
        }

        self.generation += 1;
        Ok(ModuleDescriptor::loaded(
            path,
            Box::new(ScriptedModule {
                log: self.log.clone(),
            }),
            watch::artifact_mtime(path),
            self.generation,
        ))
    }

    fn unload(&mut self, descriptor: &mut ModuleDescriptor<dyn AppHooks>) {
        self.log.borrow_mut().push("unload".to_string());
        descriptor.clear();
    }
}

/// Platform stub with an externally shared event queue and a present
/// counter.
pub struct StubPlatform {
    pub queue: Rc<RefCell<Vec<HostEvent>>>,
    pub presented: Rc<RefCell<u32>>,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(Vec::new())),
            presented: Rc::new(RefCell::new(0)),
        }
    }
}

impl Default for StubPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleLifecycle for StubPlatform {}

impl PlatformServices for StubPlatform {
    fn initialize(&mut self, _arena: ArenaBlock, _viewport_w: u32, _viewport_h: u32) {}

    fn poll_events(&mut self, out: &mut Vec<HostEvent>) {
        out.append(&mut self.queue.borrow_mut());
    }

    fn present(&mut self) {
        *self.presented.borrow_mut() += 1;
    }

    fn capabilities(&self) -> CapabilityTable {
        CapabilityTable::noop()
    }
}

/// One event of every category, for exhaustiveness sweeps.
pub fn one_of_each_category() -> Vec<HostEvent> {
    use molt_kernel::WindowEvent;
    vec![
        HostEvent::Window {
            window: 1,
            event: WindowEvent::Shown,
        },
        HostEvent::Keyboard {
            window: 1,
            state: ButtonState::Pressed,
            repeat: false,
            scancode: 4,
        },
        HostEvent::MouseMotion {
            window: 1,
            device: 0,
            x: 10,
            y: 20,
            dx: 1,
            dy: 2,
        },
        HostEvent::MouseButton {
            window: 1,
            device: 0,
            button: 1,
            state: ButtonState::Released,
            clicks: 2,
            x: 10,
            y: 20,
        },
        HostEvent::MouseWheel {
            window: 1,
            device: 0,
            x: 0,
            y: -1,
            direction: WheelDirection::Normal,
        },
        HostEvent::JoyDevice {
            device: 3,
            change: DeviceChange::Added,
        },
        HostEvent::JoyButton {
            device: 3,
            button: 0,
            state: ButtonState::Pressed,
        },
        HostEvent::JoyAxis {
            device: 3,
            axis: 1,
            value: -3000,
        },
        HostEvent::JoyHat {
            device: 3,
            hat: 0,
            value: 0x02,
        },
        HostEvent::JoyBall {
            device: 3,
            ball: 0,
            dx: 1,
            dy: -1,
        },
        HostEvent::ControllerDevice {
            device: 4,
            change: DeviceChange::Removed,
        },
        HostEvent::ControllerButton {
            device: 4,
            button: 2,
            state: ButtonState::Pressed,
        },
        HostEvent::ControllerAxis {
            device: 4,
            axis: 0,
            value: 12000,
        },
        HostEvent::ControllerTouchpad {
            device: 4,
            phase: TouchPhase::Down,
            finger: 0,
            x: 0.5,
            y: 0.5,
            pressure: 1.0,
        },
        HostEvent::ControllerSensor {
            device: 4,
            sensor: SensorKind::Gyroscope,
            data: [0.0; 6],
        },
        HostEvent::AudioDevice {
            device: 5,
            change: DeviceChange::Added,
            capture: false,
        },
        HostEvent::ChannelFinished { channel: 7 },
        HostEvent::MusicFinished,
        HostEvent::TouchFinger {
            window: 1,
            touch: 9,
            finger: 1,
            phase: TouchPhase::Motion,
            x: 0.1,
            y: 0.2,
            dx: 0.0,
            dy: 0.0,
            pressure: 0.7,
        },
        HostEvent::Drop {
            window: 1,
            payload: DropPayload::File("assets/images/ship.png".to_string()),
        },
        HostEvent::Sensor {
            device: 6,
            sensor: SensorKind::Accelerometer,
            data: [0.0; 6],
        },
        HostEvent::User {
            window: 1,
            kind: 0x8001,
            code: -5,
        },
        HostEvent::LowMemory,
    ]
}
