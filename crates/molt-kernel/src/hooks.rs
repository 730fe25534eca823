//! Module interface traits.
//!
//! The loader is a factory that returns a concrete implementation of one of
//! these interfaces (or a typed error). Required entry points are required
//! trait methods; optional entry points are methods with default no-op
//! bodies, so a module that does not implement a behavior category simply
//! never hears about it — there are no nullable slots to check at call
//! sites.

use crate::arena::ArenaBlock;
use crate::capability::CapabilityTable;
use crate::event::{
    ButtonState, DeviceChange, DeviceId, DropPayload, HostEvent, SensorKind, TouchPhase,
    WheelDirection, WindowId,
};

/// Lifecycle surface every loadable module shares.
pub trait ModuleLifecycle {
    /// Invoked before the module's backing artifact is unloaded (and on the
    /// clean-quit path), so the outgoing module can flush or release any
    /// non-arena resources it privately holds. Optional; default no-op.
    fn teardown(&mut self) {}
}

/// The application module's surface, as seen by the host.
///
/// `init`, `update` and `render` are the required entry points; everything
/// else is an optional per-category event callback.
#[allow(unused_variables)]
pub trait AppHooks: ModuleLifecycle {
    /// Called once after every load — initial or reload — with the
    /// pointer-stable arena and the current capability table. A reloaded
    /// module reattaches to its prior state here.
    fn init(
        &mut self,
        arena: ArenaBlock,
        capabilities: &CapabilityTable,
        viewport_w: u32,
        viewport_h: u32,
    );

    /// Fixed-step simulation update.
    fn update(&mut self, dt_seconds: f32);

    /// Render the current state through the capability table.
    fn render(&mut self);

    fn low_memory(&mut self) {}

    fn window_shown(&mut self, window: WindowId, visible: bool) {}
    fn window_moved(&mut self, window: WindowId, x: i32, y: i32) {}
    fn window_resized(&mut self, window: WindowId, width: i32, height: i32) {}
    fn window_min_maxed(&mut self, window: WindowId, maximized: bool) {}
    fn window_hovered(&mut self, window: WindowId, entered: bool) {}
    fn window_focused(&mut self, window: WindowId, gained: bool) {}
    fn window_closed(&mut self, window: WindowId) {}

    fn keyboard(&mut self, window: WindowId, state: ButtonState, repeat: bool, scancode: u8) {}
    fn mouse_motion(
        &mut self,
        window: WindowId,
        device: DeviceId,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
    ) {
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
    }
    fn mouse_wheel(
        &mut self,
        window: WindowId,
        device: DeviceId,
        x: i32,
        y: i32,
        direction: WheelDirection,
    ) {
    }

    fn joy_device(&mut self, device: DeviceId, change: DeviceChange) {}
    fn joy_button(&mut self, device: DeviceId, button: u8, state: ButtonState) {}
    fn joy_axis(&mut self, device: DeviceId, axis: u8, value: i16) {}
    fn joy_hat(&mut self, device: DeviceId, hat: u8, value: u8) {}
    fn joy_ball(&mut self, device: DeviceId, ball: u8, dx: i16, dy: i16) {}

    fn controller_device(&mut self, device: DeviceId, change: DeviceChange) {}
    fn controller_button(&mut self, device: DeviceId, button: u8, state: ButtonState) {}
    fn controller_axis(&mut self, device: DeviceId, axis: u8, value: i16) {}
    fn controller_touchpad(
        &mut self,
        device: DeviceId,
        phase: TouchPhase,
        finger: i32,
        x: f32,
        y: f32,
        pressure: f32,
    ) {
    }
    fn controller_sensor(&mut self, device: DeviceId, sensor: SensorKind, data: &[f32]) {}

    fn audio_device(&mut self, device: DeviceId, change: DeviceChange, capture: bool) {}
    fn channel_finished(&mut self, channel: u32) {}
    fn music_finished(&mut self) {}

    fn touch_finger(
        &mut self,
        window: WindowId,
        touch: i64,
        finger: i64,
        phase: TouchPhase,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        pressure: f32,
    ) {
    }

    fn dropped(&mut self, window: WindowId, payload: &DropPayload) {}
    fn sensor(&mut self, device: DeviceId, sensor: SensorKind, data: &[f32]) {}
    fn user_event(&mut self, window: WindowId, kind: u32, code: i32) {}
}

/// The platform collaborator's surface, as seen by the host.
///
/// In the richest configuration this is backed by a dynamically loaded,
/// independently reloadable module; in headless and embedded configurations
/// it is an in-process implementation.
pub trait PlatformServices: ModuleLifecycle {
    /// Called once after every load with the platform's own arena.
    fn initialize(&mut self, arena: ArenaBlock, viewport_w: u32, viewport_h: u32);

    /// Drain all pending events, in production order, into `out`.
    fn poll_events(&mut self, out: &mut Vec<HostEvent>);

    /// Present the frame rendered through the capability table.
    fn present(&mut self);

    /// The capability table this platform exposes to application modules.
    fn capabilities(&self) -> CapabilityTable;
}
