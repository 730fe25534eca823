//! Event dispatch.
//!
//! Forwards host-level events, by category and in production order, to the
//! currently loaded application module. A category the module does not
//! implement falls through the interface's default no-op body — the event is
//! silently dropped, which is the expected outcome, not an error. Dispatch is
//! synchronous and happens before the frame's fixed-step update; the reload
//! coordinator runs after dispatch, so within a frame every event targets the
//! descriptor that was current when event processing began.

use molt_kernel::{AppHooks, HostEvent, WindowEvent};
use tracing::debug;

/// Whether the frame loop should keep running after a dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDisposition {
    Continue,
    /// A platform-level quit event was seen; this is the only clean
    /// termination path.
    Quit,
}

/// Forwards events to the module's per-category hooks.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    dispatched: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events forwarded since startup (quit events included).
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Dispatch one frame's worth of events, draining `events` in order.
    ///
    /// Stops at the first quit event; anything still queued behind it is
    /// discarded, as the process is on its way out.
    pub fn dispatch_frame(
        &mut self,
        events: &mut Vec<HostEvent>,
        hooks: &mut dyn AppHooks,
    ) -> FrameDisposition {
        for event in events.drain(..) {
            if self.dispatch(event, hooks) == FrameDisposition::Quit {
                return FrameDisposition::Quit;
            }
        }
        FrameDisposition::Continue
    }

    /// Dispatch a single event to its category hook.
    pub fn dispatch(&mut self, event: HostEvent, hooks: &mut dyn AppHooks) -> FrameDisposition {
        self.dispatched += 1;
        match event {
            HostEvent::Quit => {
                debug!("quit event");
                return FrameDisposition::Quit;
            }
            HostEvent::LowMemory => hooks.low_memory(),
            HostEvent::Window { window, event } => match event {
                WindowEvent::Shown => hooks.window_shown(window, true),
                WindowEvent::Hidden => hooks.window_shown(window, false),
                WindowEvent::Moved { x, y } => hooks.window_moved(window, x, y),
                WindowEvent::Resized { width, height } => {
                    hooks.window_resized(window, width, height)
                }
                WindowEvent::Maximized => hooks.window_min_maxed(window, true),
                WindowEvent::Minimized => hooks.window_min_maxed(window, false),
                WindowEvent::MouseEntered => hooks.window_hovered(window, true),
                WindowEvent::MouseLeft => hooks.window_hovered(window, false),
                WindowEvent::FocusGained => hooks.window_focused(window, true),
                WindowEvent::FocusLost => hooks.window_focused(window, false),
                WindowEvent::Closed => hooks.window_closed(window),
            },
            HostEvent::Keyboard {
                window,
                state,
                repeat,
                scancode,
            } => hooks.keyboard(window, state, repeat, scancode),
            HostEvent::MouseMotion {
                window,
                device,
                x,
                y,
                dx,
                dy,
            } => hooks.mouse_motion(window, device, x, y, dx, dy),
            HostEvent::MouseButton {
                window,
                device,
                button,
                state,
                clicks,
                x,
                y,
            } => hooks.mouse_button(window, device, button, state, clicks, x, y),
            HostEvent::MouseWheel {
                window,
                device,
                x,
                y,
                direction,
            } => hooks.mouse_wheel(window, device, x, y, direction),
            HostEvent::JoyDevice { device, change } => hooks.joy_device(device, change),
            HostEvent::JoyButton {
                device,
                button,
                state,
            } => hooks.joy_button(device, button, state),
            HostEvent::JoyAxis {
                device,
                axis,
                value,
            } => hooks.joy_axis(device, axis, value),
            HostEvent::JoyHat { device, hat, value } => hooks.joy_hat(device, hat, value),
            HostEvent::JoyBall {
                device,
                ball,
                dx,
                dy,
            } => hooks.joy_ball(device, ball, dx, dy),
            HostEvent::ControllerDevice { device, change } => {
                hooks.controller_device(device, change)
            }
            HostEvent::ControllerButton {
                device,
                button,
                state,
            } => hooks.controller_button(device, button, state),
            HostEvent::ControllerAxis {
                device,
                axis,
                value,
            } => hooks.controller_axis(device, axis, value),
            HostEvent::ControllerTouchpad {
                device,
                phase,
                finger,
                x,
                y,
                pressure,
            } => hooks.controller_touchpad(device, phase, finger, x, y, pressure),
            HostEvent::ControllerSensor {
                device,
                sensor,
                data,
            } => hooks.controller_sensor(device, sensor, &data),
            HostEvent::AudioDevice {
                device,
                change,
                capture,
            } => hooks.audio_device(device, change, capture),
            HostEvent::ChannelFinished { channel } => hooks.channel_finished(channel),
            HostEvent::MusicFinished => hooks.music_finished(),
            HostEvent::TouchFinger {
                window,
                touch,
                finger,
                phase,
                x,
                y,
                dx,
                dy,
                pressure,
            } => hooks.touch_finger(window, touch, finger, phase, x, y, dx, dy, pressure),
            HostEvent::Drop { window, payload } => hooks.dropped(window, &payload),
            HostEvent::Sensor {
                device,
                sensor,
                data,
            } => hooks.sensor(device, sensor, &data),
            HostEvent::User { window, kind, code } => hooks.user_event(window, kind, code),
        }
        FrameDisposition::Continue
    }
}
