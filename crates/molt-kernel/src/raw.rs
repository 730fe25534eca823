//! C-ABI wire form of host events.
//!
//! A dynamically loaded platform module reports its per-frame event batch as
//! an array of [`RawEvent`] records; the host decodes them into
//! [`HostEvent`]s before dispatch. Records with an unknown kind code decode
//! to `None` and are dropped at the boundary.

use crate::event::{
    ButtonState, DeviceChange, DropPayload, HostEvent, SensorKind, TouchPhase, WheelDirection,
    WindowEvent,
};
use bytemuck::{Pod, Zeroable};

pub const KIND_QUIT: u32 = 0x100;
pub const KIND_LOW_MEMORY: u32 = 0x102;

pub const KIND_WINDOW_SHOWN: u32 = 0x200;
pub const KIND_WINDOW_HIDDEN: u32 = 0x201;
pub const KIND_WINDOW_MOVED: u32 = 0x202;
pub const KIND_WINDOW_RESIZED: u32 = 0x203;
pub const KIND_WINDOW_MINIMIZED: u32 = 0x204;
pub const KIND_WINDOW_MAXIMIZED: u32 = 0x205;
pub const KIND_WINDOW_ENTER: u32 = 0x206;
pub const KIND_WINDOW_LEAVE: u32 = 0x207;
pub const KIND_WINDOW_FOCUS_GAINED: u32 = 0x208;
pub const KIND_WINDOW_FOCUS_LOST: u32 = 0x209;
pub const KIND_WINDOW_CLOSED: u32 = 0x20a;

pub const KIND_KEY_DOWN: u32 = 0x300;
pub const KIND_KEY_UP: u32 = 0x301;

pub const KIND_MOUSE_MOTION: u32 = 0x400;
pub const KIND_MOUSE_BUTTON_DOWN: u32 = 0x401;
pub const KIND_MOUSE_BUTTON_UP: u32 = 0x402;
pub const KIND_MOUSE_WHEEL: u32 = 0x403;

pub const KIND_JOY_AXIS: u32 = 0x600;
pub const KIND_JOY_BALL: u32 = 0x601;
pub const KIND_JOY_HAT: u32 = 0x602;
pub const KIND_JOY_BUTTON_DOWN: u32 = 0x603;
pub const KIND_JOY_BUTTON_UP: u32 = 0x604;
pub const KIND_JOY_ADDED: u32 = 0x605;
pub const KIND_JOY_REMOVED: u32 = 0x606;

pub const KIND_CONTROLLER_AXIS: u32 = 0x650;
pub const KIND_CONTROLLER_BUTTON_DOWN: u32 = 0x651;
pub const KIND_CONTROLLER_BUTTON_UP: u32 = 0x652;
pub const KIND_CONTROLLER_ADDED: u32 = 0x653;
pub const KIND_CONTROLLER_REMOVED: u32 = 0x654;
pub const KIND_CONTROLLER_TOUCHPAD_DOWN: u32 = 0x656;
pub const KIND_CONTROLLER_TOUCHPAD_MOTION: u32 = 0x657;
pub const KIND_CONTROLLER_TOUCHPAD_UP: u32 = 0x658;
pub const KIND_CONTROLLER_SENSOR: u32 = 0x659;

pub const KIND_FINGER_DOWN: u32 = 0x700;
pub const KIND_FINGER_UP: u32 = 0x701;
pub const KIND_FINGER_MOTION: u32 = 0x702;

pub const KIND_DROP_FILE: u32 = 0x1000;
pub const KIND_DROP_TEXT: u32 = 0x1001;
pub const KIND_DROP_BEGIN: u32 = 0x1002;
pub const KIND_DROP_COMPLETE: u32 = 0x1003;

pub const KIND_AUDIO_ADDED: u32 = 0x1100;
pub const KIND_AUDIO_REMOVED: u32 = 0x1101;

pub const KIND_SENSOR: u32 = 0x1200;

pub const KIND_CHANNEL_FINISHED: u32 = 0x1300;
pub const KIND_MUSIC_FINISHED: u32 = 0x1301;

pub const KIND_USER: u32 = 0x8000;

/// Capacity of the inline text buffer (drop payloads). Longer payloads are
/// truncated by the producer.
pub const RAW_TEXT_CAPACITY: usize = 256;

/// Flattened, fixed-size event record. Field meaning depends on `kind`; the
/// layout has no padding so batches can cross the module boundary as plain
/// byte arrays.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawEvent {
    pub kind: u32,
    pub window: u32,
    pub device: u32,
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
    pub fx: f32,
    pub fy: f32,
    pub fz: f32,
    pub fw: f32,
    pub fv: f32,
    pub data: [f32; 6],
    pub ext: i64,
    pub ext2: i64,
    pub text: [u8; RAW_TEXT_CAPACITY],
}

impl RawEvent {
    /// An all-zero record (kind 0 decodes to `None`).
    pub fn empty() -> Self {
        Zeroable::zeroed()
    }

    fn with_kind(kind: u32) -> Self {
        let mut event = Self::empty();
        event.kind = kind;
        event
    }

    /// Store a NUL-terminated text payload, truncating to the buffer.
    pub fn set_text(&mut self, text: &str) {
        let bytes = text.as_bytes();
        let len = bytes.len().min(RAW_TEXT_CAPACITY - 1);
        self.text[..len].copy_from_slice(&bytes[..len]);
        self.text[len] = 0;
    }

    /// Read the text payload up to its NUL terminator.
    pub fn text_str(&self) -> String {
        let end = self
            .text
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(RAW_TEXT_CAPACITY);
        String::from_utf8_lossy(&self.text[..end]).into_owned()
    }

    /// Encode a host event into its wire form.
    pub fn encode(event: &HostEvent) -> Self {
        use HostEvent::*;
        match event {
            Quit => Self::with_kind(KIND_QUIT),
            LowMemory => Self::with_kind(KIND_LOW_MEMORY),
            Window { window, event } => {
                let (kind, a, b) = match *event {
                    WindowEvent::Shown => (KIND_WINDOW_SHOWN, 0, 0),
                    WindowEvent::Hidden => (KIND_WINDOW_HIDDEN, 0, 0),
                    WindowEvent::Moved { x, y } => (KIND_WINDOW_MOVED, x, y),
                    WindowEvent::Resized { width, height } => (KIND_WINDOW_RESIZED, width, height),
                    WindowEvent::Minimized => (KIND_WINDOW_MINIMIZED, 0, 0),
                    WindowEvent::Maximized => (KIND_WINDOW_MAXIMIZED, 0, 0),
                    WindowEvent::MouseEntered => (KIND_WINDOW_ENTER, 0, 0),
                    WindowEvent::MouseLeft => (KIND_WINDOW_LEAVE, 0, 0),
                    WindowEvent::FocusGained => (KIND_WINDOW_FOCUS_GAINED, 0, 0),
                    WindowEvent::FocusLost => (KIND_WINDOW_FOCUS_LOST, 0, 0),
                    WindowEvent::Closed => (KIND_WINDOW_CLOSED, 0, 0),
                };
                let mut raw = Self::with_kind(kind);
                raw.window = *window;
                raw.a = a;
                raw.b = b;
                raw
            }
            Keyboard {
                window,
                state,
                repeat,
                scancode,
            } => {
                let kind = match state {
                    ButtonState::Pressed => KIND_KEY_DOWN,
                    ButtonState::Released => KIND_KEY_UP,
                };
                let mut raw = Self::with_kind(kind);
                raw.window = *window;
                raw.a = *repeat as i32;
                raw.b = *scancode as i32;
                raw
            }
            MouseMotion {
                window,
                device,
                x,
                y,
                dx,
                dy,
            } => {
                let mut raw = Self::with_kind(KIND_MOUSE_MOTION);
                raw.window = *window;
                raw.device = *device;
                raw.a = *x;
                raw.b = *y;
                raw.c = *dx;
                raw.d = *dy;
                raw
            }
            MouseButton {
                window,
                device,
                button,
                state,
                clicks,
                x,
                y,
            } => {
                let kind = match state {
                    ButtonState::Pressed => KIND_MOUSE_BUTTON_DOWN,
                    ButtonState::Released => KIND_MOUSE_BUTTON_UP,
                };
                let mut raw = Self::with_kind(kind);
                raw.window = *window;
                raw.device = *device;
                raw.a = *button as i32;
                raw.b = *clicks as i32;
                raw.c = *x;
                raw.d = *y;
                raw
            }
            MouseWheel {
                window,
                device,
                x,
                y,
                direction,
            } => {
                let mut raw = Self::with_kind(KIND_MOUSE_WHEEL);
                raw.window = *window;
                raw.device = *device;
                raw.a = *x;
                raw.b = *y;
                raw.c = direction.as_raw() as i32;
                raw
            }
            JoyDevice { device, change } => {
                let kind = match change {
                    DeviceChange::Added => KIND_JOY_ADDED,
                    DeviceChange::Removed => KIND_JOY_REMOVED,
                };
                let mut raw = Self::with_kind(kind);
                raw.device = *device;
                raw
            }
            JoyButton {
                device,
                button,
                state,
            } => {
                let kind = match state {
                    ButtonState::Pressed => KIND_JOY_BUTTON_DOWN,
                    ButtonState::Released => KIND_JOY_BUTTON_UP,
                };
                let mut raw = Self::with_kind(kind);
                raw.device = *device;
                raw.a = *button as i32;
                raw
            }
            JoyAxis {
                device,
                axis,
                value,
            } => {
                let mut raw = Self::with_kind(KIND_JOY_AXIS);
                raw.device = *device;
                raw.a = *axis as i32;
                raw.b = *value as i32;
                raw
            }
            JoyHat { device, hat, value } => {
                let mut raw = Self::with_kind(KIND_JOY_HAT);
                raw.device = *device;
                raw.a = *hat as i32;
                raw.b = *value as i32;
                raw
            }
            JoyBall {
                device,
                ball,
                dx,
                dy,
            } => {
                let mut raw = Self::with_kind(KIND_JOY_BALL);
                raw.device = *device;
                raw.a = *ball as i32;
                raw.b = *dx as i32;
                raw.c = *dy as i32;
                raw
            }
            ControllerDevice { device, change } => {
                let kind = match change {
                    DeviceChange::Added => KIND_CONTROLLER_ADDED,
                    DeviceChange::Removed => KIND_CONTROLLER_REMOVED,
                };
                let mut raw = Self::with_kind(kind);
                raw.device = *device;
                raw
            }
            ControllerButton {
                device,
                button,
                state,
            } => {
                let kind = match state {
                    ButtonState::Pressed => KIND_CONTROLLER_BUTTON_DOWN,
                    ButtonState::Released => KIND_CONTROLLER_BUTTON_UP,
                };
                let mut raw = Self::with_kind(kind);
                raw.device = *device;
                raw.a = *button as i32;
                raw
            }
            ControllerAxis {
                device,
                axis,
                value,
            } => {
                let mut raw = Self::with_kind(KIND_CONTROLLER_AXIS);
                raw.device = *device;
                raw.a = *axis as i32;
                raw.b = *value as i32;
                raw
            }
            ControllerTouchpad {
                device,
                phase,
                finger,
                x,
                y,
                pressure,
            } => {
                let kind = match phase {
                    TouchPhase::Down => KIND_CONTROLLER_TOUCHPAD_DOWN,
                    TouchPhase::Up => KIND_CONTROLLER_TOUCHPAD_UP,
                    TouchPhase::Motion => KIND_CONTROLLER_TOUCHPAD_MOTION,
                };
                let mut raw = Self::with_kind(kind);
                raw.device = *device;
                raw.a = *finger;
                raw.fx = *x;
                raw.fy = *y;
                raw.fz = *pressure;
                raw
            }
            ControllerSensor {
                device,
                sensor,
                data,
            } => {
                let mut raw = Self::with_kind(KIND_CONTROLLER_SENSOR);
                raw.device = *device;
                raw.a = sensor.as_raw() as i32;
                raw.data = *data;
                raw
            }
            AudioDevice {
                device,
                change,
                capture,
            } => {
                let kind = match change {
                    DeviceChange::Added => KIND_AUDIO_ADDED,
                    DeviceChange::Removed => KIND_AUDIO_REMOVED,
                };
                let mut raw = Self::with_kind(kind);
                raw.device = *device;
                raw.a = *capture as i32;
                raw
            }
            ChannelFinished { channel } => {
                let mut raw = Self::with_kind(KIND_CHANNEL_FINISHED);
                raw.a = *channel as i32;
                raw
            }
            MusicFinished => Self::with_kind(KIND_MUSIC_FINISHED),
            TouchFinger {
                window,
                touch,
                finger,
                phase,
                x,
                y,
                dx,
                dy,
                pressure,
            } => {
                let kind = match phase {
                    TouchPhase::Down => KIND_FINGER_DOWN,
                    TouchPhase::Up => KIND_FINGER_UP,
                    TouchPhase::Motion => KIND_FINGER_MOTION,
                };
                let mut raw = Self::with_kind(kind);
                raw.window = *window;
                raw.ext = *touch;
                raw.ext2 = *finger;
                raw.fx = *x;
                raw.fy = *y;
                raw.fz = *dx;
                raw.fw = *dy;
                raw.fv = *pressure;
                raw
            }
            Drop { window, payload } => {
                let kind = match payload {
                    DropPayload::File(_) => KIND_DROP_FILE,
                    DropPayload::Text(_) => KIND_DROP_TEXT,
                    DropPayload::Begin => KIND_DROP_BEGIN,
                    DropPayload::Complete => KIND_DROP_COMPLETE,
                };
                let mut raw = Self::with_kind(kind);
                raw.window = *window;
                match payload {
                    DropPayload::File(text) | DropPayload::Text(text) => raw.set_text(text),
                    _ => {}
                }
                raw
            }
            Sensor {
                device,
                sensor,
                data,
            } => {
                let mut raw = Self::with_kind(KIND_SENSOR);
                raw.device = *device;
                raw.a = sensor.as_raw() as i32;
                raw.data = *data;
                raw
            }
            User { window, kind, code } => {
                let mut raw = Self::with_kind(KIND_USER);
                raw.window = *window;
                raw.ext = *kind as i64;
                raw.a = *code;
                raw
            }
        }
    }

    /// Decode the wire form back into a host event. Unknown kind codes yield
    /// `None` and are dropped by the caller.
    pub fn decode(&self) -> Option<HostEvent> {
        let event = match self.kind {
            KIND_QUIT => HostEvent::Quit,
            KIND_LOW_MEMORY => HostEvent::LowMemory,
            KIND_WINDOW_SHOWN => self.window_event(WindowEvent::Shown),
            KIND_WINDOW_HIDDEN => self.window_event(WindowEvent::Hidden),
            KIND_WINDOW_MOVED => self.window_event(WindowEvent::Moved {
                x: self.a,
                y: self.b,
            }),
            KIND_WINDOW_RESIZED => self.window_event(WindowEvent::Resized {
                width: self.a,
                height: self.b,
            }),
            KIND_WINDOW_MINIMIZED => self.window_event(WindowEvent::Minimized),
            KIND_WINDOW_MAXIMIZED => self.window_event(WindowEvent::Maximized),
            KIND_WINDOW_ENTER => self.window_event(WindowEvent::MouseEntered),
            KIND_WINDOW_LEAVE => self.window_event(WindowEvent::MouseLeft),
            KIND_WINDOW_FOCUS_GAINED => self.window_event(WindowEvent::FocusGained),
            KIND_WINDOW_FOCUS_LOST => self.window_event(WindowEvent::FocusLost),
            KIND_WINDOW_CLOSED => self.window_event(WindowEvent::Closed),
            KIND_KEY_DOWN | KIND_KEY_UP => HostEvent::Keyboard {
                window: self.window,
                state: if self.kind == KIND_KEY_DOWN {
                    ButtonState::Pressed
                } else {
                    ButtonState::Released
                },
                repeat: self.a != 0,
                scancode: self.b as u8,
            },
            KIND_MOUSE_MOTION => HostEvent::MouseMotion {
                window: self.window,
                device: self.device,
                x: self.a,
                y: self.b,
                dx: self.c,
                dy: self.d,
            },
            KIND_MOUSE_BUTTON_DOWN | KIND_MOUSE_BUTTON_UP => HostEvent::MouseButton {
                window: self.window,
                device: self.device,
                button: self.a as u8,
                state: if self.kind == KIND_MOUSE_BUTTON_DOWN {
                    ButtonState::Pressed
                } else {
                    ButtonState::Released
                },
                clicks: self.b as u8,
                x: self.c,
                y: self.d,
            },
            KIND_MOUSE_WHEEL => HostEvent::MouseWheel {
                window: self.window,
                device: self.device,
                x: self.a,
                y: self.b,
                direction: if self.c == 0 {
                    WheelDirection::Normal
                } else {
                    WheelDirection::Flipped
                },
            },
            KIND_JOY_ADDED | KIND_JOY_REMOVED => HostEvent::JoyDevice {
                device: self.device,
                change: if self.kind == KIND_JOY_ADDED {
                    DeviceChange::Added
                } else {
                    DeviceChange::Removed
                },
            },
            KIND_JOY_BUTTON_DOWN | KIND_JOY_BUTTON_UP => HostEvent::JoyButton {
                device: self.device,
                button: self.a as u8,
                state: if self.kind == KIND_JOY_BUTTON_DOWN {
                    ButtonState::Pressed
                } else {
                    ButtonState::Released
                },
            },
            KIND_JOY_AXIS => HostEvent::JoyAxis {
                device: self.device,
                axis: self.a as u8,
                value: self.b as i16,
            },
            KIND_JOY_HAT => HostEvent::JoyHat {
                device: self.device,
                hat: self.a as u8,
                value: self.b as u8,
            },
            KIND_JOY_BALL => HostEvent::JoyBall {
                device: self.device,
                ball: self.a as u8,
                dx: self.b as i16,
                dy: self.c as i16,
            },
            KIND_CONTROLLER_ADDED | KIND_CONTROLLER_REMOVED => HostEvent::ControllerDevice {
                device: self.device,
                change: if self.kind == KIND_CONTROLLER_ADDED {
                    DeviceChange::Added
                } else {
                    DeviceChange::Removed
                },
            },
            KIND_CONTROLLER_BUTTON_DOWN | KIND_CONTROLLER_BUTTON_UP => HostEvent::ControllerButton {
                device: self.device,
                button: self.a as u8,
                state: if self.kind == KIND_CONTROLLER_BUTTON_DOWN {
                    ButtonState::Pressed
                } else {
                    ButtonState::Released
                },
            },
            KIND_CONTROLLER_AXIS => HostEvent::ControllerAxis {
                device: self.device,
                axis: self.a as u8,
                value: self.b as i16,
            },
            KIND_CONTROLLER_TOUCHPAD_DOWN
            | KIND_CONTROLLER_TOUCHPAD_UP
            | KIND_CONTROLLER_TOUCHPAD_MOTION => HostEvent::ControllerTouchpad {
                device: self.device,
                phase: match self.kind {
                    KIND_CONTROLLER_TOUCHPAD_DOWN => TouchPhase::Down,
                    KIND_CONTROLLER_TOUCHPAD_UP => TouchPhase::Up,
                    _ => TouchPhase::Motion,
                },
                finger: self.a,
                x: self.fx,
                y: self.fy,
                pressure: self.fz,
            },
            KIND_CONTROLLER_SENSOR => HostEvent::ControllerSensor {
                device: self.device,
                sensor: SensorKind::from_raw(self.a as i8),
                data: self.data,
            },
            KIND_AUDIO_ADDED | KIND_AUDIO_REMOVED => HostEvent::AudioDevice {
                device: self.device,
                change: if self.kind == KIND_AUDIO_ADDED {
                    DeviceChange::Added
                } else {
                    DeviceChange::Removed
                },
                capture: self.a != 0,
            },
            KIND_CHANNEL_FINISHED => HostEvent::ChannelFinished {
                channel: self.a as u32,
            },
            KIND_MUSIC_FINISHED => HostEvent::MusicFinished,
            KIND_FINGER_DOWN | KIND_FINGER_UP | KIND_FINGER_MOTION => HostEvent::TouchFinger {
                window: self.window,
                touch: self.ext,
                finger: self.ext2,
                phase: match self.kind {
                    KIND_FINGER_DOWN => TouchPhase::Down,
                    KIND_FINGER_UP => TouchPhase::Up,
                    _ => TouchPhase::Motion,
                },
                x: self.fx,
                y: self.fy,
                dx: self.fz,
                dy: self.fw,
                pressure: self.fv,
            },
            KIND_DROP_FILE => HostEvent::Drop {
                window: self.window,
                payload: DropPayload::File(self.text_str()),
            },
            KIND_DROP_TEXT => HostEvent::Drop {
                window: self.window,
                payload: DropPayload::Text(self.text_str()),
            },
            KIND_DROP_BEGIN => HostEvent::Drop {
                window: self.window,
                payload: DropPayload::Begin,
            },
            KIND_DROP_COMPLETE => HostEvent::Drop {
                window: self.window,
                payload: DropPayload::Complete,
            },
            KIND_SENSOR => HostEvent::Sensor {
                device: self.device,
                sensor: SensorKind::from_raw(self.a as i8),
                data: self.data,
            },
            KIND_USER => HostEvent::User {
                window: self.window,
                kind: self.ext as u32,
                code: self.a,
            },
            _ => return None,
        };
        Some(event)
    }

    fn window_event(&self, event: WindowEvent) -> HostEvent {
        HostEvent::Window {
            window: self.window,
            event,
        }
    }
}
