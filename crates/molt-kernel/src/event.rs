//! Host-level event taxonomy.
//!
//! Events arrive from the platform collaborator in production order and are
//! forwarded by the host's dispatcher, one category at a time, to whichever
//! optional entry points the currently loaded module implements. The set of
//! categories is closed; anything a platform produces outside it is dropped
//! at the decoding boundary.

/// Identifier of a window, as assigned by the platform.
pub type WindowId = u32;
/// Identifier of an input or audio device, as assigned by the platform.
pub type DeviceId = u32;

/// Press state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

impl ButtonState {
    /// Wire encoding used across the module ABI (pressed = 1).
    pub fn as_raw(self) -> u8 {
        match self {
            ButtonState::Pressed => 1,
            ButtonState::Released => 0,
        }
    }
}

/// Device arrival or removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceChange {
    Added,
    Removed,
}

impl DeviceChange {
    /// Wire encoding used across the module ABI (added = 1).
    pub fn as_raw(self) -> u8 {
        match self {
            DeviceChange::Added => 1,
            DeviceChange::Removed => 0,
        }
    }
}

/// Scroll wheel orientation reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Normal,
    Flipped,
}

impl WheelDirection {
    pub fn as_raw(self) -> u8 {
        match self {
            WheelDirection::Normal => 0,
            WheelDirection::Flipped => 1,
        }
    }
}

/// Phase of a touch contact (finger or controller touchpad).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Up,
    Motion,
}

impl TouchPhase {
    pub fn as_raw(self) -> u8 {
        match self {
            TouchPhase::Down => 0,
            TouchPhase::Up => 1,
            TouchPhase::Motion => 2,
        }
    }
}

/// Kind of sensor attached to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Unknown,
    Accelerometer,
    Gyroscope,
}

impl SensorKind {
    pub fn as_raw(self) -> i8 {
        match self {
            SensorKind::Unknown => 0,
            SensorKind::Accelerometer => 1,
            SensorKind::Gyroscope => 2,
        }
    }

    pub fn from_raw(raw: i8) -> Self {
        match raw {
            1 => SensorKind::Accelerometer,
            2 => SensorKind::Gyroscope,
            _ => SensorKind::Unknown,
        }
    }
}

/// Window lifecycle changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Shown,
    Hidden,
    Moved { x: i32, y: i32 },
    Resized { width: i32, height: i32 },
    Minimized,
    Maximized,
    MouseEntered,
    MouseLeft,
    FocusGained,
    FocusLost,
    Closed,
}

/// Payload of a drag-and-drop sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum DropPayload {
    Begin,
    File(String),
    Text(String),
    Complete,
}

impl DropPayload {
    /// Wire encoding used across the module ABI.
    pub fn kind_raw(&self) -> u8 {
        match self {
            DropPayload::Complete => 0,
            DropPayload::Begin => 1,
            DropPayload::File(_) => 2,
            DropPayload::Text(_) => 3,
        }
    }
}

/// A host-level event, tagged by category.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Window {
        window: WindowId,
        event: WindowEvent,
    },
    Keyboard {
        window: WindowId,
        state: ButtonState,
        repeat: bool,
        scancode: u8,
    },
    MouseMotion {
        window: WindowId,
        device: DeviceId,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
    },
    MouseButton {
        window: WindowId,
        device: DeviceId,
        button: u8,
        state: ButtonState,
        clicks: u8,
        x: i32,
        y: i32,
    },
    MouseWheel {
        window: WindowId,
        device: DeviceId,
        x: i32,
        y: i32,
        direction: WheelDirection,
    },
    JoyDevice {
        device: DeviceId,
        change: DeviceChange,
    },
    JoyButton {
        device: DeviceId,
        button: u8,
        state: ButtonState,
    },
    JoyAxis {
        device: DeviceId,
        axis: u8,
        value: i16,
    },
    JoyHat {
        device: DeviceId,
        hat: u8,
        value: u8,
    },
    JoyBall {
        device: DeviceId,
        ball: u8,
        dx: i16,
        dy: i16,
    },
    ControllerDevice {
        device: DeviceId,
        change: DeviceChange,
    },
    ControllerButton {
        device: DeviceId,
        button: u8,
        state: ButtonState,
    },
    ControllerAxis {
        device: DeviceId,
        axis: u8,
        value: i16,
    },
    ControllerTouchpad {
        device: DeviceId,
        phase: TouchPhase,
        finger: i32,
        x: f32,
        y: f32,
        pressure: f32,
    },
    ControllerSensor {
        device: DeviceId,
        sensor: SensorKind,
        data: [f32; 6],
    },
    AudioDevice {
        device: DeviceId,
        change: DeviceChange,
        capture: bool,
    },
    ChannelFinished {
        channel: u32,
    },
    MusicFinished,
    TouchFinger {
        window: WindowId,
        touch: i64,
        finger: i64,
        phase: TouchPhase,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        pressure: f32,
    },
    Drop {
        window: WindowId,
        payload: DropPayload,
    },
    Sensor {
        device: DeviceId,
        sensor: SensorKind,
        data: [f32; 6],
    },
    User {
        window: WindowId,
        kind: u32,
        code: i32,
    },
    LowMemory,
    Quit,
}
