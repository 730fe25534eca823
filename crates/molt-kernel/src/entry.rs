//! Entry-point contract between the host and loadable modules.
//!
//! Symbol names and C-linkage signatures are fixed and versioned. A module
//! must export every required symbol for its kind; optional symbols it does
//! not export simply disable the corresponding behavior category.

use crate::arena::ArenaBlock;
use crate::capability::CapabilityTable;
use crate::raw::RawEvent;
use std::os::raw::c_char;

/// Bumped whenever a signature or symbol in this contract changes shape.
pub const ENTRY_POINT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Application module — required
// ---------------------------------------------------------------------------

pub const APP_INIT: &str = "app_init";
pub const APP_UPDATE: &str = "app_update";
pub const APP_RENDER: &str = "app_render";

/// Called once after every load (initial or reload), with the pointer-stable
/// arena and the current capability table. Reattachment to prior state is the
/// module's responsibility (sentinel check at the front of the arena).
pub type AppInitFn = unsafe extern "C" fn(
    arena: ArenaBlock,
    capabilities: CapabilityTable,
    viewport_w: u32,
    viewport_h: u32,
);
pub type AppUpdateFn = unsafe extern "C" fn(dt_seconds: f32);
pub type AppRenderFn = unsafe extern "C" fn();

// ---------------------------------------------------------------------------
// Application module — optional
// ---------------------------------------------------------------------------

pub const APP_TEARDOWN: &str = "app_teardown";
pub const APP_LOW_MEMORY: &str = "app_low_memory";
pub const APP_WINDOW_SHOWN: &str = "app_window_shown";
pub const APP_WINDOW_MOVED: &str = "app_window_moved";
pub const APP_WINDOW_RESIZED: &str = "app_window_resized";
pub const APP_WINDOW_MIN_MAXED: &str = "app_window_min_maxed";
pub const APP_WINDOW_HOVERED: &str = "app_window_hovered";
pub const APP_WINDOW_FOCUSED: &str = "app_window_focused";
pub const APP_WINDOW_CLOSED: &str = "app_window_closed";
pub const APP_KEYBOARD: &str = "app_keyboard";
pub const APP_MOUSE_MOTION: &str = "app_mouse_motion";
pub const APP_MOUSE_BUTTON: &str = "app_mouse_button";
pub const APP_MOUSE_WHEEL: &str = "app_mouse_wheel";
pub const APP_JOY_DEVICE: &str = "app_joy_device";
pub const APP_JOY_BUTTON: &str = "app_joy_button";
pub const APP_JOY_AXIS: &str = "app_joy_axis";
pub const APP_JOY_HAT: &str = "app_joy_hat";
pub const APP_JOY_BALL: &str = "app_joy_ball";
pub const APP_CONTROLLER_DEVICE: &str = "app_controller_device";
pub const APP_CONTROLLER_BUTTON: &str = "app_controller_button";
pub const APP_CONTROLLER_AXIS: &str = "app_controller_axis";
pub const APP_CONTROLLER_TOUCHPAD: &str = "app_controller_touchpad";
pub const APP_CONTROLLER_SENSOR: &str = "app_controller_sensor";
pub const APP_AUDIO_DEVICE: &str = "app_audio_device";
pub const APP_CHANNEL_FINISHED: &str = "app_channel_finished";
pub const APP_MUSIC_FINISHED: &str = "app_music_finished";
pub const APP_TOUCH_FINGER: &str = "app_touch_finger";
pub const APP_DROP: &str = "app_drop";
pub const APP_SENSOR: &str = "app_sensor";
pub const APP_USER_EVENT: &str = "app_user_event";

pub type AppTeardownFn = unsafe extern "C" fn();
pub type AppLowMemoryFn = unsafe extern "C" fn();
pub type AppWindowShownFn = unsafe extern "C" fn(window: u32, visible: u8);
pub type AppWindowMovedFn = unsafe extern "C" fn(window: u32, x: i32, y: i32);
pub type AppWindowResizedFn = unsafe extern "C" fn(window: u32, width: i32, height: i32);
pub type AppWindowMinMaxedFn = unsafe extern "C" fn(window: u32, maximized: u8);
pub type AppWindowHoveredFn = unsafe extern "C" fn(window: u32, entered: u8);
pub type AppWindowFocusedFn = unsafe extern "C" fn(window: u32, gained: u8);
pub type AppWindowClosedFn = unsafe extern "C" fn(window: u32);
pub type AppKeyboardFn = unsafe extern "C" fn(window: u32, state: u8, repeat: u8, scancode: u8);
pub type AppMouseMotionFn =
    unsafe extern "C" fn(window: u32, device: u32, x: i32, y: i32, dx: i32, dy: i32);
pub type AppMouseButtonFn = unsafe extern "C" fn(
    window: u32,
    device: u32,
    button: u8,
    state: u8,
    clicks: u8,
    x: i32,
    y: i32,
);
pub type AppMouseWheelFn =
    unsafe extern "C" fn(window: u32, device: u32, x: i32, y: i32, direction: u8);
pub type AppJoyDeviceFn = unsafe extern "C" fn(device: u32, change: u8);
pub type AppJoyButtonFn = unsafe extern "C" fn(device: u32, button: u8, state: u8);
pub type AppJoyAxisFn = unsafe extern "C" fn(device: u32, axis: u8, value: i16);
pub type AppJoyHatFn = unsafe extern "C" fn(device: u32, hat: u8, value: u8);
pub type AppJoyBallFn = unsafe extern "C" fn(device: u32, ball: u8, dx: i16, dy: i16);
pub type AppControllerDeviceFn = unsafe extern "C" fn(device: u32, change: u8);
pub type AppControllerButtonFn = unsafe extern "C" fn(device: u32, button: u8, state: u8);
pub type AppControllerAxisFn = unsafe extern "C" fn(device: u32, axis: u8, value: i16);
pub type AppControllerTouchpadFn =
    unsafe extern "C" fn(device: u32, phase: u8, finger: i32, x: f32, y: f32, pressure: f32);
pub type AppControllerSensorFn =
    unsafe extern "C" fn(device: u32, sensor: i8, data: *const f32, len: u8);
pub type AppAudioDeviceFn = unsafe extern "C" fn(device: u32, change: u8, capture: u8);
pub type AppChannelFinishedFn = unsafe extern "C" fn(channel: u32);
pub type AppMusicFinishedFn = unsafe extern "C" fn();
pub type AppTouchFingerFn = unsafe extern "C" fn(
    window: u32,
    touch: i64,
    finger: i64,
    phase: u8,
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
    pressure: f32,
);
pub type AppDropFn = unsafe extern "C" fn(window: u32, kind: u8, text: *const c_char);
pub type AppSensorFn = unsafe extern "C" fn(device: u32, sensor: i8, data: *const f32, len: u8);
pub type AppUserEventFn = unsafe extern "C" fn(window: u32, kind: u32, code: i32);

// ---------------------------------------------------------------------------
// Platform-services module
// ---------------------------------------------------------------------------

pub const PLATFORM_INIT: &str = "platform_init";
pub const PLATFORM_POLL_EVENTS: &str = "platform_poll_events";
pub const PLATFORM_PRESENT: &str = "platform_present";
pub const PLATFORM_CAPABILITIES: &str = "platform_capabilities";
pub const PLATFORM_TEARDOWN: &str = "platform_teardown";

pub type PlatformInitFn =
    unsafe extern "C" fn(arena: ArenaBlock, viewport_w: u32, viewport_h: u32);
/// Fill `out` with up to `capacity` pending events; returns the count
/// written. The host keeps calling until a batch comes back short.
pub type PlatformPollEventsFn =
    unsafe extern "C" fn(out: *mut RawEvent, capacity: usize) -> usize;
pub type PlatformPresentFn = unsafe extern "C" fn();
pub type PlatformCapabilitiesFn = unsafe extern "C" fn() -> CapabilityTable;
pub type PlatformTeardownFn = unsafe extern "C" fn();

/// Required symbols per module kind, for diagnostics and tooling.
pub const APP_REQUIRED: &[&str] = &[APP_INIT, APP_UPDATE, APP_RENDER];
/// See [`APP_REQUIRED`].
pub const PLATFORM_REQUIRED: &[&str] = &[
    PLATFORM_INIT,
    PLATFORM_POLL_EVENTS,
    PLATFORM_PRESENT,
    PLATFORM_CAPABILITIES,
];
