//! Dynamic module loading and entry-point resolution.
//!
//! The loader opens a backing artifact, resolves the fixed entry-point set
//! for the module kind, and returns a descriptor wrapping a concrete
//! implementation of the module interface. Required symbols that fail to
//! resolve are a fatal, typed error naming the symbol and the artifact;
//! optional symbols that fail to resolve leave their slot empty, which is an
//! expected outcome, not an error. An artifact that cannot be opened at all
//! yields a vacant descriptor ("module not yet available").

use crate::watch;
use libloading::Library;
use molt_kernel::entry;
use molt_kernel::{
    AppHooks, ArenaBlock, ButtonState, CapabilityTable, DeviceChange, DeviceId, DropPayload,
    ModuleLifecycle, SensorKind, TouchPhase, WheelDirection, WindowId,
};
use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// Module load error types
#[derive(Debug, thiserror::Error)]
pub enum ModuleLoadError {
    #[error("required symbol `{symbol}` missing from {path:?}: {detail}")]
    MissingRequiredSymbol {
        symbol: String,
        path: PathBuf,
        detail: String,
    },

    #[error("module artifact not available: {0:?}")]
    ArtifactUnavailable(PathBuf),
}

/// Resolved entry points for a loaded module, plus load metadata.
///
/// `hooks` is `None` for a vacant descriptor (artifact not yet available) and
/// after [`clear`](Self::clear); when it is `Some`, every required slot is
/// non-null by construction of the concrete module type behind the box.
pub struct ModuleDescriptor<T: ?Sized> {
    hooks: Option<Box<T>>,
    path: Option<PathBuf>,
    last_modified: Option<SystemTime>,
    generation: u64,
}

impl<T: ?Sized> ModuleDescriptor<T> {
    /// Descriptor for an artifact that could not be opened.
    pub fn vacant(path: &Path) -> Self {
        Self {
            hooks: None,
            path: Some(path.to_path_buf()),
            last_modified: None,
            generation: 0,
        }
    }

    /// Descriptor for a successfully loaded artifact.
    pub fn loaded(
        path: &Path,
        hooks: Box<T>,
        last_modified: Option<SystemTime>,
        generation: u64,
    ) -> Self {
        Self {
            hooks: Some(hooks),
            path: Some(path.to_path_buf()),
            last_modified,
            generation,
        }
    }

    /// Descriptor for an in-process module with no backing artifact. Never
    /// watched, never reloaded.
    pub fn resident(hooks: Box<T>) -> Self {
        Self {
            hooks: Some(hooks),
            path: None,
            last_modified: None,
            generation: 0,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.hooks.is_some()
    }

    pub fn hooks(&self) -> Option<&T> {
        self.hooks.as_deref()
    }

    pub fn hooks_mut(&mut self) -> Option<&mut T> {
        self.hooks.as_deref_mut()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Artifact modification time captured at the moment of successful open.
    pub fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }

    /// Monotonic load counter stamped by the loader; distinguishes descriptor
    /// identities across reloads.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop the module instance (releasing its load handle) and leave every
    /// slot inert. Stale references see a vacant descriptor, never unloaded
    /// code.
    pub fn clear(&mut self) {
        self.hooks = None;
        self.last_modified = None;
    }
}

impl<T: ?Sized> std::fmt::Debug for ModuleDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("path", &self.path)
            .field("loaded", &self.is_loaded())
            .field("generation", &self.generation)
            .finish()
    }
}

/// The seam between the reload machinery and the artifact format.
///
/// Production loaders resolve shared libraries through `libloading`; tests
/// substitute scripted loaders producing in-process modules.
pub trait ArtifactLoader {
    type Module: ModuleLifecycle + ?Sized;

    /// Open `path` and resolve its entry points.
    ///
    /// An artifact that cannot be opened yields `Ok` with a vacant
    /// descriptor; a missing required symbol is an error.
    fn load(&mut self, path: &Path) -> Result<ModuleDescriptor<Self::Module>, ModuleLoadError>;

    /// Release the descriptor's load handle and zero its slots.
    fn unload(&mut self, descriptor: &mut ModuleDescriptor<Self::Module>);
}

pub(crate) fn required_symbol<T: Copy>(
    library: &Library,
    name: &str,
    path: &Path,
) -> Result<T, ModuleLoadError> {
    unsafe { library.get::<T>(name.as_bytes()) }
        .map(|symbol| *symbol)
        .map_err(|error| ModuleLoadError::MissingRequiredSymbol {
            symbol: name.to_string(),
            path: path.to_path_buf(),
            detail: error.to_string(),
        })
}

pub(crate) fn optional_symbol<T: Copy>(library: &Library, name: &str) -> Option<T> {
    unsafe { library.get::<T>(name.as_bytes()) }
        .ok()
        .map(|symbol| *symbol)
}

struct RequiredAppSlots {
    init: entry::AppInitFn,
    update: entry::AppUpdateFn,
    render: entry::AppRenderFn,
}

#[derive(Default)]
struct OptionalAppSlots {
    teardown: Option<entry::AppTeardownFn>,
    low_memory: Option<entry::AppLowMemoryFn>,
    window_shown: Option<entry::AppWindowShownFn>,
    window_moved: Option<entry::AppWindowMovedFn>,
    window_resized: Option<entry::AppWindowResizedFn>,
    window_min_maxed: Option<entry::AppWindowMinMaxedFn>,
    window_hovered: Option<entry::AppWindowHoveredFn>,
    window_focused: Option<entry::AppWindowFocusedFn>,
    window_closed: Option<entry::AppWindowClosedFn>,
    keyboard: Option<entry::AppKeyboardFn>,
    mouse_motion: Option<entry::AppMouseMotionFn>,
    mouse_button: Option<entry::AppMouseButtonFn>,
    mouse_wheel: Option<entry::AppMouseWheelFn>,
    joy_device: Option<entry::AppJoyDeviceFn>,
    joy_button: Option<entry::AppJoyButtonFn>,
    joy_axis: Option<entry::AppJoyAxisFn>,
    joy_hat: Option<entry::AppJoyHatFn>,
    joy_ball: Option<entry::AppJoyBallFn>,
    controller_device: Option<entry::AppControllerDeviceFn>,
    controller_button: Option<entry::AppControllerButtonFn>,
    controller_axis: Option<entry::AppControllerAxisFn>,
    controller_touchpad: Option<entry::AppControllerTouchpadFn>,
    controller_sensor: Option<entry::AppControllerSensorFn>,
    audio_device: Option<entry::AppAudioDeviceFn>,
    channel_finished: Option<entry::AppChannelFinishedFn>,
    music_finished: Option<entry::AppMusicFinishedFn>,
    touch_finger: Option<entry::AppTouchFingerFn>,
    drop: Option<entry::AppDropFn>,
    sensor: Option<entry::AppSensorFn>,
    user_event: Option<entry::AppUserEventFn>,
}

impl OptionalAppSlots {
    fn resolve(library: &Library) -> Self {
        Self {
            teardown: optional_symbol(library, entry::APP_TEARDOWN),
            low_memory: optional_symbol(library, entry::APP_LOW_MEMORY),
            window_shown: optional_symbol(library, entry::APP_WINDOW_SHOWN),
            window_moved: optional_symbol(library, entry::APP_WINDOW_MOVED),
            window_resized: optional_symbol(library, entry::APP_WINDOW_RESIZED),
            window_min_maxed: optional_symbol(library, entry::APP_WINDOW_MIN_MAXED),
            window_hovered: optional_symbol(library, entry::APP_WINDOW_HOVERED),
            window_focused: optional_symbol(library, entry::APP_WINDOW_FOCUSED),
            window_closed: optional_symbol(library, entry::APP_WINDOW_CLOSED),
            keyboard: optional_symbol(library, entry::APP_KEYBOARD),
            mouse_motion: optional_symbol(library, entry::APP_MOUSE_MOTION),
            mouse_button: optional_symbol(library, entry::APP_MOUSE_BUTTON),
            mouse_wheel: optional_symbol(library, entry::APP_MOUSE_WHEEL),
            joy_device: optional_symbol(library, entry::APP_JOY_DEVICE),
            joy_button: optional_symbol(library, entry::APP_JOY_BUTTON),
            joy_axis: optional_symbol(library, entry::APP_JOY_AXIS),
            joy_hat: optional_symbol(library, entry::APP_JOY_HAT),
            joy_ball: optional_symbol(library, entry::APP_JOY_BALL),
            controller_device: optional_symbol(library, entry::APP_CONTROLLER_DEVICE),
            controller_button: optional_symbol(library, entry::APP_CONTROLLER_BUTTON),
            controller_axis: optional_symbol(library, entry::APP_CONTROLLER_AXIS),
            controller_touchpad: optional_symbol(library, entry::APP_CONTROLLER_TOUCHPAD),
            controller_sensor: optional_symbol(library, entry::APP_CONTROLLER_SENSOR),
            audio_device: optional_symbol(library, entry::APP_AUDIO_DEVICE),
            channel_finished: optional_symbol(library, entry::APP_CHANNEL_FINISHED),
            music_finished: optional_symbol(library, entry::APP_MUSIC_FINISHED),
            touch_finger: optional_symbol(library, entry::APP_TOUCH_FINGER),
            drop: optional_symbol(library, entry::APP_DROP),
            sensor: optional_symbol(library, entry::APP_SENSOR),
            user_event: optional_symbol(library, entry::APP_USER_EVENT),
        }
    }

    fn resolved_count(&self) -> usize {
        [
            self.teardown.is_some(),
            self.low_memory.is_some(),
            self.window_shown.is_some(),
            self.window_moved.is_some(),
            self.window_resized.is_some(),
            self.window_min_maxed.is_some(),
            self.window_hovered.is_some(),
            self.window_focused.is_some(),
            self.window_closed.is_some(),
            self.keyboard.is_some(),
            self.mouse_motion.is_some(),
            self.mouse_button.is_some(),
            self.mouse_wheel.is_some(),
            self.joy_device.is_some(),
            self.joy_button.is_some(),
            self.joy_axis.is_some(),
            self.joy_hat.is_some(),
            self.joy_ball.is_some(),
            self.controller_device.is_some(),
            self.controller_button.is_some(),
            self.controller_axis.is_some(),
            self.controller_touchpad.is_some(),
            self.controller_sensor.is_some(),
            self.audio_device.is_some(),
            self.channel_finished.is_some(),
            self.music_finished.is_some(),
            self.touch_finger.is_some(),
            self.drop.is_some(),
            self.sensor.is_some(),
            self.user_event.is_some(),
        ]
        .iter()
        .filter(|resolved| **resolved)
        .count()
    }
}

/// A dynamically loaded application module.
///
/// Holds the library handle alongside the resolved entry points; the handle
/// is released (and the mapped code unmapped) when the module is dropped by
/// [`ModuleDescriptor::clear`].
pub struct DynamicAppModule {
    required: RequiredAppSlots,
    optional: OptionalAppSlots,
    _library: Library,
}

impl ModuleLifecycle for DynamicAppModule {
    fn teardown(&mut self) {
        if let Some(hook) = self.optional.teardown {
            unsafe { hook() }
        }
    }
}

impl AppHooks for DynamicAppModule {
    fn init(
        &mut self,
        arena: ArenaBlock,
        capabilities: &CapabilityTable,
        viewport_w: u32,
        viewport_h: u32,
    ) {
        unsafe { (self.required.init)(arena, *capabilities, viewport_w, viewport_h) }
    }

    fn update(&mut self, dt_seconds: f32) {
        unsafe { (self.required.update)(dt_seconds) }
    }

    fn render(&mut self) {
        unsafe { (self.required.render)() }
    }

    fn low_memory(&mut self) {
        if let Some(hook) = self.optional.low_memory {
            unsafe { hook() }
        }
    }

    fn window_shown(&mut self, window: WindowId, visible: bool) {
        if let Some(hook) = self.optional.window_shown {
            unsafe { hook(window, visible as u8) }
        }
    }

    fn window_moved(&mut self, window: WindowId, x: i32, y: i32) {
        if let Some(hook) = self.optional.window_moved {
            unsafe { hook(window, x, y) }
        }
    }

    fn window_resized(&mut self, window: WindowId, width: i32, height: i32) {
        if let Some(hook) = self.optional.window_resized {
            unsafe { hook(window, width, height) }
        }
    }

    fn window_min_maxed(&mut self, window: WindowId, maximized: bool) {
        if let Some(hook) = self.optional.window_min_maxed {
            unsafe { hook(window, maximized as u8) }
        }
    }

    fn window_hovered(&mut self, window: WindowId, entered: bool) {
        if let Some(hook) = self.optional.window_hovered {
            unsafe { hook(window, entered as u8) }
        }
    }

    fn window_focused(&mut self, window: WindowId, gained: bool) {
        if let Some(hook) = self.optional.window_focused {
            unsafe { hook(window, gained as u8) }
        }
    }

    fn window_closed(&mut self, window: WindowId) {
        if let Some(hook) = self.optional.window_closed {
            unsafe { hook(window) }
        }
    }

    fn keyboard(&mut self, window: WindowId, state: ButtonState, repeat: bool, scancode: u8) {
        if let Some(hook) = self.optional.keyboard {
            unsafe { hook(window, state.as_raw(), repeat as u8, scancode) }
        }
    }

    fn mouse_motion(
        &mut self,
        window: WindowId,
        device: DeviceId,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
    ) {
        if let Some(hook) = self.optional.mouse_motion {
            unsafe { hook(window, device, x, y, dx, dy) }
        }
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
        if let Some(hook) = self.optional.mouse_button {
            unsafe { hook(window, device, button, state.as_raw(), clicks, x, y) }
        }
    }

    fn mouse_wheel(
        &mut self,
        window: WindowId,
        device: DeviceId,
        x: i32,
        y: i32,
        direction: WheelDirection,
    ) {
        if let Some(hook) = self.optional.mouse_wheel {
            unsafe { hook(window, device, x, y, direction.as_raw()) }
        }
    }

    fn joy_device(&mut self, device: DeviceId, change: DeviceChange) {
        if let Some(hook) = self.optional.joy_device {
            unsafe { hook(device, change.as_raw()) }
        }
    }

    fn joy_button(&mut self, device: DeviceId, button: u8, state: ButtonState) {
        if let Some(hook) = self.optional.joy_button {
            unsafe { hook(device, button, state.as_raw()) }
        }
    }

    fn joy_axis(&mut self, device: DeviceId, axis: u8, value: i16) {
        if let Some(hook) = self.optional.joy_axis {
            unsafe { hook(device, axis, value) }
        }
    }

    fn joy_hat(&mut self, device: DeviceId, hat: u8, value: u8) {
        if let Some(hook) = self.optional.joy_hat {
            unsafe { hook(device, hat, value) }
        }
    }

    fn joy_ball(&mut self, device: DeviceId, ball: u8, dx: i16, dy: i16) {
        if let Some(hook) = self.optional.joy_ball {
            unsafe { hook(device, ball, dx, dy) }
        }
    }

    fn controller_device(&mut self, device: DeviceId, change: DeviceChange) {
        if let Some(hook) = self.optional.controller_device {
            unsafe { hook(device, change.as_raw()) }
        }
    }

    fn controller_button(&mut self, device: DeviceId, button: u8, state: ButtonState) {
        if let Some(hook) = self.optional.controller_button {
            unsafe { hook(device, button, state.as_raw()) }
        }
    }

    fn controller_axis(&mut self, device: DeviceId, axis: u8, value: i16) {
        if let Some(hook) = self.optional.controller_axis {
            unsafe { hook(device, axis, value) }
        }
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
        if let Some(hook) = self.optional.controller_touchpad {
            unsafe { hook(device, phase.as_raw(), finger, x, y, pressure) }
        }
    }

    fn controller_sensor(&mut self, device: DeviceId, sensor: SensorKind, data: &[f32]) {
        if let Some(hook) = self.optional.controller_sensor {
            unsafe { hook(device, sensor.as_raw(), data.as_ptr(), data.len() as u8) }
        }
    }

    fn audio_device(&mut self, device: DeviceId, change: DeviceChange, capture: bool) {
        if let Some(hook) = self.optional.audio_device {
            unsafe { hook(device, change.as_raw(), capture as u8) }
        }
    }

    fn channel_finished(&mut self, channel: u32) {
        if let Some(hook) = self.optional.channel_finished {
            unsafe { hook(channel) }
        }
    }

    fn music_finished(&mut self) {
        if let Some(hook) = self.optional.music_finished {
            unsafe { hook() }
        }
    }

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
        if let Some(hook) = self.optional.touch_finger {
            unsafe { hook(window, touch, finger, phase.as_raw(), x, y, dx, dy, pressure) }
        }
    }

    fn dropped(&mut self, window: WindowId, payload: &DropPayload) {
        if let Some(hook) = self.optional.drop {
            let text = match payload {
                DropPayload::File(text) | DropPayload::Text(text) => {
                    CString::new(text.as_str()).unwrap_or_default()
                }
                _ => CString::default(),
            };
            unsafe { hook(window, payload.kind_raw(), text.as_ptr()) }
        }
    }

    fn sensor(&mut self, device: DeviceId, sensor: SensorKind, data: &[f32]) {
        if let Some(hook) = self.optional.sensor {
            unsafe { hook(device, sensor.as_raw(), data.as_ptr(), data.len() as u8) }
        }
    }

    fn user_event(&mut self, window: WindowId, kind: u32, code: i32) {
        if let Some(hook) = self.optional.user_event {
            unsafe { hook(window, kind, code) }
        }
    }
}

/// Loader for application modules backed by shared libraries.
#[derive(Debug, Default)]
pub struct DynamicAppLoader {
    generation: u64,
}

impl DynamicAppLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactLoader for DynamicAppLoader {
    type Module = dyn AppHooks;

    fn load(&mut self, path: &Path) -> Result<ModuleDescriptor<dyn AppHooks>, ModuleLoadError> {
        let last_modified = watch::artifact_mtime(path);

        let library = match unsafe { Library::new(path) } {
            Ok(library) => library,
            Err(error) => {
                debug!("app module not yet available at {:?}: {}", path, error);
                return Ok(ModuleDescriptor::vacant(path));
            }
        };

        let required = RequiredAppSlots {
            init: required_symbol(&library, entry::APP_INIT, path)?,
            update: required_symbol(&library, entry::APP_UPDATE, path)?,
            render: required_symbol(&library, entry::APP_RENDER, path)?,
        };
        let optional = OptionalAppSlots::resolve(&library);

        self.generation += 1;
        info!(
            "loaded app module {:?} (generation {}, {} optional entry points)",
            path,
            self.generation,
            optional.resolved_count()
        );

        Ok(ModuleDescriptor::loaded(
            path,
            Box::new(DynamicAppModule {
                required,
                optional,
                _library: library,
            }),
            last_modified,
            self.generation,
        ))
    }

    fn unload(&mut self, descriptor: &mut ModuleDescriptor<dyn AppHooks>) {
        if descriptor.is_loaded() {
            info!("unloading app module {:?}", descriptor.path());
        }
        descriptor.clear();
    }
}
