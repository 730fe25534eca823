//! Host-provided capability table.
//!
//! The table is the only door a module has back into the host: a versioned,
//! immutable set of C function pointers for drawing, resource binding, audio
//! and music playback, window creation, screenshots, and socket plumbing.
//! It is built once per process (or once per platform-module reload, since
//! the platform module may itself supply it) and passed by value into every
//! entry point that needs it.

use std::os::raw::c_char;

/// Version stamp carried in the leading field of every table. A module should
/// refuse to run against a table whose version it does not recognise.
pub const CAPABILITY_TABLE_VERSION: u32 = 1;

/// Connection kind for [`NetListenFn`] / [`NetConnectFn`].
pub const SOCKET_TCP: u8 = 0;
/// See [`SOCKET_TCP`].
pub const SOCKET_UDP: u8 = 1;

/// Sentinel returned by index-allocating capabilities when the host is out of
/// slots (windows, connections).
pub const INVALID_INDEX: u32 = u32::MAX;

/// Draw a filled or outlined axis-aligned box.
pub type DrawBoxFn =
    unsafe extern "C" fn(x: f32, y: f32, w: f32, h: f32, r: f32, g: f32, b: f32, a: f32, fill: u8);
/// Draw a cell of a bound texture into a destination rectangle.
pub type DrawTextureFn = unsafe extern "C" fn(
    texture: u32,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    cell_x: i32,
    cell_y: i32,
    cell_w: i32,
    cell_h: i32,
);
/// Bind an image asset to a numeric handle. Idempotent by filename.
pub type EnsureImageFn = unsafe extern "C" fn(filename: *const c_char, texture: u32);
/// Capture a region of a window to the host's screenshot directory.
pub type ScreenshotFn = unsafe extern "C" fn(window: u32, x: i32, y: i32, w: i32, h: i32);
/// Ask the host to begin a clean shutdown at the next frame boundary.
pub type RequestQuitFn = unsafe extern "C" fn();
/// Create a window; returns its index or [`INVALID_INDEX`].
pub type CreateWindowFn =
    unsafe extern "C" fn(title: *const c_char, x: i32, y: i32, w: u32, h: u32) -> u32;

/// Bind an audio asset to a channel. Idempotent by filename.
pub type EnsureAudioFn = unsafe extern "C" fn(filename: *const c_char, channel: u32);
/// Play a bound channel with optional fade-in, loop count, volume override
/// and bounded duration (milliseconds; zero means unbounded).
pub type PlayAudioFn =
    unsafe extern "C" fn(channel: u32, fade_ms: i32, loops: i32, volume: i32, duration_ms: i32);
/// Stop a channel, optionally fading out over `duration_ms`.
pub type StopAudioFn = unsafe extern "C" fn(channel: u32, fade: u8, duration_ms: i32);

/// Bind a music asset to a track. Idempotent by filename.
pub type EnsureMusicFn = unsafe extern "C" fn(filename: *const c_char, track: u32);
/// Play a bound track with optional fade-in, loop count, seek position,
/// volume and resume flag.
pub type PlayMusicFn = unsafe extern "C" fn(
    track: u32,
    fade_ms: i32,
    loops: i32,
    position: f64,
    volume: i32,
    resume: u8,
);
/// Seek the playing track to `position` seconds.
pub type SeekMusicFn = unsafe extern "C" fn(position: f64);
/// Rewind the playing track to its start.
pub type RewindMusicFn = unsafe extern "C" fn();
/// Toggle pause on the playing track.
pub type PauseMusicFn = unsafe extern "C" fn();
/// Stop the playing track, fading out over `fade_ms`.
pub type StopMusicFn = unsafe extern "C" fn(fade_ms: i32);

/// Open a listening socket; returns a connection index or [`INVALID_INDEX`].
pub type NetListenFn = unsafe extern "C" fn(kind: u8, port: u16) -> u32;
/// Connect to a remote host; returns a connection index or [`INVALID_INDEX`].
pub type NetConnectFn = unsafe extern "C" fn(kind: u8, host: *const c_char, port: u16) -> u32;
/// Send bytes over a connection.
pub type NetSendFn = unsafe extern "C" fn(connection: u32, data: *const u8, len: usize);
/// Receive up to `len` bytes; returns the count received, or a negative value
/// when nothing is available.
pub type NetRecvFn = unsafe extern "C" fn(connection: u32, data: *mut u8, len: usize) -> isize;
/// Close a connection and release its index.
pub type NetCloseFn = unsafe extern "C" fn(connection: u32);

/// The host's service surface, as seen by a module.
///
/// Read-only from the module's perspective once handed over; every slot is
/// total (the host substitutes no-ops rather than nulls for services the
/// current configuration lacks), so a module never has to null-check.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CapabilityTable {
    pub version: u32,
    // Drawing
    pub draw_box: DrawBoxFn,
    pub draw_texture: DrawTextureFn,
    pub ensure_image: EnsureImageFn,
    pub screenshot: ScreenshotFn,
    // Process / windowing
    pub request_quit: RequestQuitFn,
    pub create_window: CreateWindowFn,
    // Audio channels
    pub ensure_audio: EnsureAudioFn,
    pub play_audio: PlayAudioFn,
    pub stop_audio: StopAudioFn,
    // Music tracks
    pub ensure_music: EnsureMusicFn,
    pub play_music: PlayMusicFn,
    pub seek_music: SeekMusicFn,
    pub rewind_music: RewindMusicFn,
    pub pause_music: PauseMusicFn,
    pub stop_music: StopMusicFn,
    // Sockets
    pub net_listen: NetListenFn,
    pub net_connect: NetConnectFn,
    pub net_send: NetSendFn,
    pub net_recv: NetRecvFn,
    pub net_close: NetCloseFn,
}

unsafe extern "C" fn noop_draw_box(
    _x: f32,
    _y: f32,
    _w: f32,
    _h: f32,
    _r: f32,
    _g: f32,
    _b: f32,
    _a: f32,
    _fill: u8,
) {
}
unsafe extern "C" fn noop_draw_texture(
    _texture: u32,
    _x: f32,
    _y: f32,
    _w: f32,
    _h: f32,
    _cell_x: i32,
    _cell_y: i32,
    _cell_w: i32,
    _cell_h: i32,
) {
}
unsafe extern "C" fn noop_ensure_image(_filename: *const c_char, _texture: u32) {}
unsafe extern "C" fn noop_screenshot(_window: u32, _x: i32, _y: i32, _w: i32, _h: i32) {}
unsafe extern "C" fn noop_request_quit() {}
unsafe extern "C" fn noop_create_window(
    _title: *const c_char,
    _x: i32,
    _y: i32,
    _w: u32,
    _h: u32,
) -> u32 {
    INVALID_INDEX
}
unsafe extern "C" fn noop_ensure_audio(_filename: *const c_char, _channel: u32) {}
unsafe extern "C" fn noop_play_audio(
    _channel: u32,
    _fade_ms: i32,
    _loops: i32,
    _volume: i32,
    _duration_ms: i32,
) {
}
unsafe extern "C" fn noop_stop_audio(_channel: u32, _fade: u8, _duration_ms: i32) {}
unsafe extern "C" fn noop_ensure_music(_filename: *const c_char, _track: u32) {}
unsafe extern "C" fn noop_play_music(
    _track: u32,
    _fade_ms: i32,
    _loops: i32,
    _position: f64,
    _volume: i32,
    _resume: u8,
) {
}
unsafe extern "C" fn noop_seek_music(_position: f64) {}
unsafe extern "C" fn noop_rewind_music() {}
unsafe extern "C" fn noop_pause_music() {}
unsafe extern "C" fn noop_stop_music(_fade_ms: i32) {}
unsafe extern "C" fn noop_net_listen(_kind: u8, _port: u16) -> u32 {
    INVALID_INDEX
}
unsafe extern "C" fn noop_net_connect(_kind: u8, _host: *const c_char, _port: u16) -> u32 {
    INVALID_INDEX
}
unsafe extern "C" fn noop_net_send(_connection: u32, _data: *const u8, _len: usize) {}
unsafe extern "C" fn noop_net_recv(_connection: u32, _data: *mut u8, _len: usize) -> isize {
    -1
}
unsafe extern "C" fn noop_net_close(_connection: u32) {}

impl CapabilityTable {
    /// A total table of no-ops, for headless configurations and tests.
    pub fn noop() -> Self {
        Self {
            version: CAPABILITY_TABLE_VERSION,
            draw_box: noop_draw_box,
            draw_texture: noop_draw_texture,
            ensure_image: noop_ensure_image,
            screenshot: noop_screenshot,
            request_quit: noop_request_quit,
            create_window: noop_create_window,
            ensure_audio: noop_ensure_audio,
            play_audio: noop_play_audio,
            stop_audio: noop_stop_audio,
            ensure_music: noop_ensure_music,
            play_music: noop_play_music,
            seek_music: noop_seek_music,
            rewind_music: noop_rewind_music,
            pause_music: noop_pause_music,
            stop_music: noop_stop_music,
            net_listen: noop_net_listen,
            net_connect: noop_net_connect,
            net_send: noop_net_send,
            net_recv: noop_net_recv,
            net_close: noop_net_close,
        }
    }

    /// Whether a module built against this crate can use the table.
    pub fn is_compatible(&self) -> bool {
        self.version == CAPABILITY_TABLE_VERSION
    }
}
