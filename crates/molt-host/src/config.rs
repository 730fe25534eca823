//! Host configuration.
//!
//! Built in code with the builder methods, or loaded from a TOML file with
//! every field optional — unset fields keep their defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Host configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Path to the application module artifact.
    pub app_module: PathBuf,
    /// Path to the platform-services module artifact. `None` runs the
    /// built-in headless platform.
    pub platform_module: Option<PathBuf>,
    /// Initial viewport size handed to module init.
    pub viewport_width: u32,
    /// See [`viewport_width`](Self::viewport_width).
    pub viewport_height: u32,
    /// Capacity of the application state arena, in bytes.
    pub app_arena_bytes: usize,
    /// Capacity of the platform state arena, in bytes.
    pub platform_arena_bytes: usize,
    /// Fixed delta-time passed to the module's update entry point.
    pub fixed_timestep: f32,
    /// Per-frame sleep bounding CPU usage, in milliseconds.
    pub frame_sleep_ms: u64,
    /// Pause between unload and reload, in milliseconds.
    pub settle_delay_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            app_module: PathBuf::from("build/libapp.so"),
            platform_module: None,
            viewport_width: 800,
            viewport_height: 600,
            app_arena_bytes: 120_000_000,
            platform_arena_bytes: 10_000_000,
            fixed_timestep: 1.0 / 60.0,
            frame_sleep_ms: 1,
            settle_delay_ms: 200,
        }
    }
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_app_module(mut self, path: impl Into<PathBuf>) -> Self {
        self.app_module = path.into();
        self
    }

    pub fn with_platform_module(mut self, path: impl Into<PathBuf>) -> Self {
        self.platform_module = Some(path.into());
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_app_arena_bytes(mut self, bytes: usize) -> Self {
        self.app_arena_bytes = bytes;
        self
    }

    pub fn with_platform_arena_bytes(mut self, bytes: usize) -> Self {
        self.platform_arena_bytes = bytes;
        self
    }

    pub fn with_fixed_timestep(mut self, dt_seconds: f32) -> Self {
        self.fixed_timestep = dt_seconds;
        self
    }

    pub fn with_frame_sleep(mut self, sleep: Duration) -> Self {
        self.frame_sleep_ms = sleep.as_millis() as u64;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn frame_sleep(&self) -> Duration {
        Duration::from_millis(self.frame_sleep_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
