//! The molt host.
//!
//! Keeps a long-running process alive while the application module and the
//! platform-services module are recompiled and swapped in underneath it:
//! - dynamic loading and entry-point resolution ([`loader`], [`platform`])
//! - modification-time change detection ([`watch`])
//! - the per-module reload state machine ([`reload`])
//! - per-category event forwarding ([`dispatch`])
//! - the fixed-step frame loop and owned host context ([`host`])
//!
//! Everything runs on one logical thread; module entry points are ordinary
//! synchronous calls that run to completion before control returns here.

pub mod config;
pub mod dispatch;
pub mod host;
pub mod loader;
pub mod platform;
pub mod reload;
pub mod watch;

pub use config::HostConfig;
pub use dispatch::{EventDispatcher, FrameDisposition};
pub use host::{Host, HostError};
pub use loader::{ArtifactLoader, DynamicAppLoader, ModuleDescriptor, ModuleLoadError};
pub use platform::{DynamicPlatformLoader, HeadlessPlatform};
pub use reload::{ReloadCoordinator, ReloadError, ReloadOutcome, ReloadPhase};
pub use watch::WatchRecord;
