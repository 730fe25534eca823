//! The host context and frame loop.
//!
//! A single owned [`Host`] holds everything: both arenas, the capability
//! table, the module descriptors and their reload coordinators. There is no
//! ambient global state — components receive what they need explicitly, which
//! single-threaded execution makes straightforward.

use crate::config::HostConfig;
use crate::dispatch::{EventDispatcher, FrameDisposition};
use crate::loader::{ArtifactLoader, DynamicAppLoader, ModuleDescriptor, ModuleLoadError};
use crate::platform::{DynamicPlatformLoader, HeadlessPlatform};
use crate::reload::{ReloadCoordinator, ReloadError, ReloadOutcome};
use crate::watch::WatchRecord;
use molt_kernel::{AppHooks, Arena, ArenaError, CapabilityTable, HostEvent, PlatformServices};
use tracing::{debug, info};

/// Host error types. All fatal; recoverable conditions never surface here.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Load(#[from] ModuleLoadError),

    #[error(transparent)]
    Reload(#[from] ReloadError),

    #[error(transparent)]
    Arena(#[from] ArenaError),
}

/// The live-reload host: arenas, capability table, module descriptors,
/// reload coordinators, and the frame loop that drives them.
pub struct Host {
    config: HostConfig,
    app_arena: Arena,
    platform_arena: Arena,
    capabilities: CapabilityTable,
    app: ModuleDescriptor<dyn AppHooks>,
    app_reload: Option<ReloadCoordinator<DynamicAppLoader>>,
    platform: ModuleDescriptor<dyn PlatformServices>,
    platform_reload: Option<ReloadCoordinator<DynamicPlatformLoader>>,
    dispatcher: EventDispatcher,
    events: Vec<HostEvent>,
    frames: u64,
}

impl Host {
    /// Load the configured modules and initialize them against fresh arenas.
    ///
    /// This is the required first load: an app artifact that cannot be
    /// opened here is fatal, unlike during later reload cycles.
    pub fn bootstrap(config: HostConfig) -> Result<Self, HostError> {
        let mut app_arena = Arena::with_capacity(config.app_arena_bytes);
        let mut platform_arena = Arena::with_capacity(config.platform_arena_bytes);
        let (viewport_w, viewport_h) = (config.viewport_width, config.viewport_height);

        let (mut platform, platform_reload) = match &config.platform_module {
            Some(path) => {
                let mut loader = DynamicPlatformLoader::new();
                let descriptor = loader.load(path)?;
                if !descriptor.is_loaded() {
                    return Err(ModuleLoadError::ArtifactUnavailable(path.clone()).into());
                }
                let watch = WatchRecord::new(path.clone(), descriptor.last_modified());
                let coordinator = ReloadCoordinator::new(loader, watch)
                    .with_settle_delay(config.settle_delay());
                (descriptor, Some(coordinator))
            }
            None => (
                ModuleDescriptor::resident(
                    Box::new(HeadlessPlatform::new()) as Box<dyn PlatformServices>
                ),
                None,
            ),
        };

        let platform_block = platform_arena.block();
        let capabilities = match platform.hooks_mut() {
            Some(hooks) => {
                hooks.initialize(platform_block, viewport_w, viewport_h);
                hooks.capabilities()
            }
            None => CapabilityTable::noop(),
        };

        let mut app_loader = DynamicAppLoader::new();
        let mut app = app_loader.load(&config.app_module)?;
        let app_block = app_arena.block();
        match app.hooks_mut() {
            Some(hooks) => hooks.init(app_block, &capabilities, viewport_w, viewport_h),
            None => {
                return Err(ModuleLoadError::ArtifactUnavailable(config.app_module.clone()).into())
            }
        }
        let app_watch = WatchRecord::new(config.app_module.clone(), app.last_modified());
        let app_reload = Some(
            ReloadCoordinator::new(app_loader, app_watch).with_settle_delay(config.settle_delay()),
        );

        info!(
            "host up: app {:?}, platform {}, arena {} MB at {:#x}",
            config.app_module,
            config
                .platform_module
                .as_ref()
                .map(|path| format!("{path:?}"))
                .unwrap_or_else(|| "headless".to_string()),
            config.app_arena_bytes / 1_000_000,
            app_arena.base_addr(),
        );

        Ok(Self {
            config,
            app_arena,
            platform_arena,
            capabilities,
            app,
            app_reload,
            platform,
            platform_reload,
            dispatcher: EventDispatcher::new(),
            events: Vec::new(),
            frames: 0,
        })
    }

    /// Build a host around in-process module implementations, with no backing
    /// artifacts and no watching. For embedders and tests.
    pub fn with_resident_modules(
        config: HostConfig,
        app: Box<dyn AppHooks>,
        platform: Box<dyn PlatformServices>,
    ) -> Result<Self, HostError> {
        let mut app_arena = Arena::with_capacity(config.app_arena_bytes);
        let mut platform_arena = Arena::with_capacity(config.platform_arena_bytes);
        let (viewport_w, viewport_h) = (config.viewport_width, config.viewport_height);

        let mut platform = ModuleDescriptor::resident(platform);
        let platform_block = platform_arena.block();
        let capabilities = match platform.hooks_mut() {
            Some(hooks) => {
                hooks.initialize(platform_block, viewport_w, viewport_h);
                hooks.capabilities()
            }
            None => CapabilityTable::noop(),
        };

        let mut app = ModuleDescriptor::resident(app);
        let app_block = app_arena.block();
        if let Some(hooks) = app.hooks_mut() {
            hooks.init(app_block, &capabilities, viewport_w, viewport_h);
        }

        Ok(Self {
            config,
            app_arena,
            platform_arena,
            capabilities,
            app,
            app_reload: None,
            platform,
            platform_reload: None,
            dispatcher: EventDispatcher::new(),
            events: Vec::new(),
            frames: 0,
        })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }

    pub fn app(&self) -> &ModuleDescriptor<dyn AppHooks> {
        &self.app
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Run until a quit event or a fatal error. The only clean termination
    /// path is the quit event; there is no restart without process exit.
    pub fn run(&mut self) -> Result<(), HostError> {
        info!(
            "entering frame loop ({}x{}, fixed dt {:.4}s)",
            self.config.viewport_width, self.config.viewport_height, self.config.fixed_timestep
        );
        loop {
            if self.step()? == FrameDisposition::Quit {
                return Ok(());
            }
            std::thread::sleep(self.config.frame_sleep());
        }
    }

    /// One frame: drain events → dispatch → update → render → present →
    /// reload coordination. Exposed so embedders and tests can drive frames
    /// without the pacing sleep.
    pub fn step(&mut self) -> Result<FrameDisposition, HostError> {
        self.frames += 1;

        self.events.clear();
        if let Some(platform) = self.platform.hooks_mut() {
            platform.poll_events(&mut self.events);
        }

        let disposition = match self.app.hooks_mut() {
            Some(hooks) => self.dispatcher.dispatch_frame(&mut self.events, hooks),
            // No module to hear them; the quit event still terminates.
            None => {
                if self.events.drain(..).any(|event| event == HostEvent::Quit) {
                    FrameDisposition::Quit
                } else {
                    FrameDisposition::Continue
                }
            }
        };

        if disposition == FrameDisposition::Quit {
            info!("quit event after {} frames; shutting down", self.frames);
            if let Some(hooks) = self.app.hooks_mut() {
                hooks.teardown();
            }
            if let Some(platform) = self.platform.hooks_mut() {
                platform.teardown();
            }
            return Ok(FrameDisposition::Quit);
        }

        if let Some(hooks) = self.app.hooks_mut() {
            hooks.update(self.config.fixed_timestep);
            hooks.render();
        }

        if let Some(platform) = self.platform.hooks_mut() {
            platform.present();
        }

        self.poll_reloads()?;

        Ok(FrameDisposition::Continue)
    }

    /// Run one reload-coordinator step for each watched module.
    fn poll_reloads(&mut self) -> Result<(), HostError> {
        let (viewport_w, viewport_h) = (self.config.viewport_width, self.config.viewport_height);

        if let Some(coordinator) = self.platform_reload.as_mut() {
            let block = self.platform_arena.block();
            let outcome = coordinator.poll(&mut self.platform, &mut |descriptor| {
                if let Some(platform) = descriptor.hooks_mut() {
                    platform.initialize(block, viewport_w, viewport_h);
                }
                Ok(())
            })?;
            if outcome == ReloadOutcome::Reloaded {
                self.refresh_capabilities();
            }
        }

        if let Some(coordinator) = self.app_reload.as_mut() {
            let block = self.app_arena.block();
            let capabilities = self.capabilities;
            let outcome = coordinator.poll(&mut self.app, &mut |descriptor| {
                if let Some(hooks) = descriptor.hooks_mut() {
                    hooks.init(block, &capabilities, viewport_w, viewport_h);
                }
                Ok(())
            })?;
            if outcome == ReloadOutcome::Reloaded {
                debug!(
                    "app module reattached to arena at {:#x}",
                    self.app_arena.base_addr()
                );
            }
        }

        Ok(())
    }

    /// After a platform reload the old table's function pointers point into
    /// unloaded code; rebuild it and hand the app module the fresh one by
    /// re-running its init against the unchanged arena.
    fn refresh_capabilities(&mut self) {
        if let Some(platform) = self.platform.hooks() {
            self.capabilities = platform.capabilities();
        }
        let block = self.app_arena.block();
        let capabilities = self.capabilities;
        let (viewport_w, viewport_h) = (self.config.viewport_width, self.config.viewport_height);
        if let Some(hooks) = self.app.hooks_mut() {
            info!("platform reloaded; reinitializing app module against the fresh capability table");
            hooks.init(block, &capabilities, viewport_w, viewport_h);
        }
    }
}
