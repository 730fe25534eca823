//! Platform collaborators.
//!
//! The host only ever talks to the platform through
//! [`PlatformServices`](molt_kernel::PlatformServices). Two implementations
//! live here: a headless in-process stub for tests and embedders, and the
//! adapter for a dynamically loaded (and independently reloadable)
//! platform-services module.

use crate::loader::{ArtifactLoader, ModuleDescriptor, ModuleLoadError};
use crate::watch;
use libloading::Library;
use molt_kernel::entry;
use molt_kernel::{ArenaBlock, CapabilityTable, HostEvent, ModuleLifecycle, PlatformServices, RawEvent};
use std::path::Path;
use tracing::{debug, info};

/// Batch size for draining a dynamic platform's event queue.
const EVENT_BATCH: usize = 64;

/// In-process platform with no windowing, rendering or audio: events are
/// queued by the embedder (or a test), `present` is a no-op, and the
/// capability table is total no-ops.
pub struct HeadlessPlatform {
    pending: Vec<HostEvent>,
    capabilities: CapabilityTable,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            capabilities: CapabilityTable::noop(),
        }
    }

    /// Queue an event for the next frame's dispatch.
    pub fn push_event(&mut self, event: HostEvent) {
        self.pending.push(event);
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleLifecycle for HeadlessPlatform {}

impl PlatformServices for HeadlessPlatform {
    fn initialize(&mut self, _arena: ArenaBlock, viewport_w: u32, viewport_h: u32) {
        debug!("headless platform up ({viewport_w}x{viewport_h})");
    }

    fn poll_events(&mut self, out: &mut Vec<HostEvent>) {
        out.append(&mut self.pending);
    }

    fn present(&mut self) {}

    fn capabilities(&self) -> CapabilityTable {
        self.capabilities
    }
}

struct RequiredPlatformSlots {
    init: entry::PlatformInitFn,
    poll_events: entry::PlatformPollEventsFn,
    present: entry::PlatformPresentFn,
    capabilities: entry::PlatformCapabilitiesFn,
}

/// A dynamically loaded platform-services module.
pub struct DynamicPlatformModule {
    required: RequiredPlatformSlots,
    teardown: Option<entry::PlatformTeardownFn>,
    _library: Library,
}

impl ModuleLifecycle for DynamicPlatformModule {
    fn teardown(&mut self) {
        if let Some(hook) = self.teardown {
            unsafe { hook() }
        }
    }
}

impl PlatformServices for DynamicPlatformModule {
    fn initialize(&mut self, arena: ArenaBlock, viewport_w: u32, viewport_h: u32) {
        unsafe { (self.required.init)(arena, viewport_w, viewport_h) }
    }

    fn poll_events(&mut self, out: &mut Vec<HostEvent>) {
        let mut batch = [RawEvent::empty(); EVENT_BATCH];
        loop {
            let count = unsafe { (self.required.poll_events)(batch.as_mut_ptr(), batch.len()) };
            let count = count.min(batch.len());
            for raw in &batch[..count] {
                match raw.decode() {
                    Some(event) => out.push(event),
                    None => debug!("dropping unknown platform event kind {:#x}", raw.kind),
                }
            }
            if count < batch.len() {
                break;
            }
        }
    }

    fn present(&mut self) {
        unsafe { (self.required.present)() }
    }

    fn capabilities(&self) -> CapabilityTable {
        unsafe { (self.required.capabilities)() }
    }
}

/// Loader for platform-services modules backed by shared libraries.
#[derive(Debug, Default)]
pub struct DynamicPlatformLoader {
    generation: u64,
}

impl DynamicPlatformLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactLoader for DynamicPlatformLoader {
    type Module = dyn PlatformServices;

    fn load(
        &mut self,
        path: &Path,
    ) -> Result<ModuleDescriptor<dyn PlatformServices>, ModuleLoadError> {
        let last_modified = watch::artifact_mtime(path);

        let library = match unsafe { Library::new(path) } {
            Ok(library) => library,
            Err(error) => {
                debug!("platform module not yet available at {:?}: {}", path, error);
                return Ok(ModuleDescriptor::vacant(path));
            }
        };

        let required = RequiredPlatformSlots {
            init: super::loader::required_symbol(&library, entry::PLATFORM_INIT, path)?,
            poll_events: super::loader::required_symbol(&library, entry::PLATFORM_POLL_EVENTS, path)?,
            present: super::loader::required_symbol(&library, entry::PLATFORM_PRESENT, path)?,
            capabilities: super::loader::required_symbol(&library, entry::PLATFORM_CAPABILITIES, path)?,
        };
        let teardown = super::loader::optional_symbol(&library, entry::PLATFORM_TEARDOWN);

        self.generation += 1;
        info!(
            "loaded platform module {:?} (generation {})",
            path, self.generation
        );

        Ok(ModuleDescriptor::loaded(
            path,
            Box::new(DynamicPlatformModule {
                required,
                teardown,
                _library: library,
            }),
            last_modified,
            self.generation,
        ))
    }

    fn unload(&mut self, descriptor: &mut ModuleDescriptor<dyn PlatformServices>) {
        if descriptor.is_loaded() {
            info!("unloading platform module {:?}", descriptor.path());
        }
        descriptor.clear();
    }
}
