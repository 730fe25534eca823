//! Reload coordinator integration: change detection, cycle ordering,
//! fatality, and recovery when the artifact briefly disappears.

use molt_host::loader::{ArtifactLoader, ModuleDescriptor};
use molt_host::reload::{ReloadCoordinator, ReloadError, ReloadOutcome, ReloadPhase};
use molt_host::watch::{artifact_mtime, WatchRecord};
use molt_kernel::{AppHooks, Arena, CapabilityTable};
use molt_testing::{shared_log, ScriptedLoader, SharedLog};
use std::path::{Path, PathBuf};
use std::time::Duration;

struct Fixture {
    _dir: tempfile::TempDir,
    path: PathBuf,
    log: SharedLog,
    descriptor: ModuleDescriptor<dyn AppHooks>,
    coordinator: ReloadCoordinator<ScriptedLoader>,
    arena: Arena,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("libapp.so");
        std::fs::write(&path, b"v1").unwrap();

        let log = shared_log();
        let mut loader = ScriptedLoader::new(log.clone());
        let descriptor = loader.load(&path).unwrap();
        let watch = WatchRecord::new(path.clone(), descriptor.last_modified());
        let coordinator =
            ReloadCoordinator::new(loader, watch).with_settle_delay(Duration::ZERO);
        log.borrow_mut().clear();

        Self {
            _dir: dir,
            path,
            log,
            descriptor,
            coordinator,
            arena: Arena::with_capacity(4096),
        }
    }

    fn touch(&self) {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .open(&self.path)
            .unwrap();
        let bumped = artifact_mtime(&self.path).unwrap() + Duration::from_secs(5);
        file.set_modified(bumped).unwrap();
    }

    fn poll(&mut self) -> Result<ReloadOutcome, ReloadError> {
        let block = self.arena.block();
        let capabilities = CapabilityTable::noop();
        self.coordinator
            .poll(&mut self.descriptor, &mut |descriptor| {
                if let Some(hooks) = descriptor.hooks_mut() {
                    hooks.init(block, &capabilities, 800, 600);
                }
                Ok(())
            })
    }

    fn log_entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

#[test]
fn unmodified_artifact_never_leaves_stable() {
    let mut fixture = Fixture::new();
    let generation = fixture.descriptor.generation();

    for _ in 0..1000 {
        assert_eq!(fixture.poll().unwrap(), ReloadOutcome::Idle);
        assert_eq!(fixture.coordinator.phase(), ReloadPhase::Stable);
    }

    assert!(fixture.log_entries().is_empty(), "no loader activity");
    assert_eq!(fixture.descriptor.generation(), generation);
    assert_eq!(fixture.coordinator.reload_count(), 0);
}

#[test]
fn one_touch_drives_exactly_one_cycle_with_the_same_arena_base() {
    let mut fixture = Fixture::new();
    let base = fixture.arena.base_addr();
    let generation = fixture.descriptor.generation();

    fixture.touch();
    assert_eq!(fixture.poll().unwrap(), ReloadOutcome::Reloaded);
    assert_eq!(fixture.coordinator.phase(), ReloadPhase::Stable);
    assert_eq!(fixture.coordinator.reload_count(), 1);
    assert_eq!(fixture.descriptor.generation(), generation + 1);

    // Teardown of the outgoing module, unload, then load, then exactly one
    // init that reattaches to the unchanged arena.
    assert_eq!(
        fixture.log_entries(),
        vec![
            "teardown".to_string(),
            "unload".to_string(),
            "load".to_string(),
            format!("init {base:#x}"),
        ]
    );

    // The watch record was advanced: no further cycles without a new write.
    for _ in 0..50 {
        assert_eq!(fixture.poll().unwrap(), ReloadOutcome::Idle);
    }
    assert_eq!(fixture.coordinator.reload_count(), 1);
}

#[test]
fn unload_always_completes_before_the_next_load_begins() {
    let mut fixture = Fixture::new();

    for _ in 0..3 {
        fixture.touch();
        fixture.poll().unwrap();
    }

    let entries = fixture.log_entries();
    let mut live = true; // initial load happened before the log was cleared
    for entry in &entries {
        match entry.as_str() {
            "unload" => {
                assert!(live, "unload of an already-unloaded module");
                live = false;
            }
            "load" => {
                assert!(!live, "load while a previous version was still mapped");
                live = true;
            }
            _ => {}
        }
    }
    assert!(live);
    assert_eq!(fixture.coordinator.reload_count(), 3);
}

#[test]
fn vanished_artifact_parks_the_coordinator_until_it_returns() {
    let mut fixture = Fixture::new();
    fixture.touch();
    fixture.coordinator.loader_mut().vacant_loads = 1;

    assert_eq!(fixture.poll().unwrap(), ReloadOutcome::Waiting);
    assert_eq!(fixture.coordinator.phase(), ReloadPhase::Reloading);
    assert!(!fixture.descriptor.is_loaded());

    // Next frame the artifact is back; the cycle completes without a second
    // teardown/unload of the already-gone module.
    assert_eq!(fixture.poll().unwrap(), ReloadOutcome::Reloaded);
    assert!(fixture.descriptor.is_loaded());

    let entries = fixture.log_entries();
    assert_eq!(
        entries.iter().filter(|entry| *entry == "unload").count(),
        1
    );
    assert_eq!(entries.iter().filter(|entry| *entry == "load").count(), 2);
}

#[test]
fn missing_required_symbol_after_unload_is_fatal_and_names_the_symbol() {
    let mut fixture = Fixture::new();
    fixture.touch();
    fixture.coordinator.loader_mut().fail_with_missing = Some("app_render");

    let error = fixture.poll().unwrap_err();
    let message = error.to_string();
    assert!(message.contains("app_render"), "got: {message}");
    assert!(
        message.contains(Path::new("libapp.so").to_str().unwrap()),
        "got: {message}"
    );
}
