//! Frame protocol integration: events before update, update before render,
//! render before present, quit as the only way out.

use molt_host::dispatch::FrameDisposition;
use molt_host::{Host, HostConfig};
use molt_kernel::{ButtonState, HostEvent};
use molt_testing::{shared_log, RecordingHooks, StubPlatform};

fn small_config() -> HostConfig {
    HostConfig::new()
        .with_app_arena_bytes(1 << 16)
        .with_platform_arena_bytes(1 << 12)
}

#[test]
fn events_dispatch_before_the_fixed_step_update() {
    let log = shared_log();
    let platform = StubPlatform::new();
    let queue = platform.queue.clone();
    let presented = platform.presented.clone();

    let mut host = Host::with_resident_modules(
        small_config(),
        Box::new(RecordingHooks::new(log.clone())),
        Box::new(platform),
    )
    .unwrap();

    queue.borrow_mut().push(HostEvent::Keyboard {
        window: 1,
        state: ButtonState::Pressed,
        repeat: false,
        scancode: 20,
    });

    assert_eq!(host.step().unwrap(), FrameDisposition::Continue);

    let entries = log.borrow().clone();
    assert_eq!(entries.len(), 4, "init, keyboard, update, render: {entries:?}");
    assert!(entries[0].starts_with("init"));
    assert!(entries[1].starts_with("keyboard 1 Pressed"));
    assert!(entries[2].starts_with("update"));
    assert_eq!(entries[3], "render");
    assert_eq!(*presented.borrow(), 1);
}

#[test]
fn frames_without_events_still_update_render_present() {
    let log = shared_log();
    let platform = StubPlatform::new();
    let presented = platform.presented.clone();

    let mut host = Host::with_resident_modules(
        small_config(),
        Box::new(RecordingHooks::new(log.clone())),
        Box::new(platform),
    )
    .unwrap();

    for _ in 0..10 {
        assert_eq!(host.step().unwrap(), FrameDisposition::Continue);
    }

    assert_eq!(host.frames(), 10);
    assert_eq!(*presented.borrow(), 10);
    let updates = log
        .borrow()
        .iter()
        .filter(|entry| entry.starts_with("update"))
        .count();
    assert_eq!(updates, 10);
}

#[test]
fn quit_event_ends_the_loop_without_a_final_update() {
    let log = shared_log();
    let platform = StubPlatform::new();
    let queue = platform.queue.clone();
    let presented = platform.presented.clone();

    let mut host = Host::with_resident_modules(
        small_config(),
        Box::new(RecordingHooks::new(log.clone())),
        Box::new(platform),
    )
    .unwrap();

    assert_eq!(host.step().unwrap(), FrameDisposition::Continue);
    queue.borrow_mut().push(HostEvent::Quit);
    assert_eq!(host.step().unwrap(), FrameDisposition::Quit);

    let entries = log.borrow().clone();
    // Frame 1: update + render. Frame 2: teardown only.
    assert_eq!(entries.last().map(String::as_str), Some("teardown"));
    let updates = entries.iter().filter(|entry| entry.starts_with("update")).count();
    assert_eq!(updates, 1);
    assert_eq!(*presented.borrow(), 1, "no present on the quit frame");
}

#[test]
fn low_memory_reaches_the_module_like_any_other_category() {
    let log = shared_log();
    let platform = StubPlatform::new();
    let queue = platform.queue.clone();

    let mut host = Host::with_resident_modules(
        small_config(),
        Box::new(RecordingHooks::new(log.clone())),
        Box::new(platform),
    )
    .unwrap();

    queue.borrow_mut().push(HostEvent::LowMemory);
    host.step().unwrap();

    assert!(log.borrow().iter().any(|entry| entry == "low_memory"));
}
