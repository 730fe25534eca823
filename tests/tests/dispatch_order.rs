//! Event dispatcher integration: ordering across mixed categories, and the
//! all-defaults module that hears nothing and breaks nothing.

use molt_host::dispatch::{EventDispatcher, FrameDisposition};
use molt_kernel::{ButtonState, DropPayload, HostEvent, WindowEvent};
use molt_testing::{one_of_each_category, shared_log, MinimalHooks, RecordingHooks};

#[test]
fn mixed_categories_arrive_in_production_order() {
    let log = shared_log();
    let mut hooks = RecordingHooks::new(log.clone());
    let mut dispatcher = EventDispatcher::new();

    let mut events = vec![
        HostEvent::Window {
            window: 1,
            event: WindowEvent::Resized {
                width: 1024,
                height: 768,
            },
        },
        HostEvent::Keyboard {
            window: 1,
            state: ButtonState::Pressed,
            repeat: false,
            scancode: 44,
        },
        HostEvent::Drop {
            window: 1,
            payload: DropPayload::Begin,
        },
        HostEvent::Drop {
            window: 1,
            payload: DropPayload::File("save.dat".to_string()),
        },
        HostEvent::Drop {
            window: 1,
            payload: DropPayload::Complete,
        },
        HostEvent::MusicFinished,
    ];

    let disposition = dispatcher.dispatch_frame(&mut events, &mut hooks);
    assert_eq!(disposition, FrameDisposition::Continue);

    let entries = log.borrow().clone();
    assert_eq!(entries.len(), 6);
    assert!(entries[0].starts_with("window_resized 1 1024x768"));
    assert!(entries[1].starts_with("keyboard 1 Pressed"));
    assert!(entries[2].starts_with("dropped 1 Begin"));
    assert!(entries[3].contains("save.dat"));
    assert!(entries[4].starts_with("dropped 1 Complete"));
    assert_eq!(entries[5], "music_finished");
}

#[test]
fn every_category_reaches_its_own_hook() {
    let log = shared_log();
    let mut hooks = RecordingHooks::new(log.clone());
    let mut dispatcher = EventDispatcher::new();

    let mut events = one_of_each_category();
    let count = events.len();
    dispatcher.dispatch_frame(&mut events, &mut hooks);

    let entries = log.borrow().clone();
    assert_eq!(entries.len(), count);
    // No two categories share a hook.
    let prefixes: std::collections::HashSet<&str> = entries
        .iter()
        .map(|entry| entry.split(' ').next().unwrap_or(entry.as_str()))
        .collect();
    assert_eq!(prefixes.len(), count);
}

#[test]
fn a_required_only_module_hears_nothing_and_nothing_breaks() {
    let mut hooks = MinimalHooks;
    let mut dispatcher = EventDispatcher::new();

    let mut events = one_of_each_category();
    let count = events.len() as u64;
    let disposition = dispatcher.dispatch_frame(&mut events, &mut hooks);

    assert_eq!(disposition, FrameDisposition::Continue);
    assert_eq!(dispatcher.dispatched(), count);
    assert!(events.is_empty());
}

#[test]
fn dropped_categories_do_not_disturb_the_order_of_the_rest() {
    // A module that handles only keyboard events, interleaved with events it
    // ignores: the keyboard sequence must come through intact.
    struct KeysOnly {
        seen: Vec<u8>,
    }
    impl molt_kernel::ModuleLifecycle for KeysOnly {}
    impl molt_kernel::AppHooks for KeysOnly {
        fn init(
            &mut self,
            _arena: molt_kernel::ArenaBlock,
            _caps: &molt_kernel::CapabilityTable,
            _w: u32,
            _h: u32,
        ) {
        }
        fn update(&mut self, _dt: f32) {}
        fn render(&mut self) {}
        fn keyboard(&mut self, _window: u32, _state: ButtonState, _repeat: bool, scancode: u8) {
            self.seen.push(scancode);
        }
    }

    let mut hooks = KeysOnly { seen: Vec::new() };
    let mut dispatcher = EventDispatcher::new();

    let mut events = Vec::new();
    for (index, filler) in one_of_each_category().into_iter().enumerate() {
        events.push(HostEvent::Keyboard {
            window: 1,
            state: ButtonState::Pressed,
            repeat: false,
            scancode: index as u8,
        });
        if !matches!(filler, HostEvent::Keyboard { .. }) {
            events.push(filler);
        }
    }

    dispatch_all(&mut dispatcher, &mut hooks, &mut events);
    let expected: Vec<u8> = (0..one_of_each_category().len() as u8).collect();
    assert_eq!(hooks.seen, expected);
}

fn dispatch_all(
    dispatcher: &mut EventDispatcher,
    hooks: &mut dyn molt_kernel::AppHooks,
    events: &mut Vec<HostEvent>,
) {
    let disposition = dispatcher.dispatch_frame(events, hooks);
    assert_eq!(disposition, FrameDisposition::Continue);
}
