//! Export helpers for Rust-written modules.

/// Declare the required entry points of an application module.
///
/// Expands to the `#[no_mangle]` C-linkage exports the host resolves at load
/// time, delegating to the given functions. Optional entry points are
/// exported by hand with `#[no_mangle] pub unsafe extern "C" fn app_...`;
/// leaving one out disables that behavior category, nothing more.
///
/// ```ignore
/// fn boot(arena: ArenaBlock, caps: CapabilityTable, w: u32, h: u32) { /* ... */ }
/// fn tick(dt: f32) { /* ... */ }
/// fn draw() { /* ... */ }
///
/// molt_kernel::declare_app_module! {
///     init: boot,
///     update: tick,
///     render: draw,
/// }
/// ```
#[macro_export]
macro_rules! declare_app_module {
    (init: $init:path, update: $update:path, render: $render:path $(,)?) => {
        #[no_mangle]
        pub unsafe extern "C" fn app_init(
            arena: $crate::ArenaBlock,
            capabilities: $crate::CapabilityTable,
            viewport_w: u32,
            viewport_h: u32,
        ) {
            $init(arena, capabilities, viewport_w, viewport_h)
        }

        #[no_mangle]
        pub unsafe extern "C" fn app_update(dt_seconds: f32) {
            $update(dt_seconds)
        }

        #[no_mangle]
        pub unsafe extern "C" fn app_render() {
            $render()
        }
    };
}
