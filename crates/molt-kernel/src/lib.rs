//! Shared contracts between the molt host and the modules it loads.
//!
//! Everything a loadable module and the host must agree on lives here:
//! - the persistent state [`Arena`](arena::Arena) and its C-compatible
//!   [`ArenaBlock`](arena::ArenaBlock) view
//! - the versioned [`CapabilityTable`](capability::CapabilityTable) of
//!   host-provided services
//! - the closed [`HostEvent`](event::HostEvent) taxonomy and its C-ABI wire
//!   form [`RawEvent`](raw::RawEvent)
//! - entry-point signatures and symbol names ([`entry`])
//! - the module interface traits ([`AppHooks`](hooks::AppHooks),
//!   [`PlatformServices`](hooks::PlatformServices))
//!
//! The host never exposes its own internals through this crate, and a module
//! built against it does not need to know whether it has been reloaded: the
//! arena contract (state at stable offsets, detected via a sentinel) carries
//! continuity across swaps.

pub mod arena;
pub mod capability;
pub mod entry;
pub mod event;
pub mod hooks;
mod macros;
pub mod raw;

pub use arena::{Arena, ArenaBlock, ArenaError, ArenaHandle};
pub use capability::{CapabilityTable, CAPABILITY_TABLE_VERSION};
pub use event::{
    ButtonState, DeviceChange, DeviceId, DropPayload, HostEvent, SensorKind, TouchPhase,
    WheelDirection, WindowEvent, WindowId,
};
pub use hooks::{AppHooks, ModuleLifecycle, PlatformServices};
pub use raw::RawEvent;
