//! Reactive Pipeline
//!
//! Connects the view arrays to committed layouts.
//!
//! # Pipeline Architecture
//!
//! ```text
//! Device signal ─┐
//!                ├─▶ layoutDerived ─▶ tick() ─▶ committed layout ─▶ View::frame()
//! View arrays ───┘
//! ```
//!
//! ## Data Flow
//!
//! 1. **device** - Root signal: screen, insets, platform rules
//! 2. **layoutDerived** - Reads device + arrays, calls Taffy, returns ComputedLayout
//! 3. **mount / tick** - Pulls the derived when views are dirty and commits it
//!
//! ## Key Design Principles
//!
//! - **Pure Derived**: layoutDerived is a pure computation
//! - **Explicit Commit**: Only a layout pass drains the dirty set
//! - **Reactive Dependencies**: Reads from signals/arrays auto-track dependencies

pub mod device;
pub mod layout_derived;
pub mod mount;

// Re-exports
pub use device::{Device, device, device_signal, set_device};
pub use layout_derived::{clear_layout, create_layout_derived, set_layout, try_get_layout};
pub use mount::{MountHandle, layout_pass, mount, tick};
