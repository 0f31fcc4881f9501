//! # safe-layout
//!
//! Safe-area aware layout containers for mobile screens.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained
//! reactivity and [Taffy](https://github.com/DioxusLabs/taffy) for box layout.
//!
//! ## Architecture
//!
//! Views are indices into parallel arrays rather than objects. Every array
//! cell is a tracked slot: writing one marks the view dirty and invalidates
//! the layout derived that read it.
//!
//! ```text
//! XML → builder → view arrays ─┐
//!                              ├─▶ layoutDerived ─▶ tick() ─▶ View::frame()
//! Device signal ───────────────┘
//! ```
//!
//! On devices with safe-area insets, containers flush with the safe area
//! grow under the system bars while their leaf content stays inside it.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Dimension, ViewType, Insets, Frame, etc.)
//! - [`styling`] - Style token converters (time, animation curves, lengths, keywords)
//! - [`engine`] - View registry and parallel arrays
//! - [`layout`] - Taffy bridge and safe-area pass
//! - [`pipeline`] - Device signal, layout derived, mount and run loop
//! - [`view`] - `View` handle
//! - [`builder`] - XML → view tree
//! - [`testing`] - Geometry assertions and the safe-area scenarios

pub mod builder;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod styling;
pub mod testing;
pub mod types;
pub mod view;

// Re-export commonly used items
pub use types::*;

pub use error::{BuildError, ConfigError, LayoutError, StyleError};

pub use styling::{
    AnimationCurve, CubicBezier, animation_timing_function_converter, length_converter,
    time_converter,
};

pub use engine::{
    allocate_index, get_allocated_indices, get_current_parent_index, is_allocated,
    pop_parent_context, push_parent_context, release_index, reset_registry,
};

pub use layout::{ComputedLayout, Viewport, compute_layout};

pub use pipeline::{
    Device, MountHandle, clear_layout, device, layout_pass, mount, set_device, tick,
};

pub use builder::parse;
pub use view::View;

pub use testing::{Outcome, ScenarioError, ScenarioReport, run_all};
