//! Layout Module
//!
//! Container layout computation using Taffy, plus the safe-area pass.
//!
//! # Architecture
//!
//! The layout module uses [Taffy](https://github.com/DioxusLabs/taffy) for
//! flexbox and grid computation. The bridge:
//!
//! 1. Converts view properties → Taffy styles (per container kind)
//! 2. Builds one Taffy tree per root from the parent/children arrays
//! 3. Provides measure functions for label and button intrinsic sizing
//! 4. Extracts absolute frames into a `ComputedLayout`
//! 5. Grows flush containers under the system bars (`safe_area`)
//!
//! # Reactivity
//!
//! When called from a derived, reading the layout arrays creates
//! dependencies. The layout derived re-runs when any layout property changes.
//!
//! # Example
//!
//! ```ignore
//! use safe_layout::layout::{compute_layout, Viewport};
//! use spark_signals::derived;
//!
//! let layout = derived(|| compute_layout(&Viewport::full_screen(375.0, 667.0)));
//! ```

mod types;
mod text_measure;
mod taffy_bridge;
mod safe_area;

pub use types::*;
pub use text_measure::*;
pub use taffy_bridge::{BUTTON_PADDING, compute_layout, try_compute_layout};
pub use safe_area::{EDGE_EPSILON, apply_safe_area};
