//! View Engine - registry and parallel arrays.
//!
//! The engine manages the core data structures:
//! - Registry: Index allocation, parent context, scoped id lookup
//! - Arrays: Parallel tracked arrays for view state
//!
//! # Architecture
//!
//! Views are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: GridLayout (parent=None, rows=[*, *], overflowSafeArea=true, ...)
//! Index 1: Label      (parent=0,    row=0, text="Top", ...)
//! Index 2: Button     (parent=0,    row=1, text="Bottom", ...)
//! ```
//!
//! Every write lands the index in the layout dirty set, which is how the
//! layout validity checks know a pass is still pending.

mod registry;
pub mod arrays;

pub use registry::*;
