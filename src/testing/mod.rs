//! Layout test harness.
//!
//! - [`geometry`] - frame edges of a view, in dips
//! - [`assertions`] - comparison primitives returning [`AssertionError`]
//! - [`wait`] - mount, poll until the layout is valid, unmount
//! - [`scenarios`] - the safe-area scenarios and a runner reporting each outcome

pub mod assertions;
pub mod geometry;
pub mod scenarios;
pub mod wait;

use std::time::Duration;

use thiserror::Error;

use crate::error::{BuildError, LayoutError};

pub use assertions::{AssertionError, AssertionResult};
pub use scenarios::{Outcome, SCENARIOS, ScenarioReport, run_all};
pub use wait::{HasRoot, execute_snippet, wait_until_ready};

/// Why a scenario did not pass.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("build failed: {0}")]
    Build(#[from] BuildError),

    #[error(transparent)]
    Assertion(#[from] AssertionError),

    #[error("{view} layout not valid after {timeout:?}")]
    Timeout { view: String, timeout: Duration },

    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("no view with id {0:?}")]
    MissingView(&'static str),
}
