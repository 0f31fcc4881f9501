//! Polling helpers.
//!
//! Layout runs on the run loop, so a test mounts its tree and then polls,
//! ticking the loop once per poll, until the root reports a valid layout.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::pipeline::mount::{MountHandle, mount, tick};
use crate::view::View;
use super::ScenarioError;

/// How long to wait for a valid layout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Pause between polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Poll `ready`, calling `tick` between polls, until it holds or `timeout`
/// elapses.
///
/// Returns `Ok(false)` on timeout. Errors from `tick` end the wait.
pub fn wait_until_ready<E>(
    mut ready: impl FnMut() -> bool,
    timeout: Duration,
    mut tick: impl FnMut() -> Result<(), E>,
) -> Result<bool, E> {
    let start = Instant::now();
    loop {
        if ready() {
            return Ok(true);
        }
        if start.elapsed() >= timeout {
            return Ok(false);
        }
        tick()?;
        if ready() {
            return Ok(true);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// A scenario's view handles.
pub trait HasRoot {
    fn root(&self) -> View;
}

/// Mount `ui.root()`, wait for its layout, then run `test`.
///
/// The tree is unmounted afterwards whatever the outcome.
pub fn execute_snippet<U: HasRoot>(
    ui: U,
    setup: impl FnOnce(&U),
    test: impl FnOnce(&U) -> Result<(), ScenarioError>,
) -> Result<(), ScenarioError> {
    setup(&ui);

    let handle = mount(ui.root());
    let result = run_mounted(&handle, &ui, test);
    handle.unmount();
    result
}

fn run_mounted<U: HasRoot>(
    handle: &MountHandle,
    ui: &U,
    test: impl FnOnce(&U) -> Result<(), ScenarioError>,
) -> Result<(), ScenarioError> {
    let root = ui.root();
    let ready = wait_until_ready(
        || root.is_layout_valid(),
        DEFAULT_TIMEOUT,
        || tick(handle).map(|ran| debug!(%root, ran, "tick")),
    )?;

    if !ready {
        warn!(%root, "layout never became valid");
        return Err(ScenarioError::Timeout {
            view: root.to_string(),
            timeout: DEFAULT_TIMEOUT,
        });
    }

    test(ui)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_ready_immediately() {
        let ticks = Cell::new(0);
        let ready = wait_until_ready::<()>(
            || true,
            DEFAULT_TIMEOUT,
            || {
                ticks.set(ticks.get() + 1);
                Ok(())
            },
        );
        assert_eq!(ready, Ok(true));
        assert_eq!(ticks.get(), 0);
    }

    #[test]
    fn test_ready_after_ticks() {
        let ticks = Cell::new(0);
        let ready = wait_until_ready::<()>(
            || ticks.get() >= 3,
            DEFAULT_TIMEOUT,
            || {
                ticks.set(ticks.get() + 1);
                Ok(())
            },
        );
        assert_eq!(ready, Ok(true));
        assert_eq!(ticks.get(), 3);
    }

    #[test]
    fn test_timeout() {
        let ready = wait_until_ready::<()>(|| false, Duration::from_millis(30), || Ok(()));
        assert_eq!(ready, Ok(false));
    }

    #[test]
    fn test_tick_error_ends_wait() {
        let ready = wait_until_ready(|| false, DEFAULT_TIMEOUT, || Err("boom"));
        assert_eq!(ready, Err("boom"));
    }
}
