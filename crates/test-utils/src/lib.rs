//! Shared helpers for linksync integration tests.

pub mod builders;
pub mod fakes;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for any single async wait in a test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_STEP: Duration = Duration::from_millis(10);

static TRACING: Once = Once::new();

/// Route `tracing` output into the test harness capture.
///
/// Reads the same `LINKSYNC_LOG` filter as the binary and stays quiet
/// (`warn`) otherwise.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_env("LINKSYNC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Await `fut`, panicking if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F: Future>(fut: F) -> F::Output {
    match tokio::time::timeout(TEST_TIMEOUT, fut).await {
        Ok(out) => out,
        Err(_) => panic!("timed out after {TEST_TIMEOUT:?}"),
    }
}

/// Re-check `cond` every few milliseconds until it holds or the test times out.
pub async fn wait_until(cond: impl Fn() -> bool) {
    with_timeout(async {
        while !cond() {
            tokio::time::sleep(POLL_STEP).await;
        }
    })
    .await
}
