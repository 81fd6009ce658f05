//! TCP reachability probes.

use std::time::Duration;

use tokio::net::TcpStream;

use crate::error::{ConnectError, Result};

const DIAL_TIMEOUT: Duration = Duration::from_millis(2000);
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Returns true if a TCP connection to `host_port` can be initialized.
///
/// Bounded by a 2 second dial timeout. The probe connection is dropped
/// immediately; every failure mode collapses to `false`.
pub async fn is_port_open(host_port: &str) -> bool {
    matches!(
        tokio::time::timeout(DIAL_TIMEOUT, TcpStream::connect(host_port)).await,
        Ok(Ok(_))
    )
}

/// Polls [`is_port_open`] until it succeeds, sleeping 1 second between
/// attempts.
///
/// Blocks forever if the destination never becomes reachable; use
/// [`wait_for_port_open_timeout`] when the caller needs a bounded wait.
pub async fn wait_for_port_open(host_port: &str) {
    while !is_port_open(host_port).await {
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Deadline-bounded variant of [`wait_for_port_open`].
pub async fn wait_for_port_open_timeout(host_port: &str, limit: Duration) -> Result<()> {
    let start = std::time::Instant::now();

    while start.elapsed() < limit {
        if is_port_open(host_port).await {
            return Ok(());
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    Err(ConnectError::NotReachable(format!(
        "timeout waiting for {}",
        host_port
    )))
}
