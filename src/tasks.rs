use log::{info, warn};
use std::fmt::Display;
use std::future::Future;
use tokio::task::JoinHandle;

/// Runs a side effect nobody waits for. The outcome is logged, never returned.
pub fn spawn_detached<F, T, E>(label: &'static str, task: F) -> JoinHandle<()>
    where F: Future<Output = Result<T, E>> + Send + 'static, T: Send + 'static, E: Display + Send + 'static
{
    tokio::spawn(async move {
        match task.await {
            Ok(_) => info!("Detached task '{}' completed", label),
            Err(e) => warn!("Detached task '{}' failed: {}", label, e),
        }
    })
}
