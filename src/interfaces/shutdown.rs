// Ctrl-C handling for long-running batches
use std::future::Future;
use tokio::sync::oneshot;

/// Spawn the Ctrl-C listener and return the receiving end.
///
/// If the signal handler cannot be installed the sender is dropped, which
/// `until_shutdown` treats as "never interrupted".
pub fn listen_for_ctrl_c() -> oneshot::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = shutdown_tx.send(());
            }
            Err(e) => eprintln!("Failed to listen for shutdown signal: {}", e),
        }
    });

    shutdown_rx
}

/// Drive `work` to completion unless a shutdown request arrives first.
///
/// Returns `None` when interrupted. A closed channel is not a request.
pub async fn until_shutdown<F: Future>(
    work: F,
    shutdown: oneshot::Receiver<()>,
) -> Option<F::Output> {
    tokio::select! {
        output = work => Some(output),
        Ok(()) = shutdown => None,
    }
}
