use std::time::Duration;
use tokio::time::Instant;

/// Cooperative pacing between consecutive provider calls.
///
/// Not a defence against concurrent callers: one throttle belongs to one
/// sequential batch.
#[derive(Debug)]
pub struct Throttle {
    min_delay: Duration,
    last_call: Option<Instant>,
}

impl Throttle {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_call: None,
        }
    }

    /// Wait until `min_delay` has passed since the previous call, then
    /// record the current instant as the new previous call.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_call {
            let ready_at = last + self.min_delay;
            if Instant::now() < ready_at {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        self.last_call = Some(Instant::now());
    }
}
