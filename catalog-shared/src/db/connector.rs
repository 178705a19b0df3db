/// Connect-and-retry loop for the database
///
/// `connect` keeps probing the database until it answers, waiting a fixed
/// delay between attempts. There is no attempt limit and the delay never grows.
/// The wait is a tokio timer, so the loop can run as a background task next to
/// the HTTP server without holding a worker thread.

use sqlx::PgPool;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

use super::pool::health_check;

/// Delay between connection attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(5000);

/// Runs `op` until it succeeds, sleeping `delay` after every failure
///
/// Returns the successful value together with the number of attempts made.
pub async fn retry_forever<F, Fut, T, E>(delay: Duration, mut op: F) -> (T, u64)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;

        match op().await {
            Ok(value) => return (value, attempts),
            Err(err) => {
                warn!(
                    attempt = attempts,
                    error = %err,
                    "Connecting in {}ms .....",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Blocks until the database behind `pool` answers a health check
///
/// Returns the number of attempts it took.
pub async fn connect(pool: &PgPool, delay: Duration) -> u64 {
    let ((), attempts) = retry_forever(delay, || health_check(pool)).await;
    info!(attempts, "Connected");
    attempts
}
