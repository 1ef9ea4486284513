//! Admission control for outbound translation calls.
//!
//! A `RateLimiter` hands out a fixed number of `RateToken`s. A token is
//! returned when it is dropped, so it goes back exactly once on every exit
//! path of the task holding it, including a panic unwinding through it.

use crate::error::{MtError, MtResult};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounds the number of concurrent in-flight translation calls
///
/// Clones share the same token store, so a single limiter can gate every
/// table of every language in a run.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One unit of admission, returned to its limiter on drop
#[derive(Debug)]
#[must_use = "dropping a RateToken releases it immediately"]
pub struct RateToken {
    _permit: OwnedSemaphorePermit,
}

impl RateLimiter {
    /// Create a limiter with `capacity` tokens available
    ///
    /// # Errors
    ///
    /// `ConfigError` if `capacity` is zero, since nothing could ever be
    /// dispatched.
    pub fn new(capacity: usize) -> MtResult<Self> {
        if capacity == 0 {
            return Err(MtError::ConfigError(
                "Rate limiter capacity must be at least 1".to_string(),
            ));
        }
        if capacity > Semaphore::MAX_PERMITS {
            return Err(MtError::ConfigError(format!(
                "Rate limiter capacity must not exceed {}",
                Semaphore::MAX_PERMITS
            )));
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// Wait until a token is free and take it
    pub async fn acquire(&self) -> RateToken {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("rate limiter semaphore is never closed");
        RateToken { _permit: permit }
    }

    /// Give a token back; equivalent to dropping it
    pub fn release(&self, token: RateToken) {
        drop(token);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tokens not currently borrowed
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
