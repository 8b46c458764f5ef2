//! Cooperative stop requests for in-flight motion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag asking motors to stop after the partial step in flight.
///
/// Clones share one flag. A motor holding a requested signal refuses further
/// partial steps with `MotorError::Interrupted` until the flag is cleared.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// Create a cleared signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every motor sharing this signal to stop.
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Allow motion again.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Whether a stop has been requested.
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
