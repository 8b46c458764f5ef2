//! Gesture builder for programmatic gesture creation.

use heapless::{String, Vec};

use crate::config::{GestureConfig, Percent, Pose};
use crate::error::{Error, GestureError, Result};

/// Maximum number of poses in a gesture.
pub const MAX_POSES: usize = 16;

/// Builder for gestures: call [`pose`](Self::pose) to start each pose, then
/// [`finger`](Self::finger) for every finger it moves.
///
/// ```rust,ignore
/// let peace = GestureBuilder::new()
///     .pose()
///     .finger("thumb", Percent::MAX)
///     .finger("ring", Percent::MAX)
///     .finger("pinky", Percent::MAX)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct GestureBuilder {
    poses: Vec<Pose, MAX_POSES>,
    overflow: Option<&'static str>,
}

impl GestureBuilder {
    /// Create a new gesture builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new pose.
    pub fn pose(mut self) -> Self {
        if self.poses.push(Pose::new()).is_err() {
            self.overflow.get_or_insert("poses");
        }
        self
    }

    /// Add a finger target to the current pose, starting one if needed.
    pub fn finger(mut self, finger: &str, target: Percent) -> Self {
        if self.poses.is_empty() {
            self = self.pose();
        }
        let Ok(name) = String::try_from(finger) else {
            self.overflow.get_or_insert("name");
            return self;
        };
        if let Some(pose) = self.poses.last_mut() {
            if pose.insert(name, target).is_err() {
                self.overflow.get_or_insert("fingers");
            }
        }
        self
    }

    /// Build the gesture configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any capacity was exceeded or no finger was given.
    pub fn build(self) -> Result<GestureConfig> {
        if let Some(what) = self.overflow {
            return Err(Error::Gesture(GestureError::Capacity(what)));
        }
        if self.poses.iter().all(|pose| pose.is_empty()) {
            return Err(Error::Gesture(GestureError::Empty(String::new())));
        }
        Ok(GestureConfig { poses: self.poses })
    }
}
