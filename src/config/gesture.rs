//! Gesture configuration from TOML.

use heapless::{FnvIndexMap, String, Vec};
use serde::Deserialize;

use super::units::Percent;

/// Target positions for a set of fingers, reached together.
pub type Pose = FnvIndexMap<String<32>, Percent, 8>;

/// A named sequence of poses.
///
/// ```toml
/// [gestures.wave]
/// poses = [
///     { index = 100, middle = 100 },
///     { index = 0, middle = 0 },
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GestureConfig {
    /// Poses, applied in order.
    pub poses: Vec<Pose, 16>,
}

impl GestureConfig {
    /// Every finger named by any pose.
    pub fn fingers(&self) -> impl Iterator<Item = &str> {
        self.poses
            .iter()
            .flat_map(|pose| pose.keys().map(|k| k.as_str()))
    }
}
