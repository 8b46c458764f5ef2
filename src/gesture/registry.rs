//! Gesture registry for named gesture lookup.

use heapless::{FnvIndexMap, String};

use crate::config::{GestureConfig, HandConfig};
use crate::error::{Error, GestureError, Result};

/// Maximum number of gestures in the registry.
pub const MAX_GESTURES: usize = 16;

/// Registry for named gestures.
#[derive(Debug, Default)]
pub struct GestureRegistry {
    gestures: FnvIndexMap<String<32>, GestureConfig, MAX_GESTURES>,
}

impl GestureRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the gestures of a HandConfig.
    ///
    /// # Errors
    ///
    /// Fails on the first gesture [`register`](Self::register) rejects.
    pub fn from_config(config: &HandConfig) -> Result<Self> {
        let mut registry = Self::new();
        for (name, gesture) in &config.gestures {
            registry.register(name.as_str(), gesture.clone())?;
        }
        Ok(registry)
    }

    /// Register a gesture with a name, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is too long, the registry is full or the
    /// gesture has no poses.
    pub fn register(&mut self, name: &str, gesture: GestureConfig) -> Result<()> {
        let key = String::try_from(name)
            .map_err(|_| Error::Gesture(GestureError::Capacity("name")))?;

        if gesture.poses.iter().all(|pose| pose.is_empty()) {
            return Err(Error::Gesture(GestureError::Empty(key)));
        }

        self.gestures
            .insert(key, gesture)
            .map_err(|_| Error::Gesture(GestureError::Capacity("registry")))?;

        Ok(())
    }

    /// Get a gesture by name.
    pub fn get(&self, name: &str) -> Option<&GestureConfig> {
        let key = String::try_from(name).ok()?;
        self.gestures.get(&key)
    }

    /// Get a gesture by name, failing with `GestureError::NotFound`.
    pub fn require(&self, name: &str) -> Result<&GestureConfig> {
        self.get(name).ok_or_else(|| {
            Error::Gesture(GestureError::NotFound(
                String::try_from(name).unwrap_or_default(),
            ))
        })
    }

    /// Check if a gesture exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a gesture by name.
    pub fn remove(&mut self, name: &str) -> Option<GestureConfig> {
        let key = String::try_from(name).ok()?;
        self.gestures.remove(&key)
    }

    /// Get the number of registered gestures.
    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    /// Get an iterator over gesture names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.gestures.keys().map(|s| s.as_str())
    }
}
