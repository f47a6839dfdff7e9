//! In-flight registry: at most one running install per destination path.
//!
//! Installs write to a fixed path derived from the app name, so two
//! concurrent operations for the same app would race on the same file.
//! The registry hands out an RAII claim per destination; a second claim
//! for the same path is refused until the first guard drops.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared set of destination paths with an install in flight.
#[derive(Debug, Clone, Default)]
pub struct InflightRegistry {
    inner: Arc<Mutex<HashSet<PathBuf>>>,
}

impl InflightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `dest` for a new operation.
    ///
    /// Returns `None` while another operation holds the claim. The claim
    /// is released when the returned guard drops, whichever way the
    /// operation terminates.
    pub fn try_claim(&self, dest: &Path) -> Option<InflightGuard> {
        let mut held = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if !held.insert(dest.to_path_buf()) {
            return None;
        }
        Some(InflightGuard {
            registry: Arc::clone(&self.inner),
            dest: dest.to_path_buf(),
        })
    }

    /// Whether `dest` currently has an operation in flight.
    pub fn is_claimed(&self, dest: &Path) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(dest)
    }
}

/// Releases its destination claim on drop.
#[derive(Debug)]
pub struct InflightGuard {
    registry: Arc<Mutex<HashSet<PathBuf>>>,
    dest: PathBuf,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_and_release() {
        let registry = InflightRegistry::new();
        let dest = Path::new("/tmp/app.exe");

        let guard = registry.try_claim(dest);
        assert!(guard.is_some());
        assert!(registry.is_claimed(dest));

        drop(guard);
        assert!(!registry.is_claimed(dest));
    }

    #[test]
    fn test_second_claim_refused_while_held() {
        let registry = InflightRegistry::new();
        let dest = Path::new("/tmp/app.exe");

        let first = registry.try_claim(dest);
        assert!(first.is_some());
        assert!(registry.try_claim(dest).is_none());

        drop(first);
        assert!(registry.try_claim(dest).is_some());
    }

    #[test]
    fn test_distinct_destinations_are_independent() {
        let registry = InflightRegistry::new();

        let a = registry.try_claim(Path::new("/tmp/a.exe"));
        let b = registry.try_claim(Path::new("/tmp/b.exe"));
        assert!(a.is_some());
        assert!(b.is_some());
    }

    #[test]
    fn test_clones_share_claims() {
        let registry = InflightRegistry::new();
        let clone = registry.clone();
        let dest = Path::new("/tmp/shared.exe");

        let _guard = registry.try_claim(dest);
        assert!(clone.try_claim(dest).is_none());
        assert!(clone.is_claimed(dest));
    }
}
