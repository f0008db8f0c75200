//! Process-lifetime memoization of loaded classifiers.
//!
//! An artifact is read from disk at most once per path; later loads of the
//! same path return the already-shared handle. Failed loads are not
//! memoized, so a missing file can be supplied and retried. Handles are
//! never evicted; they live until process exit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use log::debug;

use crate::model::{Classifier, ModelError};

/// Path-keyed cache of loaded classifiers.
///
/// Paths are keyed as supplied — no canonicalization — so `model.json` and
/// `./model.json` load separately.
#[derive(Default)]
pub struct ModelCache {
    loaded: Mutex<HashMap<PathBuf, Arc<Classifier>>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached handle for `path`, loading it on first use.
    ///
    /// The map lock is held across the disk read, so concurrent first loads
    /// of the same path still read the file exactly once.
    pub fn load(&self, path: &Path) -> Result<Arc<Classifier>, ModelError> {
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = loaded.get(path) {
            debug!("classifier cache hit for {}", path.display());
            return Ok(Arc::clone(handle));
        }
        let handle = Arc::new(Classifier::load(path)?);
        loaded.insert(path.to_path_buf(), Arc::clone(&handle));
        Ok(handle)
    }
}

/// Load through the process-global cache.
///
/// The cache itself initializes lazily on first call and is written through
/// the `Mutex` inside `ModelCache`; nothing else mutates it.
pub fn load(path: &Path) -> Result<Arc<Classifier>, ModelError> {
    static CACHE: OnceLock<ModelCache> = OnceLock::new();
    CACHE.get_or_init(ModelCache::new).load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_NAMES;
    use std::io::Write;

    fn write_artifact(file: &mut tempfile::NamedTempFile) {
        let doc = serde_json::json!({
            "name": "framingham_chd",
            "version": "1.0",
            "feature_names": FEATURE_NAMES,
            "classifier": {
                "kind": "linear_margin",
                "weights": vec![0.0; 12],
                "bias": 0.0,
            },
        });
        file.write_all(doc.to_string().as_bytes()).unwrap();
        file.flush().unwrap();
    }

    #[test]
    fn second_load_returns_the_same_handle() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write_artifact(&mut tmp);

        let cache = ModelCache::new();
        let first = cache.load(tmp.path()).unwrap();
        let second = cache.load(tmp.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn cache_hit_survives_artifact_deletion() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write_artifact(&mut tmp);

        let cache = ModelCache::new();
        let path = tmp.path().to_path_buf();
        let first = cache.load(&path).unwrap();

        // Once memoized, the handle no longer depends on the file.
        drop(tmp);
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_path_fails_and_is_not_memoized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let cache = ModelCache::new();
        let err = cache.load(&path).unwrap_err();
        assert!(matches!(err, ModelError::NotFound { .. }));

        // Supplying the artifact afterwards makes the same path loadable.
        let doc = serde_json::json!({
            "name": "framingham_chd",
            "version": "1.0",
            "feature_names": FEATURE_NAMES,
            "classifier": {
                "kind": "linear_margin",
                "weights": vec![0.0; 12],
                "bias": 0.0,
            },
        });
        std::fs::write(&path, doc.to_string()).unwrap();
        assert!(cache.load(&path).is_ok());
    }

    #[test]
    fn distinct_paths_load_distinct_handles() {
        let mut a = tempfile::NamedTempFile::new().unwrap();
        let mut b = tempfile::NamedTempFile::new().unwrap();
        write_artifact(&mut a);
        write_artifact(&mut b);

        let cache = ModelCache::new();
        let first = cache.load(a.path()).unwrap();
        let second = cache.load(b.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
