use crate::artifact::ModelArtifact;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Process-wide cache of loaded model artifacts, keyed by canonical path.
///
/// Loading the artifact on every pipeline run is wasteful but not incorrect;
/// callers that care hold one `ModelStore` for the session and share the
/// returned `Arc`s.
pub struct ModelStore {
    cache: Mutex<HashMap<PathBuf, Arc<ModelArtifact>>>,
}

impl ModelStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the artifact at `path`, loading it on first use.
    ///
    /// # Errors
    /// Returns an error if the path cannot be resolved or the artifact fails
    /// to load or validate.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Arc<ModelArtifact>> {
        let key = self.cache_key(path.as_ref())?;

        let mut cache = self.cache.lock().expect("model cache poisoned");
        if let Some(artifact) = cache.get(&key) {
            return Ok(Arc::clone(artifact));
        }

        let artifact = Arc::new(ModelArtifact::from_json_path(&key)?);
        tracing::info!(model = %artifact.name, path = %key.display(), "model artifact loaded");
        cache.insert(key, Arc::clone(&artifact));
        Ok(artifact)
    }

    /// Re-reads the artifact from disk, replacing any cached copy.
    ///
    /// # Errors
    /// Returns an error if the path cannot be resolved or the artifact fails
    /// to load or validate.
    pub fn reload<P: AsRef<Path>>(&self, path: P) -> Result<Arc<ModelArtifact>> {
        let key = self.cache_key(path.as_ref())?;
        let artifact = Arc::new(ModelArtifact::from_json_path(&key)?);

        let mut cache = self.cache.lock().expect("model cache poisoned");
        cache.insert(key, Arc::clone(&artifact));
        Ok(artifact)
    }

    fn cache_key(&self, path: &Path) -> Result<PathBuf> {
        path.canonicalize()
            .with_context(|| format!("Failed to resolve model artifact path: {}", path.display()))
    }
}

impl Default for ModelStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_artifact(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            br#"{
                "name": "cached",
                "feature_names": ["DEMANDA_T_1"],
                "intercept": 1.0,
                "coefficients": [0.9]
            }"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn load_caches_by_path() {
        let dir = std::env::temp_dir().join("replenish-model-store-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = write_artifact(&dir, "cached.json");

        let store = ModelStore::new();
        let first = store.load(&path).unwrap();
        let second = store.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));

        let reloaded = store.reload(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &reloaded));
        assert_eq!(reloaded.name, "cached");
    }

    #[test]
    fn load_missing_path_fails() {
        let store = ModelStore::new();
        assert!(store.load("does/not/exist.json").is_err());
    }
}
