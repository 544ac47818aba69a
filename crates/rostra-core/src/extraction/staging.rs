use crate::error::RostraError;
use std::path::{Component, Path, PathBuf};

/// Object storage used to stage documents for asynchronous recognition.
pub trait StagingStore: Send + Sync {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), RostraError>;

    fn get(&self, key: &str) -> Result<Vec<u8>, RostraError>;

    /// All keys starting with `prefix`, sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>, RostraError>;
}

/// Object keys for one document, scoped by a correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingKeys {
    pub correlation_id: String,
    pub upload_key: String,
    pub output_prefix: String,
}

impl StagingKeys {
    pub fn new(correlation_id: impl Into<String>) -> Self {
        let correlation_id = correlation_id.into();
        StagingKeys {
            upload_key: format!("uploads/{correlation_id}.pdf"),
            output_prefix: format!("ocr_results/{correlation_id}/"),
            correlation_id,
        }
    }

    /// Keys under a fresh random id.
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Staging store backed by a local directory. Keys map to relative paths.
pub struct FsStagingStore {
    root: PathBuf,
}

impl FsStagingStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsStagingStore { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, RostraError> {
        let rel = Path::new(key);
        let safe = !key.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(RostraError::Staging {
                key: key.to_string(),
                reason: "key must be a relative path without '..'".into(),
            });
        }
        Ok(self.root.join(rel))
    }

    fn staging_err(key: &str, e: std::io::Error) -> RostraError {
        RostraError::Staging {
            key: key.to_string(),
            reason: e.to_string(),
        }
    }
}

impl StagingStore for FsStagingStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), RostraError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Self::staging_err(key, e))?;
        }
        std::fs::write(&path, bytes).map_err(|e| Self::staging_err(key, e))
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, RostraError> {
        let path = self.path_for(key)?;
        std::fs::read(&path).map_err(|e| Self::staging_err(key, e))
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, RostraError> {
        let mut keys = Vec::new();
        if self.root.is_dir() {
            collect_keys(&self.root, &self.root, &mut keys)
                .map_err(|e| Self::staging_err(prefix, e))?;
        }
        keys.retain(|k| k.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }
}

fn collect_keys(root: &Path, dir: &Path, out: &mut Vec<String>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_keys(root, &path, out)?;
        } else if let Ok(rel) = path.strip_prefix(root) {
            let key: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            out.push(key.join("/"));
        }
    }
    Ok(())
}
