//! Memoized dataset loading.
//!
//! A source file is assumed not to change while the process runs, so the first
//! successful load of a path is kept for the lifetime of the cache and handed
//! out as a shared, read-only `Arc<Dataset>`. There is no invalidation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::domain::Dataset;
use crate::io::ingest::{LoadError, load_dataset};

#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first use.
    ///
    /// Failed loads are not cached; a later call retries.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        let key = source_key(path);
        if let Some(dataset) = self.entries.get(&key) {
            debug!(path = %key.display(), "dataset cache hit");
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(load_dataset(path)?);
        self.entries.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source identity: the canonical path when it resolves, else the path as given.
fn source_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "country,date,total_cases,new_deaths,total_deaths,population").unwrap();
        writeln!(file, "A,2021-01-01,10,1,1,1000").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn repeated_loads_share_one_dataset() {
        let file = write_csv();
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(file.path()).unwrap();
        let second = cache.get_or_load(file.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cached_dataset_survives_file_changes() {
        let mut file = write_csv();
        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(file.path()).unwrap();

        writeln!(file, "B,2021-01-01,5,0,0,500").unwrap();
        file.flush().unwrap();

        let second = cache.get_or_load(file.path()).unwrap();
        assert_eq!(second.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.csv");
        let mut cache = DatasetCache::new();

        assert!(matches!(
            cache.get_or_load(&path),
            Err(LoadError::SourceMissing { .. })
        ));
        assert!(cache.is_empty());

        std::fs::write(
            &path,
            "country,date,total_cases,new_deaths,total_deaths,population\nA,2021-01-01,1,0,0,1\n",
        )
        .unwrap();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);
    }
}
