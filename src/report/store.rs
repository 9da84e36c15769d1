use super::types::TestRecord;
use crate::error::{ReportError, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Directory holding one `<name>.json` file per test of the current run.
///
/// The store assumes exclusive access: a concurrent run sharing the same
/// directory may see files vanish between listing and reading.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a record with the given name is stored in
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ReportError::InvalidRecordName(name.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }

    /// Create the directory if needed and delete every file from a previous run
    pub fn reset(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| ReportError::io(&self.dir, e))?;

        let mut removed = 0;
        for entry in std::fs::read_dir(&self.dir).map_err(|e| ReportError::io(&self.dir, e))? {
            let path = entry.map_err(|e| ReportError::io(&self.dir, e))?.path();
            let removal = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };
            removal.map_err(|e| ReportError::io(&path, e))?;
            removed += 1;
        }

        info!("Reset report dir {} ({} entries removed)", self.dir.display(), removed);
        Ok(())
    }

    /// Write a record, replacing any earlier record of the same name
    pub fn save(&self, record: &TestRecord) -> Result<PathBuf> {
        let path = self.path_for(&record.name)?;
        let json = serde_json::to_string(record).map_err(|source| ReportError::Serialize {
            name: record.name.clone(),
            source,
        })?;
        std::fs::write(&path, json).map_err(|e| ReportError::io(&path, e))?;

        debug!("Saved test record {}", path.display());
        Ok(path)
    }

    /// Read every file in the directory, in listing order.
    ///
    /// `name`, `steps` and `jobs` are required. A missing `error` key is read
    /// as `null`, so such a record counts as passed. One malformed file fails
    /// the whole load.
    pub fn load_all(&self) -> Result<Vec<TestRecord>> {
        let mut records = Vec::new();

        for entry in std::fs::read_dir(&self.dir).map_err(|e| ReportError::io(&self.dir, e))? {
            let path = entry.map_err(|e| ReportError::io(&self.dir, e))?.path();
            if !path.is_file() {
                continue;
            }

            let content = std::fs::read_to_string(&path).map_err(|e| ReportError::io(&path, e))?;
            let record: TestRecord = serde_json::from_str(&content)
                .map_err(|source| ReportError::MalformedRecord { path: path.clone(), source })?;
            records.push(record);
        }

        debug!("Loaded {} test records from {}", records.len(), self.dir.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, error: Option<&str>) -> TestRecord {
        TestRecord {
            name: name.to_string(),
            steps: vec!["open app".to_string(), "tap login".to_string()],
            jobs: vec!["job-1".to_string()],
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        let original = record("test_login", Some("timeout"));
        store.save(&original).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, vec![original]);
        assert!(dir.path().join("test_login.json").is_file());
    }

    #[test]
    fn test_save_overwrites_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        store.save(&record("test_login", Some("timeout"))).unwrap();
        store.save(&record("test_login", None)).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].is_passed());
    }

    #[test]
    fn test_reset_creates_and_clears_dir() {
        let dir = tempfile::tempdir().unwrap();
        let report_dir = dir.path().join("report");
        let store = ReportStore::new(&report_dir);

        store.reset().unwrap();
        assert!(report_dir.is_dir());

        store.save(&record("a", None)).unwrap();
        store.save(&record("b", None)).unwrap();
        std::fs::write(report_dir.join("stray.txt"), "x").unwrap();

        store.reset().unwrap();
        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(std::fs::read_dir(&report_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_malformed_file_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        store.save(&record("good", None)).unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();

        match store.load_all() {
            Err(ReportError::MalformedRecord { path, .. }) => {
                assert_eq!(path, dir.path().join("bad.json"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        std::fs::write(dir.path().join("partial.json"), r#"{"name": "partial", "steps": []}"#)
            .unwrap();

        assert!(matches!(
            store.load_all(),
            Err(ReportError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_missing_error_key_loads_as_passed() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        std::fs::write(
            dir.path().join("no_error.json"),
            r#"{"name": "no_error", "steps": ["s1"], "jobs": []}"#,
        )
        .unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded[0].error, None);
        assert!(loaded[0].is_passed());
    }

    #[test]
    fn test_rejects_names_that_are_not_file_names() {
        let store = ReportStore::new("report");
        for name in ["", "a/b", "..", "a\\b"] {
            assert!(matches!(
                store.path_for(name),
                Err(ReportError::InvalidRecordName(_))
            ));
        }
        assert_eq!(
            store.path_for("test_login").unwrap(),
            Path::new("report").join("test_login.json")
        );
    }

    #[test]
    fn test_load_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("absent"));
        assert!(matches!(store.load_all(), Err(ReportError::Io { .. })));
    }
}
