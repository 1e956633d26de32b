//! JSON file store
//!
//! The whole schedule lives in one JSON file and every save replaces it. A
//! single async mutex serializes loads, saves and load-modify-save sequences,
//! so concurrent requests in this process cannot lose each other's updates.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::model::Schedule;

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored schedule. A missing file is an error, not an empty schedule.
    pub async fn load(&self) -> Result<Schedule> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Replace the stored schedule
    pub async fn save(&self, schedule: &Schedule) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write(schedule).await
    }

    /// Load, transform and save while holding the store lock.
    ///
    /// `f` returns `None` to leave the file untouched. Returns the schedule that
    /// was written, if any. Nothing is persisted when `f` fails.
    pub async fn update<F>(&self, f: F) -> Result<Option<Schedule>>
    where
        F: FnOnce(Schedule) -> Result<Option<Schedule>>,
    {
        let _guard = self.lock.lock().await;
        let current = self.read().await?;

        match f(current)? {
            Some(updated) => {
                self.write(&updated).await?;
                Ok(Some(updated))
            }
            None => Ok(None),
        }
    }

    async fn read(&self) -> Result<Schedule> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| ScheduleError::Io {
                path: self.path.clone(),
                source,
            })?;

        let schedule: Schedule =
            serde_json::from_slice(&bytes).map_err(|source| ScheduleError::Format {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "Loaded {} people from {}",
            schedule.people.len(),
            self.path.display()
        );
        Ok(schedule)
    }

    // Written to a sibling file first and renamed over the target, so a reader
    // never sees a half-written document.
    async fn write(&self, schedule: &Schedule) -> Result<()> {
        let bytes = serde_json::to_vec(schedule)?;
        let tmp = self.temp_path();

        let io_err = |source: std::io::Error| ScheduleError::Io {
            path: self.path.clone(),
            source,
        };
        let written = match tokio::fs::write(&tmp, &bytes).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_err(e));
        }

        debug!(
            "Saved {} people to {}",
            schedule.people.len(),
            self.path.display()
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("schedule"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Drug, Person};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn sample() -> Schedule {
        Schedule::new(vec![
            Person::new(
                "Zed",
                vec![
                    Drug::new("Vitamin", "08:00").with_comment("after breakfast"),
                    Drug::new("Iron", "12:00").completed(true),
                ],
            ),
            Person::new("Amy", vec![Drug::new("Zinc", "21:15")]),
        ])
    }

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("settings.json"))
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&sample()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), sample());
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_failed_save_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        // A non-empty directory at the target path makes the rename fail
        std::fs::create_dir(store.path()).unwrap();
        std::fs::write(store.path().join("keep"), "x").unwrap();

        let err = store.save(&sample()).await.unwrap_err();
        assert!(matches!(err, ScheduleError::Io { .. }));
        assert!(!store.temp_path().exists());
        assert!(store.path().join("keep").exists());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, ScheduleError::Io { .. }));
    }

    #[tokio::test]
    async fn test_invalid_content_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(store.path(), r#"{"personName": "not an array"}"#).unwrap();
        assert!(matches!(
            store.load().await,
            Err(ScheduleError::Format { .. })
        ));

        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(
            store.load().await,
            Err(ScheduleError::Format { .. })
        ));
    }

    #[tokio::test]
    async fn test_reads_original_wire_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(
            store.path(),
            r#"[{"personName":"Alice","drugs":[{"name":"Vitamin","time":"08:00","comment":"","status":true}]}]"#,
        )
        .unwrap();

        let schedule = store.load().await.unwrap();
        assert_eq!(
            schedule,
            Schedule::new(vec![Person::new(
                "Alice",
                vec![Drug::new("Vitamin", "08:00").completed(true)],
            )])
        );
    }

    #[tokio::test]
    async fn test_update_none_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&sample()).await.unwrap();
        let before = std::fs::read(store.path()).unwrap();

        let written = store.update(|_| Ok(None)).await.unwrap();
        assert!(written.is_none());
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_update_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&sample()).await.unwrap();

        let result = store
            .update(|_| Err(ScheduleError::DuplicatePerson("Amy".into())))
            .await;
        assert!(result.is_err());
        assert_eq!(store.load().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));
        store
            .save(&Schedule::new(vec![Person::new("Alice", vec![])]))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .update(|mut schedule| {
                        schedule.people[0]
                            .drugs
                            .push(Drug::new(format!("d{}", i), "08:00"));
                        Ok(Some(schedule))
                    })
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let schedule = store.load().await.unwrap();
        assert_eq!(schedule.people[0].drugs.len(), 16);
    }
}
