//! One-file-per-conversation JSON store.
//!
//! Records live at `<data_dir>/<id>.json` as pretty-printed JSON. Each write
//! goes through its own uniquely named temporary file in the same directory
//! and is renamed into place, so a reader never sees a half-written record.
//! Concurrent writes to one id are last-write-wins.

use async_trait::async_trait;
use council_application::ports::conversation_store::{ConversationStore, StoreError};
use council_domain::{ConversationSummary, PersistedRecord};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const RECORD_EXTENSION: &str = "json";

/// [`ConversationStore`] backed by a directory of JSON files
#[derive(Debug, Clone)]
pub struct JsonFileConversationStore {
    data_dir: PathBuf,
}

impl JsonFileConversationStore {
    /// The directory is created lazily on the first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File for `id`, or `None` if `id` could escape the data directory.
    fn record_path(&self, id: &str) -> Option<PathBuf> {
        is_safe_id(id).then(|| self.data_dir.join(format!("{}.{}", id, RECORD_EXTENSION)))
    }
}

/// Write `contents` to a fresh temporary file in `dir`, then rename it over
/// `target`.
fn write_atomically(dir: &Path, target: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && !id.contains(['/', '\\', '\0'])
        && !id.contains("..")
        && !id.starts_with('.')
}

#[async_trait]
impl ConversationStore for JsonFileConversationStore {
    async fn get(&self, id: &str) -> Result<Option<PersistedRecord>, StoreError> {
        let Some(path) = self.record_path(id) else {
            debug!("Rejected conversation id {:?}", id);
            return Ok(None);
        };

        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return Ok(None);
            }
        };

        let record = PersistedRecord::from_json(&json);
        if record.is_none() {
            warn!("Ignoring malformed conversation file {}", path.display());
        }
        Ok(record)
    }

    async fn put(&self, record: &PersistedRecord) -> Result<(), StoreError> {
        let path = self
            .record_path(&record.id)
            .ok_or_else(|| StoreError::InvalidId(record.id.clone()))?;

        tokio::fs::create_dir_all(&self.data_dir).await?;

        let json = record.to_json()?;
        let dir = self.data_dir.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &target, json.as_bytes()))
            .await
            .map_err(std::io::Error::other)??;

        debug!("Wrote {}", path.display());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let Some(path) = self.record_path(id) else {
            return Ok(false);
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<ConversationSummary>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.data_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }

            match tokio::fs::read_to_string(&path).await {
                Ok(json) => match PersistedRecord::from_json(&json) {
                    Some(record) => summaries.push(record.summary()),
                    None => warn!("Skipping malformed conversation file {}", path.display()),
                },
                Err(e) => warn!("Skipping unreadable {}: {}", path.display(), e),
            }
        }

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use council_domain::{AssistantMessage, CandidateAnswer, Message};

    fn record(id: &str) -> PersistedRecord {
        PersistedRecord {
            id: id.to_string(),
            title: format!("Question {}", id),
            created_at: Utc.with_ymd_and_hms(2025, 5, 6, 7, 8, 9).unwrap(),
            messages: vec![
                Message::User {
                    content: format!("Question {}", id),
                },
                Message::Assistant(AssistantMessage {
                    stage1: vec![CandidateAnswer::new("X", "x")],
                    ..Default::default()
                }),
            ],
        }
    }

    fn store() -> (tempfile::TempDir, JsonFileConversationStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileConversationStore::new(dir.path().join("conversations"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (_dir, store) = store();
        store.put(&record("c1")).await.unwrap();

        let loaded = store.get("c1").await.unwrap().unwrap();
        assert_eq!(loaded, record("c1"));
        assert!(store.data_dir().join("c1.json").exists());
        assert_eq!(std::fs::read_dir(store.data_dir()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_file_is_pretty_json() {
        let (_dir, store) = store();
        store.put(&record("c1")).await.unwrap();

        let raw = std::fs::read_to_string(store.data_dir().join("c1.json")).unwrap();
        assert!(raw.contains("\n  \"id\": \"c1\""));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (_dir, store) = store();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_corrupt_is_none() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.data_dir()).unwrap();
        std::fs::write(store.data_dir().join("bad.json"), "{ truncated").unwrap();
        std::fs::write(
            store.data_dir().join("partial.json"),
            r#"{"id": "partial", "title": "t"}"#,
        )
        .unwrap();

        assert!(store.get("bad").await.unwrap().is_none());
        assert!(store.get("partial").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unsafe_ids_are_absent() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("secret.json"), "{}").unwrap();

        assert!(store.get("../secret").await.unwrap().is_none());
        assert!(store.get("a/b").await.unwrap().is_none());
        assert!(store.get("").await.unwrap().is_none());
        assert!(!store.delete("../secret").await.unwrap());
        assert!(dir.path().join("secret.json").exists());
        assert!(matches!(
            store.put(&record("../escape")).await,
            Err(StoreError::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let (_dir, store) = store();
        store.put(&record("c1")).await.unwrap();

        assert!(store.delete("c1").await.unwrap());
        assert!(!store.delete("c1").await.unwrap());
        assert!(store.get("c1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_skips_bad_files() {
        let (_dir, store) = store();
        store.put(&record("c1")).await.unwrap();
        store.put(&record("c2")).await.unwrap();
        std::fs::write(store.data_dir().join("broken.json"), "not json").unwrap();
        std::fs::write(store.data_dir().join("notes.txt"), "ignored").unwrap();

        let mut ids: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[tokio::test]
    async fn test_list_without_directory_is_empty() {
        let (_dir, store) = store();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let (_dir, store) = store();
        store.put(&record("c1")).await.unwrap();

        let mut updated = record("c1");
        updated.title = "Renamed".to_string();
        store.put(&updated).await.unwrap();

        assert_eq!(store.get("c1").await.unwrap().unwrap().title, "Renamed");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_puts_to_one_id() {
        let (_dir, store) = store();
        let mut writers = tokio::task::JoinSet::new();
        for i in 0..16 {
            let store = store.clone();
            writers.spawn(async move {
                let mut version = record("c1");
                version.title = format!("Version {}", i);
                store.put(&version).await
            });
        }
        while let Some(result) = writers.join_next().await {
            result.unwrap().unwrap();
        }

        let stored = store.get("c1").await.unwrap().unwrap();
        assert!(stored.title.starts_with("Version "));
        assert_eq!(std::fs::read_dir(store.data_dir()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_naive_timestamp_file_is_listed() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.data_dir()).unwrap();
        std::fs::write(
            store.data_dir().join("old.json"),
            r#"{"id": "old", "title": "Legacy", "created_at": "2025-01-02T03:04:05.123456", "messages": []}"#,
        )
        .unwrap();

        let loaded = store.get("old").await.unwrap().unwrap();
        assert_eq!(loaded.title, "Legacy");
        assert_eq!(
            loaded.created_at,
            Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
                + chrono::Duration::microseconds(123456)
        );
        assert_eq!(store.list().await.unwrap()[0].id, "old");
    }
}
