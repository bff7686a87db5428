//! File-backed key/value store and the saved-lineup list kept in it.
//!
//! Every key is one file under the store root. Writes replace the whole
//! value: the new content goes to a temporary file that is then renamed over
//! the old one.

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::constants::storage_keys;
use crate::error::AppError;
use crate::lineup::SavedLineup;

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Reads the value stored under `key`, `None` if it was never set.
    pub async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.item_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).await?;
        }

        let path = self.item_path(key);
        let tmp_path = self.root.join(format!(".{key}.tmp"));
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(value.as_bytes()).await?;
        file.flush().await?;
        drop(file);
        fs::rename(&tmp_path, &path).await?;

        debug!("Stored {} bytes under '{key}'", value.len());
        Ok(())
    }

    pub async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        match fs::remove_file(self.item_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the saved-lineup list. A missing key is an empty list; a value
    /// that is not a valid list is reported rather than silently replaced.
    pub async fn saved_lineups(&self) -> Result<Vec<SavedLineup>, AppError> {
        match self.get_item(storage_keys::SAVED_LINEUPS).await? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                warn!("Saved lineups could not be parsed: {e}");
                AppError::storage_corrupt(storage_keys::SAVED_LINEUPS, e.to_string())
            }),
        }
    }

    async fn write_saved_lineups(&self, saved: &[SavedLineup]) -> Result<(), AppError> {
        let json = serde_json::to_string(saved)?;
        self.set_item(storage_keys::SAVED_LINEUPS, &json).await
    }

    /// Appends `lineup` to the end of the list and returns the new length.
    pub async fn append_saved_lineup(&self, lineup: SavedLineup) -> Result<usize, AppError> {
        let mut saved = self.saved_lineups().await?;
        info!("Saving lineup '{}' ({})", lineup.name, lineup.formation);
        saved.push(lineup);
        self.write_saved_lineups(&saved).await?;
        Ok(saved.len())
    }

    pub async fn saved_lineup(&self, index: usize) -> Result<Option<SavedLineup>, AppError> {
        Ok(self.saved_lineups().await?.into_iter().nth(index))
    }

    /// Removes the entry at `index`, keeping the others in order. Returns the
    /// removed entry, or `None` when the index is out of range.
    pub async fn delete_saved_lineup(
        &self,
        index: usize,
    ) -> Result<Option<SavedLineup>, AppError> {
        let mut saved = self.saved_lineups().await?;
        if index >= saved.len() {
            warn!(
                "Ignoring delete of saved lineup {index}, only {} stored",
                saved.len()
            );
            return Ok(None);
        }
        let removed = saved.remove(index);
        self.write_saved_lineups(&saved).await?;
        info!("Deleted saved lineup '{}'", removed.name);
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::Player;
    use crate::lineup::Lineup;
    use chrono::Utc;
    use tempfile::tempdir;

    fn saved(name: &str) -> SavedLineup {
        SavedLineup {
            name: name.to_string(),
            formation: "4-4-2".to_string(),
            league: "39".to_string(),
            season: "2024".to_string(),
            players: [(0, Player::new(1, "Manuel Neuer", "Goalkeeper", "Team 2"))]
                .into_iter()
                .collect::<Lineup>(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_missing_item_is_none() {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path().join("storage"));
        assert_eq!(store.get_item("api_football_key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove_item() {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path().join("nested").join("storage"));

        store.set_item("api_football_key", "abc123").await.unwrap();
        assert_eq!(
            store.get_item("api_football_key").await.unwrap().as_deref(),
            Some("abc123")
        );

        store.set_item("api_football_key", "def456").await.unwrap();
        assert_eq!(
            store.get_item("api_football_key").await.unwrap().as_deref(),
            Some("def456")
        );

        store.remove_item("api_football_key").await.unwrap();
        assert_eq!(store.get_item("api_football_key").await.unwrap(), None);
        store.remove_item("api_football_key").await.unwrap();
    }

    #[tokio::test]
    async fn test_append_and_list_saved_lineups() {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path());

        assert!(store.saved_lineups().await.unwrap().is_empty());
        assert_eq!(store.append_saved_lineup(saved("First")).await.unwrap(), 1);
        assert_eq!(store.append_saved_lineup(saved("Second")).await.unwrap(), 2);

        let names: Vec<String> = store
            .saved_lineups()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(
            store.saved_lineup(1).await.unwrap().map(|s| s.name),
            Some("Second".to_string())
        );
        assert!(store.saved_lineup(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_preserves_order_of_rest() {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path());
        for name in ["A", "B", "C", "D"] {
            store.append_saved_lineup(saved(name)).await.unwrap();
        }

        let removed = store.delete_saved_lineup(1).await.unwrap();
        assert_eq!(removed.map(|s| s.name), Some("B".to_string()));

        let names: Vec<String> = store
            .saved_lineups()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["A", "C", "D"]);
    }

    #[tokio::test]
    async fn test_delete_out_of_range_is_noop() {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path());
        store.append_saved_lineup(saved("Only")).await.unwrap();

        assert!(store.delete_saved_lineup(5).await.unwrap().is_none());
        assert_eq!(store.saved_lineups().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_saved_lineups_reported() {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path());
        store
            .set_item(storage_keys::SAVED_LINEUPS, "{not json")
            .await
            .unwrap();

        let result = store.saved_lineups().await;
        assert!(matches!(result, Err(AppError::StorageCorrupt { .. })));

        let append = store.append_saved_lineup(saved("Lost?")).await;
        assert!(append.is_err());
        assert_eq!(
            store
                .get_item(storage_keys::SAVED_LINEUPS)
                .await
                .unwrap()
                .as_deref(),
            Some("{not json"),
            "corrupt value must not be overwritten"
        );
    }

    #[tokio::test]
    async fn test_saved_lineups_stored_as_json_array() {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path());
        store.append_saved_lineup(saved("Shape")).await.unwrap();

        let raw = store
            .get_item(storage_keys::SAVED_LINEUPS)
            .await
            .unwrap()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["name"], "Shape");
        assert!(value[0]["createdAt"].is_string());
    }
}
