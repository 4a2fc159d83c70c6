use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Two-tier file cache for feed data.
///
/// The raw tier stores play-by-play responses exactly as the API returned
/// them, keyed by game id, so reprocessing never refetches and schema
/// changes in our own structs never lose fields. The parsed tier stores
/// whatever the pipeline has already shaped, keyed by caller-chosen names
/// such as a date's game slate.
pub struct Cache {
    raw_dir: PathBuf,
    parsed_dir: PathBuf,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        let raw_dir = cache_dir.join("raw");
        let parsed_dir = cache_dir.join("parsed");

        fs::create_dir_all(&raw_dir).context("Failed to create raw cache directory")?;
        fs::create_dir_all(&parsed_dir).context("Failed to create parsed cache directory")?;

        Ok(Self {
            raw_dir,
            parsed_dir,
        })
    }

    /// Save a raw API response for one game's plays.
    pub fn save_raw(&self, game_id: i64, data: &Value) -> Result<()> {
        let file_path = self.raw_path(game_id);
        self.write_json(&file_path, data)?;
        info!("Saved raw plays to cache: {}", file_path.display());
        Ok(())
    }

    /// Load a game's raw plays, `None` when never fetched.
    pub fn load_raw(&self, game_id: i64) -> Result<Option<Value>> {
        self.read_json_opt(&self.raw_path(game_id))
    }

    pub fn has_raw(&self, game_id: i64) -> bool {
        self.raw_path(game_id).exists()
    }

    /// Save parsed data under a caller-chosen key.
    pub fn save_parsed<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.parsed_path(key);
        self.write_json(&file_path, data)?;
        info!("Saved parsed data to cache: {}", file_path.display());
        Ok(())
    }

    pub fn load_parsed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        self.read_json_opt(&self.parsed_path(key))
    }

    fn raw_path(&self, game_id: i64) -> PathBuf {
        self.raw_dir.join(format!("plays_{}.json", game_id))
    }

    fn parsed_path(&self, key: &str) -> PathBuf {
        self.parsed_dir.join(format!("{}.json", key))
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json).context("Failed to write cache file")?;
        Ok(())
    }

    fn read_json_opt<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path)?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                path,
                &json[..json.len().min(200)]
            )
        })?;
        Ok(Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_raw_round_trip() {
        let dir = TempDir::new().unwrap();
        let cache = Cache::new(dir.path()).unwrap();

        assert!(!cache.has_raw(401));
        let plays = json!([{"id": 1, "playText": "Jones makes a layup"}]);
        cache.save_raw(401, &plays).unwrap();

        assert!(cache.has_raw(401));
        assert_eq!(cache.load_raw(401).unwrap(), Some(plays));
    }

    #[test]
    fn test_parsed_round_trip() {
        let dir = TempDir::new().unwrap();
        let cache = Cache::new(dir.path()).unwrap();

        let slate: Vec<i64> = vec![401, 402, 403];
        cache.save_parsed("games_2026-01-15", &slate).unwrap();

        let loaded: Option<Vec<i64>> = cache.load_parsed("games_2026-01-15").unwrap();
        assert_eq!(loaded, Some(slate));
    }

    #[test]
    fn test_missing_entries_load_as_none() {
        let dir = TempDir::new().unwrap();
        let cache = Cache::new(dir.path()).unwrap();

        assert_eq!(cache.load_raw(999).unwrap(), None);
        let missing: Option<Vec<i64>> = cache.load_parsed("games_1999-01-01").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_corrupt_file_is_an_error_not_none() {
        let dir = TempDir::new().unwrap();
        let cache = Cache::new(dir.path()).unwrap();

        fs::write(dir.path().join("raw/plays_7.json"), "{not json").unwrap();
        assert!(cache.load_raw(7).is_err());
    }
}
