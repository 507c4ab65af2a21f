use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const PREFS_DIR: &str = "match_trends";
const PREFS_FILE: &str = "prefs.json";
const PREFS_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub dark_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrefsFile {
    version: u32,
    #[serde(flatten)]
    prefs: Preferences,
}

/// Where the UI keeps its few user preferences between runs.
pub trait PreferenceStore {
    /// `Ok(None)` when nothing usable has been stored yet.
    fn load(&self) -> Result<Option<Preferences>>;
    fn save(&mut self, prefs: &Preferences) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FilePrefs {
    path: PathBuf,
}

impl FilePrefs {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME/match_trends/prefs.json`, else `~/.config/...`.
    pub fn from_env() -> Option<Self> {
        prefs_path().map(Self::at)
    }
}

impl PreferenceStore for FilePrefs {
    fn load(&self) -> Result<Option<Preferences>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        let file = serde_json::from_str::<PrefsFile>(&raw)
            .with_context(|| format!("parse {}", self.path.display()))?;
        if file.version != PREFS_VERSION {
            return Ok(None);
        }
        Ok(Some(file.prefs))
    }

    fn save(&mut self, prefs: &Preferences) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let file = PrefsFile {
            version: PREFS_VERSION,
            prefs: *prefs,
        };
        let json = serde_json::to_string_pretty(&file).context("encode preferences")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}

/// Keeps preferences for the lifetime of the process only.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    stored: Option<Preferences>,
    saves: usize,
}

impl MemoryPrefs {
    pub fn with(prefs: Preferences) -> Self {
        Self {
            stored: Some(prefs),
            saves: 0,
        }
    }

    pub fn stored(&self) -> Option<Preferences> {
        self.stored
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl PreferenceStore for MemoryPrefs {
    fn load(&self) -> Result<Option<Preferences>> {
        Ok(self.stored)
    }

    fn save(&mut self, prefs: &Preferences) -> Result<()> {
        self.stored = Some(*prefs);
        self.saves += 1;
        Ok(())
    }
}

fn prefs_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CONFIG_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(PREFS_DIR).join(PREFS_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(PREFS_DIR)
            .join(PREFS_FILE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "match_trends_prefs_{tag}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_file_loads_nothing() {
        let store = FilePrefs::at(scratch_dir("missing").join(PREFS_FILE));
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn file_round_trip_leaves_no_tmp() {
        let dir = scratch_dir("roundtrip");
        let mut store = FilePrefs::at(dir.join(PREFS_FILE));
        store
            .save(&Preferences { dark_mode: true })
            .expect("save prefs");
        assert_eq!(
            store.load().expect("load"),
            Some(Preferences { dark_mode: true })
        );
        assert!(!dir.join("prefs.json.tmp").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn other_versions_are_ignored() {
        let dir = scratch_dir("version");
        fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join(PREFS_FILE);
        fs::write(&path, r#"{"version":99,"darkMode":true}"#).expect("write");
        assert_eq!(FilePrefs::at(&path).load().expect("load"), None);
        fs::write(&path, "not json").expect("write");
        assert!(FilePrefs::at(&path).load().is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}
