use std::fs;

use anyhow::anyhow;
use match_trends::persist::{FilePrefs, MemoryPrefs, PreferenceStore, Preferences};
use match_trends::theme::{Palette, ThemeFlag};

struct BrokenPrefs;

impl PreferenceStore for BrokenPrefs {
    fn load(&self) -> anyhow::Result<Option<Preferences>> {
        Err(anyhow!("disk on fire"))
    }

    fn save(&mut self, _prefs: &Preferences) -> anyhow::Result<()> {
        Err(anyhow!("read-only"))
    }
}

#[test]
fn stored_dark_preference_is_restored() {
    let store = MemoryPrefs::with(Preferences { dark_mode: true });
    let (flag, err) = ThemeFlag::load(&store);
    assert!(err.is_none());
    assert!(flag.is_dark());
    assert_eq!(flag.palette(), Palette::dark());
}

#[test]
fn each_toggle_is_written_back() {
    let mut store = MemoryPrefs::default();
    let (mut flag, _) = ThemeFlag::load(&store);

    flag.toggle(&mut store).expect("save");
    flag.toggle(&mut store).expect("save");

    assert!(!flag.is_dark());
    assert_eq!(store.saves(), 2);
    assert_eq!(store.stored(), Some(Preferences { dark_mode: false }));
}

#[test]
fn broken_store_falls_back_to_light_and_still_toggles() {
    let mut store = BrokenPrefs;
    let (mut flag, err) = ThemeFlag::load(&store);
    assert!(!flag.is_dark());
    assert!(err.is_some());

    assert!(flag.toggle(&mut store).is_err());
    assert!(flag.is_dark());
}

#[test]
fn theme_survives_a_restart_through_the_file_store() {
    let dir = std::env::temp_dir().join(format!("match_trends_theme_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let path = dir.join("prefs.json");

    let mut store = FilePrefs::at(&path);
    let mut flag = ThemeFlag::default();
    flag.toggle(&mut store).expect("write prefs");

    let reopened = FilePrefs::at(&path);
    let (restored, err) = ThemeFlag::load(&reopened);
    assert!(err.is_none());
    assert!(restored.is_dark());

    let _ = fs::remove_dir_all(&dir);
}
