use std::{fs, path::PathBuf};

use better_turrets_config::{load, load_or_default, ConfigError};
use better_turrets_core::Tuning;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("better-turrets-config-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir is writable");
    let path = dir.join(name);
    fs::write(&path, contents).expect("temp file is writable");
    path
}

#[test]
fn loads_settings_from_disk() {
    let path = scratch_file(
        "valid.toml",
        "[settings]\nper_turret_damage_bonus = 0.5\n",
    );

    let tuning = load(&path).expect("config loads");

    assert_eq!(tuning.per_turret_damage_bonus, 0.5);
    assert_eq!(tuning.magazine_multiplier, Tuning::default().magazine_multiplier);
}

#[test]
fn strict_loader_reports_missing_file() {
    let missing = std::env::temp_dir().join("better-turrets-config-missing/none.toml");

    assert!(matches!(load(&missing), Err(ConfigError::Read { .. })));
}

#[test]
fn lenient_loader_absorbs_malformed_document() {
    let path = scratch_file("broken.toml", "settings = [1, 2");

    assert_eq!(load_or_default(&path), Tuning::default());
}

#[test]
fn lenient_loader_absorbs_missing_settings_table() {
    let path = scratch_file("empty.toml", "title = \"turrets\"\n");

    assert_eq!(load_or_default(&path), Tuning::default());
}
