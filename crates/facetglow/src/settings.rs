use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tuning::Settings;

use crate::paths::AppPaths;

/// Loads an explicit settings file, or the user file when it exists.
pub fn load_settings(explicit: Option<&Path>, paths: &AppPaths) -> Result<Settings> {
    if let Some(path) = explicit {
        return read_settings(path);
    }

    let path = paths.settings_file();
    if path.exists() {
        read_settings(&path)
    } else {
        tracing::debug!(path = %path.display(), "no settings file; using defaults");
        Ok(Settings::default())
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file at {}", path.display()))?;
    let mut settings = Settings::from_toml_str(&contents)
        .with_context(|| format!("failed to parse settings file at {}", path.display()))?;

    // relative background paths are relative to the settings file
    if let (Some(background), Some(dir)) = (settings.background.as_mut(), path.parent()) {
        if background.path.is_relative() {
            background.path = dir.join(&background.path);
        }
    }

    tracing::info!(path = %path.display(), "loaded settings");
    Ok(settings)
}

pub fn init_settings(paths: &AppPaths, force: bool) -> Result<PathBuf> {
    let path = paths.settings_file();
    if path.exists() && !force {
        bail!(
            "settings file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    fs::create_dir_all(paths.config_dir()).with_context(|| {
        format!(
            "failed to create config directory at {}",
            paths.config_dir().display()
        )
    })?;
    let serialized = Settings::default()
        .to_toml_string()
        .context("failed to serialize default settings")?;
    fs::write(&path, serialized)
        .with_context(|| format!("failed to write settings file to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote default settings");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_user_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let paths = AppPaths::from_raw(dir.path().join("config"));
        let settings = load_settings(None, &paths).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn init_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let paths = AppPaths::from_raw(dir.path().join("config"));
        let written = init_settings(&paths, false).unwrap();
        assert!(written.exists());
        assert!(init_settings(&paths, false).is_err());
        assert!(init_settings(&paths, true).is_ok());
        assert_eq!(load_settings(None, &paths).unwrap(), Settings::default());
    }

    #[test]
    fn background_path_resolves_next_to_settings() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("scene.toml");
        fs::write(&file, "[background]\npath = \"bg.png\"\n").unwrap();
        let paths = AppPaths::from_raw(dir.path().join("unused"));
        let settings = load_settings(Some(&file), &paths).unwrap();
        assert_eq!(
            settings.background.map(|b| b.path),
            Some(dir.path().join("bg.png"))
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let paths = AppPaths::from_raw(dir.path().to_path_buf());
        assert!(load_settings(Some(&dir.path().join("nope.toml")), &paths).is_err());
    }
}
