use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use client_core::Catalog;
use serde::Deserialize;

use crate::ui::animation::PRODUCT_SWAP_DELAY;

pub const SETTINGS_FILE: &str = "tumbler.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub backend_url: String,
    pub swap_delay_ms: u64,
    pub catalog_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".into(),
            swap_delay_ms: u64::try_from(PRODUCT_SWAP_DELAY.as_millis()).unwrap_or(1200),
            catalog_path: None,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn swap_delay(&self) -> Duration {
        Duration::from_millis(self.swap_delay_ms)
    }

    /// Catalog from `catalog_path`, or the built-in one.
    pub fn catalog(&self) -> anyhow::Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("failed to load catalog '{}'", path.display())),
            None => Ok(Catalog::builtin()),
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(file: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, &file_cfg),
            Err(err) => tracing::warn!(file = %file.display(), "ignoring unreadable settings file: {err}"),
        }
    }

    if let Some(v) = env("TUMBLER_BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Some(v) = env("APP__SWAP_DELAY_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.swap_delay_ms = parsed,
            Err(err) => tracing::warn!(value = %v, "ignoring APP__SWAP_DELAY_MS: {err}"),
        }
    }

    if let Some(v) = env("APP__CATALOG_PATH") {
        settings.catalog_path = Some(PathBuf::from(v));
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

fn apply_file(settings: &mut Settings, file_cfg: &HashMap<String, toml::Value>) {
    if let Some(v) = file_cfg.get("backend_url").and_then(toml::Value::as_str) {
        settings.backend_url = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("swap_delay_ms")
        .and_then(toml::Value::as_integer)
        .and_then(|v| u64::try_from(v).ok())
    {
        settings.swap_delay_ms = v;
    }
    if let Some(v) = file_cfg.get("catalog_path").and_then(toml::Value::as_str) {
        settings.catalog_path = Some(PathBuf::from(v));
    }
    if let Some(v) = file_cfg.get("log_filter").and_then(toml::Value::as_str) {
        settings.log_filter = v.to_string();
    }
}
