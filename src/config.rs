use crate::i18n::DEFAULT_LANGUAGE;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Translations
    pub translations_file: PathBuf,
    pub default_language: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Translations
            translations_file: std::env::var("TRANSLATIONS_FILE")
                .context("TRANSLATIONS_FILE not set")?
                .into(),
            default_language: std::env::var("DEFAULT_LANGUAGE")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}
