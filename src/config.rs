//! Initial snapshot loading.
//!
//! The chat client seeds its settings store from build-time environment
//! variables; here the same layering is done with the `config` crate:
//! defaults → optional YAML file → `VCHAR_SETTINGS_`-prefixed environment
//! variables → explicit CLI overrides. Whatever comes out is normalized by
//! the exclusion engine when the store is constructed, so a hand-edited file
//! cannot smuggle in an inconsistent combination.

use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use std::env;

use crate::settings::SettingsState;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Patch to apply, as a JSON object of setting overrides
    #[arg(short, long)]
    pub patch: Option<String>,

    /// AI service to select (e.g. "openai", "anthropic")
    #[arg(long, env = "VCHAR_AI_SERVICE")]
    pub ai_service: Option<String>,

    /// Conversation language (ISO 639-1: "en", "ja", "ko", "zh")
    #[arg(long, env = "VCHAR_LANGUAGE")]
    pub language: Option<String>,

    /// Start in kiosk mode
    #[arg(long, env = "VCHAR_KIOSK_MODE")]
    pub kiosk_mode: Option<bool>,
}

/// Errors raised while assembling the initial snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SettingsConfigError {
    /// Command line arguments did not parse.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A config layer failed to load or deserialize.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

/// Load the initial settings snapshot from the process environment.
pub fn load_initial_settings() -> Result<SettingsState, SettingsConfigError> {
    load_from_args(env::args())
}

/// Load the initial settings snapshot from explicit arguments.
pub fn load_from_args<I, T>(args: I) -> Result<SettingsState, SettingsConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)
        .map_err(|e| SettingsConfigError::InvalidArguments(e.to_string()))?;
    load_with_cli(&cli)
}

/// Assemble the snapshot from an already-parsed CLI.
pub fn load_with_cli(cli: &Cli) -> Result<SettingsState, SettingsConfigError> {
    // 1. Defaults: the full default snapshot.
    let mut builder = Config::builder().add_source(Config::try_from(&SettingsState::default())?);

    // 2. Optional config file (CLI flag or CONFIG_FILE env var).
    if let Some(path) = &cli.config {
        builder = builder.add_source(File::new(path, FileFormat::Yaml));
    }

    // 3. Environment variables, e.g. VCHAR_SETTINGS_AUDIO_MODE=true.
    builder = builder.add_source(
        Environment::with_prefix("VCHAR_SETTINGS")
            .prefix_separator("_")
            .try_parsing(true),
    );

    // 4. Manual CLI overrides.
    if let Some(service) = &cli.ai_service {
        builder = builder.set_override("select_ai_service", service.clone())?;
    }
    if let Some(language) = &cli.language {
        builder = builder.set_override("select_language", language.clone())?;
    }
    if let Some(kiosk) = cli.kiosk_mode {
        builder = builder.set_override("kiosk_mode", kiosk)?;
    }

    let cfg = builder.build()?;
    Ok(cfg.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AiService, Language};

    fn bare_cli() -> Cli {
        Cli {
            config: None,
            patch: None,
            ai_service: None,
            language: None,
            kiosk_mode: None,
        }
    }

    #[test]
    fn test_defaults_without_any_source() {
        let settings = load_with_cli(&bare_cli()).expect("defaults should load");
        assert_eq!(settings, SettingsState::default());
    }

    #[test]
    fn test_cli_overrides_win() {
        let settings = load_with_cli(&Cli {
            ai_service: Some("anthropic".to_string()),
            language: Some("en".to_string()),
            kiosk_mode: Some(true),
            ..bare_cli()
        })
        .expect("overrides should load");

        assert_eq!(settings.select_ai_service, AiService::Anthropic);
        assert_eq!(settings.select_language, Language::En);
        assert!(settings.kiosk_mode);
    }

    #[test]
    fn test_unknown_service_is_rejected() {
        let err = load_with_cli(&Cli {
            ai_service: Some("not-a-service".to_string()),
            ..bare_cli()
        });
        assert!(err.is_err());
    }
}
