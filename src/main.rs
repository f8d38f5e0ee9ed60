//! Settings engine CLI.
//!
//! Loads the initial snapshot from defaults, an optional config file, and
//! the environment, optionally applies a JSON patch through the exclusion
//! engine, and prints the resulting snapshot with its corrections, effects,
//! and disabled conditions.

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use vchar_settings::config::{Cli, load_with_cli};
use vchar_settings::settings::{BuiltinCatalog, SettingsPatch};
use vchar_settings::stores::{EffectRouter, SettingsStore};

fn main() {
    // Initialize tracing (M-LOG-STRUCTURED)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let cli = Cli::parse();

    let initial = match load_with_cli(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    info!(
        name: "settings.config.loaded",
        service = ?initial.select_ai_service,
        model = %initial.select_ai_model,
        "initial snapshot loaded"
    );

    let store = SettingsStore::new(initial, Box::new(BuiltinCatalog), EffectRouter::new());

    if let Some(raw) = &cli.patch {
        let patch: SettingsPatch = match serde_json::from_str(raw) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Invalid patch JSON: {e}");
                std::process::exit(1);
            }
        };

        let result = store.apply(&patch);
        info!(
            name: "settings.patch.applied",
            corrections = !result.corrections.is_empty(),
            effects = result.cross_store_effects.len(),
            "patch applied"
        );

        print_json("corrections", &result.corrections);
        print_json("crossStoreEffects", &result.cross_store_effects);
    }

    print_json("settings", &store.snapshot());
    print_json("disabledConditions", &store.disabled_conditions());
}

fn print_json<T: serde::Serialize>(label: &str, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{label}: {json}"),
        Err(e) => eprintln!("Failed to serialize {label}: {e}"),
    }
}
