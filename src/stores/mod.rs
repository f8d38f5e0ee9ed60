//! State containers and the effect dispatcher.
//!
//! [`SettingsStore`] is the single owner of the settings snapshot: it runs
//! the exclusion engine on every patch, merges the corrections, and forwards
//! cross-store effects to the menu/home/slide targets through
//! [`EffectRouter`].

mod settings_store;
mod targets;

pub use settings_store::SettingsStore;
pub use targets::{EffectRouter, HomeStore, MenuStore, PatchTarget, SlideStore};
