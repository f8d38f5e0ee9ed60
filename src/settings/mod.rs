//! The settings consistency engine.
//!
//! A large flat configuration with many mutually-exclusive feature modes
//! (external linkage, realtime voice, audio chat, slides, YouTube relay,
//! idle/presence detection, speech recognition backends, language/voice
//! pairing) has cross-field rules that must hold after every update. This
//! module keeps them holding without the caller knowing any of them.
//!
//! # Architecture
//!
//! - [`state`]: the typed snapshot ([`SettingsState`]) and partial update
//!   ([`SettingsPatch`]).
//! - [`catalog`]: read-only model/voice capability lookups
//!   ([`CapabilityCatalog`]).
//! - [`rules`]: the ordered, declarative exclusion rule table.
//! - [`engine`]: [`compute_exclusions`], a bounded fixpoint over the rules,
//!   and [`compute_disabled_conditions`], the derived UI view.
//!
//! # Example
//!
//! ```rust
//! use vchar_settings::settings::{
//!     BuiltinCatalog, SettingsPatch, SettingsState, compute_exclusions,
//! };
//!
//! let prev = SettingsState::default();
//! let patch = SettingsPatch {
//!     external_linkage_mode: Some(true),
//!     ..SettingsPatch::default()
//! };
//! let result = compute_exclusions(&patch, &prev, &BuiltinCatalog);
//! assert!(result.corrections.is_empty()); // nothing conflicting was on
//! ```

pub mod catalog;
pub mod engine;
pub mod rules;
pub mod state;

pub use catalog::{BuiltinCatalog, CapabilityCatalog};
pub use engine::{
    DisabledConditions, ExclusionResult, compute_disabled_conditions, compute_exclusions,
};
pub use rules::{CrossStoreEffect, ExclusionRule, RuleKind, StoreId, exclusion_rules};
pub use state::{
    AiService, AiVoice, Language, MultiModalMode, ReasoningEffort, SettingsPatch, SettingsState,
    SpeechRecognitionMode,
};
