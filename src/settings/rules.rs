//! The ordered exclusion rule table.
//!
//! Each rule is a declarative descriptor: a trigger predicate over the
//! effective snapshot (and, for edge-triggered rules, the snapshot from
//! before the patch) plus an apply function producing corrections and
//! cross-store effects. The engine in [`crate::settings::engine`] runs the
//! table to a fixpoint.
//!
//! Rule order is part of the contract. Cascades such as
//! external-linkage-on → realtime-api-off → model restore depend on it;
//! reordering is a behavior change, not a refactor.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::settings::catalog::CapabilityCatalog;
use crate::settings::state::{
    AiService, AiVoice, Language, MultiModalMode, ReasoningEffort, SettingsPatch, SettingsState,
    SpeechRecognitionMode,
};

/// Identifier of an independently-owned state container that can receive
/// cross-store effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreId {
    Menu,
    Home,
    Slide,
}

/// A side-effect patch destined for a store other than the settings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossStoreEffect {
    pub store: StoreId,
    pub state: Map<String, Value>,
}

impl CrossStoreEffect {
    fn new(store: StoreId, state: Value) -> Self {
        let state = match state {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { store, state }
    }
}

/// How a rule's trigger is meant to behave. Documentation only: the
/// predicates themselves encode level- vs edge-triggering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Fires whenever its condition currently holds.
    Level,
    /// Fires on a transition between `prev` and the effective snapshot,
    /// including transitions produced by earlier corrections in the same
    /// engine call.
    Edge,
}

/// Inputs a rule reads: the effective snapshot as corrected so far, the
/// snapshot from before the patch, and the capability catalog.
#[derive(Debug, Clone, Copy)]
pub struct RuleCtx<'a> {
    pub effective: &'a SettingsState,
    pub prev: &'a SettingsState,
    pub catalog: &'a dyn CapabilityCatalog,
}

/// Corrections and effects produced by one rule application.
#[derive(Debug, Default)]
pub struct RuleOutcome {
    pub corrections: SettingsPatch,
    pub effects: Vec<CrossStoreEffect>,
}

impl RuleOutcome {
    fn corrections(corrections: SettingsPatch) -> Self {
        Self {
            corrections,
            effects: Vec::new(),
        }
    }
}

/// A declarative exclusion rule.
#[derive(Debug, Clone, Copy)]
pub struct ExclusionRule {
    pub id: &'static str,
    pub kind: RuleKind,
    pub trigger: fn(&RuleCtx<'_>) -> bool,
    pub apply: fn(&RuleCtx<'_>) -> RuleOutcome,
}

/// The rule table, in evaluation order.
#[must_use]
pub fn exclusion_rules() -> &'static [ExclusionRule] {
    &RULES
}

static RULES: [ExclusionRule; 13] = [
    ExclusionRule {
        id: "external-linkage-on",
        kind: RuleKind::Level,
        trigger: |ctx| ctx.effective.external_linkage_mode,
        apply: |_ctx| {
            RuleOutcome::corrections(SettingsPatch {
                conversation_continuity_mode: Some(false),
                realtime_api_mode: Some(false),
                audio_mode: Some(false),
                idle_mode_enabled: Some(false),
                presence_detection_enabled: Some(false),
                ..SettingsPatch::default()
            })
        },
    },
    ExclusionRule {
        id: "realtime-api-on",
        kind: RuleKind::Level,
        trigger: |ctx| ctx.effective.realtime_api_mode,
        apply: |ctx| {
            RuleOutcome::corrections(SettingsPatch {
                audio_mode: Some(false),
                speech_recognition_mode: Some(SpeechRecognitionMode::Browser),
                select_ai_model: Some(
                    ctx.catalog
                        .realtime_model(ctx.effective.select_ai_service)
                        .to_string(),
                ),
                initial_speech_timeout: Some(0.0),
                no_speech_timeout: Some(0.0),
                show_silence_progress_bar: Some(false),
                continuous_mic_listening_mode: Some(false),
                idle_mode_enabled: Some(false),
                presence_detection_enabled: Some(false),
                ..SettingsPatch::default()
            })
        },
    },
    ExclusionRule {
        id: "audio-mode-on",
        kind: RuleKind::Level,
        trigger: |ctx| ctx.effective.audio_mode,
        apply: |ctx| {
            RuleOutcome::corrections(SettingsPatch {
                realtime_api_mode: Some(false),
                speech_recognition_mode: Some(SpeechRecognitionMode::Browser),
                select_ai_model: Some(
                    ctx.catalog
                        .audio_model(ctx.effective.select_ai_service)
                        .to_string(),
                ),
                initial_speech_timeout: Some(0.0),
                no_speech_timeout: Some(0.0),
                show_silence_progress_bar: Some(false),
                continuous_mic_listening_mode: Some(false),
                idle_mode_enabled: Some(false),
                presence_detection_enabled: Some(false),
                ..SettingsPatch::default()
            })
        },
    },
    // When audio mode is on, audio-mode-on owns the model; same the other
    // way around for realtime.
    ExclusionRule {
        id: "realtime-api-off",
        kind: RuleKind::Edge,
        trigger: |ctx| {
            ctx.prev.realtime_api_mode
                && !ctx.effective.realtime_api_mode
                && !ctx.effective.audio_mode
        },
        apply: restore_default_model,
    },
    ExclusionRule {
        id: "audio-mode-off",
        kind: RuleKind::Edge,
        trigger: |ctx| {
            ctx.prev.audio_mode && !ctx.effective.audio_mode && !ctx.effective.realtime_api_mode
        },
        apply: restore_default_model,
    },
    ExclusionRule {
        id: "slide-mode-on",
        kind: RuleKind::Level,
        trigger: |ctx| ctx.effective.slide_mode,
        apply: |_ctx| {
            RuleOutcome::corrections(SettingsPatch {
                youtube_mode: Some(false),
                conversation_continuity_mode: Some(false),
                idle_mode_enabled: Some(false),
                presence_detection_enabled: Some(false),
                ..SettingsPatch::default()
            })
        },
    },
    ExclusionRule {
        id: "youtube-mode-on",
        kind: RuleKind::Level,
        trigger: |ctx| ctx.effective.youtube_mode,
        apply: |_ctx| RuleOutcome {
            corrections: SettingsPatch {
                slide_mode: Some(false),
                ..SettingsPatch::default()
            },
            effects: vec![
                CrossStoreEffect::new(StoreId::Menu, json!({ "showWebcam": false })),
                CrossStoreEffect::new(StoreId::Home, json!({ "modalImage": "" })),
                CrossStoreEffect::new(StoreId::Slide, json!({ "isPlaying": false })),
            ],
        },
    },
    ExclusionRule {
        id: "service-non-multimodal",
        kind: RuleKind::Edge,
        trigger: |ctx| {
            service_changed(ctx)
                && !ctx
                    .catalog
                    .is_multi_modal_capable(ctx.effective.select_ai_service)
        },
        apply: |_ctx| RuleOutcome {
            corrections: SettingsPatch {
                conversation_continuity_mode: Some(false),
                slide_mode: Some(false),
                multi_modal_mode: Some(MultiModalMode::Never),
                ..SettingsPatch::default()
            },
            effects: vec![
                CrossStoreEffect::new(StoreId::Menu, json!({ "showWebcam": false })),
                CrossStoreEffect::new(StoreId::Slide, json!({ "isPlaying": false })),
            ],
        },
    },
    ExclusionRule {
        id: "service-non-realtime",
        kind: RuleKind::Edge,
        trigger: |ctx| {
            service_changed(ctx)
                && !ctx
                    .catalog
                    .is_realtime_capable(ctx.effective.select_ai_service)
        },
        apply: |_ctx| {
            RuleOutcome::corrections(SettingsPatch {
                realtime_api_mode: Some(false),
                audio_mode: Some(false),
                ..SettingsPatch::default()
            })
        },
    },
    ExclusionRule {
        id: "whisper-recognition",
        kind: RuleKind::Level,
        trigger: |ctx| ctx.effective.speech_recognition_mode == SpeechRecognitionMode::Whisper,
        apply: |_ctx| {
            RuleOutcome::corrections(SettingsPatch {
                initial_speech_timeout: Some(0.0),
                no_speech_timeout: Some(0.0),
                show_silence_progress_bar: Some(false),
                continuous_mic_listening_mode: Some(false),
                ..SettingsPatch::default()
            })
        },
    },
    ExclusionRule {
        id: "language-voice-mismatch",
        kind: RuleKind::Edge,
        trigger: |ctx| {
            (ctx.prev.select_language != ctx.effective.select_language
                || ctx.prev.select_voice != ctx.effective.select_voice)
                && ctx.effective.select_language != Language::Ja
                && ctx
                    .catalog
                    .is_japanese_only_voice(ctx.effective.select_voice)
        },
        apply: |_ctx| {
            RuleOutcome::corrections(SettingsPatch {
                select_voice: Some(AiVoice::Google),
                ..SettingsPatch::default()
            })
        },
    },
    ExclusionRule {
        id: "search-grounding-guard",
        kind: RuleKind::Level,
        trigger: |ctx| {
            ctx.effective.select_ai_service == AiService::Google
                && ctx.effective.use_search_grounding
                && !ctx
                    .catalog
                    .supports_search_grounding(AiService::Google, &ctx.effective.select_ai_model)
        },
        apply: |_ctx| {
            RuleOutcome::corrections(SettingsPatch {
                use_search_grounding: Some(false),
                ..SettingsPatch::default()
            })
        },
    },
    ExclusionRule {
        id: "reasoning-reset",
        kind: RuleKind::Edge,
        trigger: |ctx| {
            service_changed(ctx)
                || ctx.prev.select_ai_model != ctx.effective.select_ai_model
                || ctx.prev.custom_model != ctx.effective.custom_model
        },
        apply: reset_unsupported_reasoning,
    },
];

fn service_changed(ctx: &RuleCtx<'_>) -> bool {
    ctx.prev.select_ai_service != ctx.effective.select_ai_service
}

fn restore_default_model(ctx: &RuleCtx<'_>) -> RuleOutcome {
    RuleOutcome::corrections(SettingsPatch {
        select_ai_model: Some(
            ctx.catalog
                .default_model(ctx.effective.select_ai_service)
                .to_string(),
        ),
        ..SettingsPatch::default()
    })
}

/// Turn reasoning off when the new model cannot reason, and fall back to a
/// supported effort when the new model names a non-empty effort set that
/// excludes the current one. An empty effort set never resets the effort.
fn reset_unsupported_reasoning(ctx: &RuleCtx<'_>) -> RuleOutcome {
    let state = ctx.effective;
    let reasoning = ctx.catalog.is_reasoning_model(
        state.select_ai_service,
        &state.select_ai_model,
        state.custom_model,
    );
    let efforts = ctx.catalog.reasoning_efforts(
        state.select_ai_service,
        &state.select_ai_model,
        state.custom_model,
    );

    let mut corrections = SettingsPatch::default();
    if !reasoning && state.reasoning_mode {
        corrections.reasoning_mode = Some(false);
    }
    if !efforts.is_empty() && !efforts.contains(&state.reasoning_effort) {
        corrections.reasoning_effort = Some(if efforts.contains(&ReasoningEffort::Medium) {
            ReasoningEffort::Medium
        } else {
            efforts[0]
        });
    }
    RuleOutcome::corrections(corrections)
}
