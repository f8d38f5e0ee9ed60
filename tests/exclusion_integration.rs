//! End-to-end scenarios through the settings store: caller patches go in,
//! corrected snapshots and routed cross-store effects come out.

use vchar_settings::settings::{
    AiService, AiVoice, BuiltinCatalog, Language, MultiModalMode, ReasoningEffort, SettingsPatch,
    SettingsState, SpeechRecognitionMode,
};
use vchar_settings::stores::{EffectRouter, SettingsStore};

fn store_with(initial: SettingsState) -> SettingsStore {
    SettingsStore::new(initial, Box::new(BuiltinCatalog), EffectRouter::new())
}

fn default_store() -> SettingsStore {
    store_with(SettingsState::default())
}

fn patch(json: &str) -> SettingsPatch {
    serde_json::from_str(json).expect("patch JSON should parse")
}

#[test]
fn test_realtime_on_full_payload() {
    let store = default_store();

    let result = store.apply(&patch(r#"{"realtimeAPIMode": true}"#));

    let state = store.snapshot();
    assert!(state.realtime_api_mode);
    assert_eq!(state.select_ai_model, "gpt-4o-realtime-preview-2024-12-17");
    assert_eq!(state.speech_recognition_mode, SpeechRecognitionMode::Browser);
    assert_eq!(state.initial_speech_timeout, 0.0);
    assert_eq!(state.no_speech_timeout, 0.0);
    assert!(!state.show_silence_progress_bar);
    assert!(!state.continuous_mic_listening_mode);
    assert!(result.cross_store_effects.is_empty());
}

#[test]
fn test_realtime_off_restores_default_model() {
    let store = default_store();
    store.apply(&patch(r#"{"realtimeAPIMode": true}"#));

    let result = store.apply(&patch(r#"{"realtimeAPIMode": false}"#));

    assert_eq!(
        result.corrections.select_ai_model.as_deref(),
        Some("gpt-4o-2024-11-20")
    );
    assert_eq!(store.snapshot().select_ai_model, "gpt-4o-2024-11-20");
}

#[test]
fn test_external_linkage_cascade_restores_model_in_one_call() {
    let store = default_store();
    store.apply(&patch(r#"{"realtimeAPIMode": true}"#));

    let result = store.apply(&patch(r#"{"externalLinkageMode": true}"#));

    // One call: linkage forces realtime off, and the model restore rides
    // along instead of waiting for the next patch.
    assert_eq!(result.corrections.realtime_api_mode, Some(false));
    assert_eq!(
        result.corrections.select_ai_model.as_deref(),
        Some("gpt-4o-2024-11-20")
    );
    let state = store.snapshot();
    assert!(state.external_linkage_mode);
    assert!(!state.realtime_api_mode);
}

#[test]
fn test_audio_alone_loses_to_active_realtime() {
    let store = default_store();
    store.apply(&patch(r#"{"realtimeAPIMode": true}"#));

    // Realtime is level-triggered: while it holds, an audio toggle on its
    // own is reverted in the same call.
    let result = store.apply(&patch(r#"{"audioMode": true}"#));

    assert_eq!(result.corrections.audio_mode, Some(false));
    let state = store.snapshot();
    assert!(state.realtime_api_mode);
    assert!(!state.audio_mode);
}

#[test]
fn test_realtime_to_audio_switch_keeps_model_owned_by_audio() {
    let store = default_store();
    store.apply(&patch(r#"{"realtimeAPIMode": true}"#));

    store.apply(&patch(r#"{"audioMode": true, "realtimeAPIMode": false}"#));

    let state = store.snapshot();
    assert!(state.audio_mode);
    assert!(!state.realtime_api_mode);
    assert_eq!(state.select_ai_model, "gpt-4o-audio-preview-2024-12-17");
}

#[test]
fn test_switching_to_non_realtime_service_drops_voice_chat() {
    let store = default_store();
    store.apply(&patch(r#"{"realtimeAPIMode": true}"#));

    store.apply(&patch(r#"{"selectAIService": "google"}"#));

    let state = store.snapshot();
    assert_eq!(state.select_ai_service, AiService::Google);
    assert!(!state.realtime_api_mode);
    assert!(!state.audio_mode);
    // The realtime-off edge fires within the same call and lands on the
    // new service's plain default.
    assert_eq!(state.select_ai_model, "gemini-1.5-flash-latest");
}

#[test]
fn test_switching_openai_to_azure_keeps_realtime() {
    let store = default_store();
    store.apply(&patch(r#"{"realtimeAPIMode": true}"#));

    let result = store.apply(&patch(r#"{"selectAIService": "azure"}"#));

    assert_eq!(result.corrections.realtime_api_mode, None);
    assert!(store.snapshot().realtime_api_mode);
}

#[test]
fn test_non_multimodal_service_resets_modes_and_routes_effects() {
    let store = default_store();
    store.router().menu.set_show_webcam(true);
    store.router().slide.set_is_playing(true);
    store.apply(&patch(r#"{"conversationContinuityMode": true}"#));

    let result = store.apply(&patch(r#"{"selectAIService": "groq"}"#));

    let state = store.snapshot();
    assert!(!state.conversation_continuity_mode);
    assert!(!state.slide_mode);
    assert_eq!(state.multi_modal_mode, MultiModalMode::Never);
    assert!(!store.router().menu.show_webcam());
    assert!(!store.router().slide.is_playing());
    assert_eq!(result.cross_store_effects.len(), 2);
}

#[test]
fn test_youtube_mode_stops_slides_and_clears_ui() {
    let store = default_store();
    store.router().slide.set_is_playing(true);
    store.router().home.set_modal_image("capture.png");
    store.apply(&patch(r#"{"slideMode": true}"#));

    store.apply(&patch(r#"{"youtubeMode": true, "slideMode": false}"#));

    let state = store.snapshot();
    assert!(state.youtube_mode);
    assert!(!state.slide_mode);
    assert!(!store.router().slide.is_playing());
    assert_eq!(store.router().home.modal_image(), "");
}

#[test]
fn test_language_switch_moves_off_japanese_only_voice() {
    let store = default_store();
    assert_eq!(store.snapshot().select_voice, AiVoice::Voicevox);

    let result = store.apply(&patch(r#"{"selectLanguage": "en"}"#));

    assert_eq!(result.corrections.select_voice, Some(AiVoice::Google));
    assert_eq!(store.snapshot().select_voice, AiVoice::Google);
}

#[test]
fn test_japanese_keeps_japanese_only_voice() {
    let store = default_store();

    let result = store.apply(&patch(r#"{"selectVoice": "voicevox"}"#));
    assert!(result.corrections.is_empty());

    // Voice change while non-Japanese snaps back immediately.
    store.apply(&patch(r#"{"selectLanguage": "ko"}"#));
    let result = store.apply(&patch(r#"{"selectVoice": "koeiromap"}"#));
    assert_eq!(result.corrections.select_voice, Some(AiVoice::Google));
}

#[test]
fn test_whisper_mode_disables_timeout_settings() {
    let store = default_store();

    store.apply(&patch(r#"{"speechRecognitionMode": "whisper"}"#));

    let state = store.snapshot();
    assert_eq!(state.initial_speech_timeout, 0.0);
    assert_eq!(state.no_speech_timeout, 0.0);
    assert!(!state.show_silence_progress_bar);
    assert!(!state.continuous_mic_listening_mode);
}

#[test]
fn test_search_grounding_guard_on_unsupported_model() {
    let store = default_store();
    store.apply(&patch(
        r#"{"selectAIService": "google", "selectAIModel": "gemini-1.5-flash", "useSearchGrounding": true}"#,
    ));
    assert!(store.snapshot().use_search_grounding);

    let result = store.apply(&patch(r#"{"selectAIModel": "gemini-2.5-flash"}"#));

    assert_eq!(result.corrections.use_search_grounding, Some(false));
    assert!(!store.snapshot().use_search_grounding);
}

#[test]
fn test_reasoning_reset_on_model_change() {
    let store = default_store();
    store.apply(&patch(
        r#"{"selectAIModel": "gpt-5", "reasoningMode": true, "reasoningEffort": "high"}"#,
    ));

    let result = store.apply(&patch(r#"{"selectAIModel": "gpt-4o"}"#));

    // gpt-4o cannot reason: the toggle resets, and the effort keeps its
    // value because gpt-4o names no effort set.
    assert_eq!(result.corrections.reasoning_mode, Some(false));
    assert_eq!(result.corrections.reasoning_effort, None);
    assert_eq!(store.snapshot().reasoning_effort, ReasoningEffort::High);
}

#[test]
fn test_reasoning_effort_keeps_value_for_toggle_only_model() {
    let store = store_with(SettingsState {
        select_ai_service: AiService::Groq,
        select_ai_model: "openai/gpt-oss-20b".to_string(),
        reasoning_mode: true,
        reasoning_effort: ReasoningEffort::High,
        ..SettingsState::default()
    });

    let result = store.apply(&patch(r#"{"selectAIModel": "qwen/qwen3-32b"}"#));

    // qwen3-32b reasons but exposes no effort selector; nothing resets.
    assert!(result.corrections.is_empty());
    let state = store.snapshot();
    assert!(state.reasoning_mode);
    assert_eq!(state.reasoning_effort, ReasoningEffort::High);
}

#[test]
fn test_unrelated_keys_produce_no_corrections() {
    let store = default_store();

    let result = store.apply(&patch(r#"{"kioskMode": true, "customModel": false}"#));

    assert!(result.corrections.is_empty());
    assert!(result.cross_store_effects.is_empty());
    assert!(store.snapshot().kiosk_mode);
}

#[test]
fn test_persisted_conflicting_snapshot_is_normalized_on_load() {
    let store = store_with(SettingsState {
        realtime_api_mode: true,
        audio_mode: true,
        speech_recognition_mode: SpeechRecognitionMode::Whisper,
        select_language: Language::En,
        select_voice: AiVoice::Voicevox,
        ..SettingsState::default()
    });

    let state = store.snapshot();
    // realtime wins by rule order; whisper yields to the browser recognizer.
    assert!(state.realtime_api_mode);
    assert!(!state.audio_mode);
    assert_eq!(state.speech_recognition_mode, SpeechRecognitionMode::Browser);
    // The voice pairing rule is transition-only; a persisted mismatch
    // survives until the language or voice next changes.
    assert_eq!(state.select_voice, AiVoice::Voicevox);
}

#[test]
fn test_repeated_patch_is_idempotent() {
    let store = default_store();

    let first = store.apply(&patch(r#"{"audioMode": true}"#));
    assert!(!first.corrections.is_empty());

    let second = store.apply(&patch(r#"{"audioMode": true}"#));
    assert!(second.corrections.is_empty());
    assert!(second.cross_store_effects.is_empty());
}
