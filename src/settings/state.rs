//! Settings snapshot and partial-update types.

use serde::{Deserialize, Serialize};

/// AI chat backend service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiService {
    OpenAi,
    Anthropic,
    Google,
    Azure,
    Groq,
    Cohere,
    MistralAi,
    Perplexity,
    Fireworks,
    DeepSeek,
    Xai,
    Dify,
}

/// Text-to-speech backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiVoice {
    Google,
    Voicevox,
    Koeiromap,
    #[serde(rename = "stylebertvits2")]
    StyleBertVits2,
    AivisSpeech,
    AivisCloudApi,
    Gsvitts,
    Elevenlabs,
    #[serde(rename = "openai")]
    OpenAi,
}

/// Speech recognition backend for microphone input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechRecognitionMode {
    Browser,
    Whisper,
}

/// How image input is attached to chat requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultiModalMode {
    AiDecide,
    Always,
    Never,
}

/// Reasoning effort level passed to reasoning-capable models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    None,
    Minimal,
    Low,
    Medium,
    High,
    XHigh,
}

/// UI / conversation language (ISO 639-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ja,
    Ko,
    Zh,
}

// Single source of truth for the fields shared by `SettingsState` and
// `SettingsPatch`. Adding a setting means adding it to both structs and to
// this list.
macro_rules! each_setting_field {
    ($with:ident) => {
        $with! {
            select_ai_service,
            select_ai_model,
            custom_model,
            select_voice,
            select_language,
            realtime_api_mode,
            audio_mode,
            external_linkage_mode,
            conversation_continuity_mode,
            slide_mode,
            youtube_mode,
            kiosk_mode,
            speech_recognition_mode,
            initial_speech_timeout,
            no_speech_timeout,
            show_silence_progress_bar,
            continuous_mic_listening_mode,
            use_search_grounding,
            multi_modal_mode,
            reasoning_mode,
            reasoning_effort,
            idle_mode_enabled,
            presence_detection_enabled
        }
    };
}

/// Full configuration snapshot at one instant.
///
/// Serializes with snake_case keys, the shape the configuration layers in
/// [`crate::config`] read and write. The patch wire format is separate; see
/// [`SettingsPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsState {
    pub select_ai_service: AiService,
    pub select_ai_model: String,
    /// Whether `select_ai_model` is a user-supplied model id rather than one
    /// from the service's known model list.
    pub custom_model: bool,
    pub select_voice: AiVoice,
    pub select_language: Language,
    pub realtime_api_mode: bool,
    pub audio_mode: bool,
    pub external_linkage_mode: bool,
    pub conversation_continuity_mode: bool,
    pub slide_mode: bool,
    pub youtube_mode: bool,
    pub kiosk_mode: bool,
    pub speech_recognition_mode: SpeechRecognitionMode,
    /// Seconds to wait for the first utterance before giving up.
    pub initial_speech_timeout: f32,
    /// Seconds of silence after which listening stops.
    pub no_speech_timeout: f32,
    pub show_silence_progress_bar: bool,
    pub continuous_mic_listening_mode: bool,
    pub use_search_grounding: bool,
    pub multi_modal_mode: MultiModalMode,
    pub reasoning_mode: bool,
    pub reasoning_effort: ReasoningEffort,
    pub idle_mode_enabled: bool,
    pub presence_detection_enabled: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            select_ai_service: AiService::OpenAi,
            select_ai_model: "gpt-4o-2024-11-20".to_string(),
            custom_model: false,
            select_voice: AiVoice::Voicevox,
            select_language: Language::Ja,
            realtime_api_mode: false,
            audio_mode: false,
            external_linkage_mode: false,
            conversation_continuity_mode: false,
            slide_mode: false,
            youtube_mode: false,
            kiosk_mode: false,
            speech_recognition_mode: SpeechRecognitionMode::Browser,
            initial_speech_timeout: 5.0,
            no_speech_timeout: 5.0,
            show_silence_progress_bar: true,
            continuous_mic_listening_mode: true,
            use_search_grounding: false,
            multi_modal_mode: MultiModalMode::AiDecide,
            reasoning_mode: false,
            reasoning_effort: ReasoningEffort::Medium,
            idle_mode_enabled: false,
            presence_detection_enabled: false,
        }
    }
}

/// Partial update to a [`SettingsState`].
///
/// Used both for caller patches and for the correction set accumulated by the
/// exclusion engine. Serializes in the camelCase shape the chat client's
/// update calls use (`selectAIService`, `realtimeAPIMode`, …); unknown keys
/// in incoming JSON are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(rename = "selectAIService", skip_serializing_if = "Option::is_none")]
    pub select_ai_service: Option<AiService>,
    #[serde(rename = "selectAIModel", skip_serializing_if = "Option::is_none")]
    pub select_ai_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_model: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_voice: Option<AiVoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_language: Option<Language>,
    #[serde(rename = "realtimeAPIMode", skip_serializing_if = "Option::is_none")]
    pub realtime_api_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_linkage_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_continuity_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kiosk_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_recognition_mode: Option<SpeechRecognitionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_speech_timeout: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_speech_timeout: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_silence_progress_bar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuous_mic_listening_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_search_grounding: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_modal_mode: Option<MultiModalMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_mode_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_detection_enabled: Option<bool>,
}

impl SettingsPatch {
    /// Whether the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        macro_rules! all_none {
            ($($field:ident),* $(,)?) => {
                true $(&& self.$field.is_none())*
            };
        }
        each_setting_field!(all_none)
    }

    /// Apply this patch to `state`, returning the accepted sub-patch.
    ///
    /// A field is accepted only when its value differs from the one already
    /// in `state`; fields that would be no-ops are dropped. This is what
    /// keeps correction sets minimal.
    pub fn apply_to(&self, state: &mut SettingsState) -> SettingsPatch {
        let mut accepted = SettingsPatch::default();
        macro_rules! apply_field {
            ($($field:ident),* $(,)?) => {$(
                if let Some(value) = self.$field.clone() {
                    if state.$field != value {
                        state.$field = value.clone();
                        accepted.$field = Some(value);
                    }
                }
            )*};
        }
        each_setting_field!(apply_field);
        accepted
    }

    /// Overlay `other` onto this patch. Fields set in `other` win.
    pub fn merge(&mut self, other: SettingsPatch) {
        macro_rules! merge_field {
            ($($field:ident),* $(,)?) => {$(
                if other.$field.is_some() {
                    self.$field = other.$field;
                }
            )*};
        }
        each_setting_field!(merge_field);
    }

    /// The snapshot that results from applying this patch to `state`.
    #[must_use]
    pub fn applied(&self, state: &SettingsState) -> SettingsState {
        let mut next = state.clone();
        self.apply_to(&mut next);
        next
    }
}
