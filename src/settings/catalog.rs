//! Model and voice capability catalog.
//!
//! Read-only lookups the exclusion rules need: which model a service falls
//! back to, which services carry realtime/audio variants, which models
//! support reasoning or search grounding, and which voices are restricted to
//! Japanese. The data mirrors the model tables shipped with the chat client.

use crate::settings::state::{AiService, AiVoice, ReasoningEffort};

use ReasoningEffort::{High, Low, Medium, Minimal, None as EffortNone, XHigh};

/// Read-only capability lookups consumed by the exclusion rules.
///
/// The built-in implementation is [`BuiltinCatalog`]; tests may substitute
/// their own data set.
pub trait CapabilityCatalog: Send + Sync + std::fmt::Debug {
    /// The plain chat model a service falls back to.
    fn default_model(&self, service: AiService) -> &str;

    /// The realtime-API model variant for a service (empty if none).
    fn realtime_model(&self, service: AiService) -> &str;

    /// The audio-chat model variant for a service (empty if none).
    fn audio_model(&self, service: AiService) -> &str;

    /// Whether the service offers realtime/audio API variants at all.
    fn is_realtime_capable(&self, service: AiService) -> bool;

    /// Whether the service accepts image input.
    fn is_multi_modal_capable(&self, service: AiService) -> bool;

    /// Whether the model supports extended reasoning. `custom_model` selects
    /// the service-level fallback for user-supplied model ids.
    fn is_reasoning_model(&self, service: AiService, model: &str, custom_model: bool) -> bool;

    /// Effort levels the model accepts. Empty for models that only expose a
    /// reasoning toggle (or a token budget) without an effort selector.
    fn reasoning_efforts(
        &self,
        service: AiService,
        model: &str,
        custom_model: bool,
    ) -> &[ReasoningEffort];

    /// Whether the model supports search grounding.
    fn supports_search_grounding(&self, service: AiService, model: &str) -> bool;

    /// Whether the voice only produces intelligible Japanese.
    fn is_japanese_only_voice(&self, voice: AiVoice) -> bool;
}

/// Capability data for the services and models the client ships with.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

const OPENAI_REALTIME_MODEL: &str = "gpt-4o-realtime-preview-2024-12-17";
const OPENAI_AUDIO_MODEL: &str = "gpt-4o-audio-preview-2024-12-17";

const GOOGLE_SEARCH_GROUNDING_MODELS: &[&str] = &[
    "gemini-2.0-flash-001",
    "gemini-2.0-flash",
    "gemini-1.5-flash-latest",
    "gemini-1.5-flash",
    "gemini-1.5-pro-latest",
    "gemini-1.5-pro",
];

impl CapabilityCatalog for BuiltinCatalog {
    fn default_model(&self, service: AiService) -> &str {
        match service {
            AiService::OpenAi => "gpt-4o-2024-11-20",
            AiService::Anthropic => "claude-3-5-sonnet-20241022",
            AiService::Google => "gemini-1.5-flash-latest",
            AiService::Groq => "gemma2-9b-it",
            AiService::Cohere => "command-r-plus",
            AiService::MistralAi => "mistral-large-latest",
            AiService::Perplexity => "llama-3.1-sonar-large-128k-online",
            AiService::Fireworks => "accounts/fireworks/models/firefunction-v2",
            AiService::DeepSeek => "deepseek-chat",
            AiService::Xai => "grok-2",
            // Azure models are deployment names; dify routes server-side.
            AiService::Azure | AiService::Dify => "",
        }
    }

    fn realtime_model(&self, service: AiService) -> &str {
        match service {
            AiService::OpenAi | AiService::Azure => OPENAI_REALTIME_MODEL,
            _ => "",
        }
    }

    fn audio_model(&self, service: AiService) -> &str {
        match service {
            AiService::OpenAi | AiService::Azure => OPENAI_AUDIO_MODEL,
            _ => "",
        }
    }

    fn is_realtime_capable(&self, service: AiService) -> bool {
        matches!(service, AiService::OpenAi | AiService::Azure)
    }

    fn is_multi_modal_capable(&self, service: AiService) -> bool {
        matches!(
            service,
            AiService::OpenAi | AiService::Anthropic | AiService::Google | AiService::Azure
        )
    }

    fn is_reasoning_model(&self, service: AiService, model: &str, custom_model: bool) -> bool {
        if custom_model {
            // Custom model ids fall back to the service-level default.
            return matches!(
                service,
                AiService::OpenAi
                    | AiService::Anthropic
                    | AiService::Google
                    | AiService::Azure
                    | AiService::Xai
            );
        }
        match service {
            AiService::OpenAi => matches!(model, "gpt-5" | "gpt-5.1" | "gpt-5.2-pro"),
            AiService::Anthropic => matches!(model, "claude-sonnet-4-5" | "claude-opus-4-5"),
            AiService::Google => {
                matches!(
                    model,
                    "gemini-3-pro-preview" | "gemini-2.5-flash" | "gemini-2.5-pro"
                )
            }
            AiService::Xai => matches!(model, "grok-3" | "grok-4"),
            AiService::Groq => matches!(model, "openai/gpt-oss-20b" | "qwen/qwen3-32b"),
            AiService::Cohere => model == "command-a-reasoning-08-2025",
            AiService::DeepSeek => model == "deepseek-reasoner",
            // Azure has no model list; treat every deployment as capable.
            AiService::Azure => true,
            _ => false,
        }
    }

    fn reasoning_efforts(
        &self,
        service: AiService,
        model: &str,
        custom_model: bool,
    ) -> &[ReasoningEffort] {
        if custom_model {
            return match service {
                AiService::OpenAi => &[EffortNone, Minimal, Low, Medium, High, XHigh],
                AiService::Xai => &[Low, High],
                AiService::Azure => &[Low, Medium, High],
                _ => &[],
            };
        }
        match (service, model) {
            (AiService::OpenAi, "gpt-5" | "gpt-5.2-pro") => &[Minimal, Low, Medium, High],
            (AiService::OpenAi, "gpt-5.1") => &[EffortNone, Minimal, Low, Medium, High],
            (AiService::Anthropic, "claude-opus-4-5") => &[Low, Medium, High],
            (AiService::Google, "gemini-3-pro-preview") => &[Low, High],
            (AiService::Xai, "grok-3" | "grok-4") => &[Low, High],
            (AiService::Groq, "openai/gpt-oss-20b") => &[Low, Medium, High],
            (AiService::Azure, _) => &[Low, Medium, High],
            _ => &[],
        }
    }

    fn supports_search_grounding(&self, service: AiService, model: &str) -> bool {
        service == AiService::Google && GOOGLE_SEARCH_GROUNDING_MODELS.contains(&model)
    }

    fn is_japanese_only_voice(&self, voice: AiVoice) -> bool {
        matches!(
            voice,
            AiVoice::Voicevox
                | AiVoice::Koeiromap
                | AiVoice::AivisSpeech
                | AiVoice::AivisCloudApi
                | AiVoice::Gsvitts
        )
    }
}
