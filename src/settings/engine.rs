//! The exclusion engine: a bounded fixpoint over the rule table.
//!
//! [`compute_exclusions`] is pure and synchronous; it holds no state between
//! calls and is safe to invoke from any caller. The settings store calls it
//! once per patch and merges the result; see
//! [`crate::stores::SettingsStore`].

use serde::Serialize;

use crate::settings::catalog::CapabilityCatalog;
use crate::settings::rules::{CrossStoreEffect, RuleCtx, exclusion_rules};
use crate::settings::state::{MultiModalMode, SettingsPatch, SettingsState};

/// Result of one engine call: the minimal correction set plus deduplicated
/// cross-store effects (at most one per target store).
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ExclusionResult {
    pub corrections: SettingsPatch,
    pub cross_store_effects: Vec<CrossStoreEffect>,
}

/// Compute the corrections and cross-store effects a patch entails.
///
/// The effective snapshot starts as `prev` overlaid with `patch` and is
/// re-corrected after every rule application, so a correction made by one
/// rule can trigger another (edge-triggered rules compare against `prev`,
/// which stays fixed for the whole call). Passes are capped at the rule
/// count; exhausting the cap means two rules keep undoing each other, which
/// is a rule-authoring defect, not a runtime fault. The last computed result
/// is returned and a warning is logged.
#[must_use]
pub fn compute_exclusions(
    patch: &SettingsPatch,
    prev: &SettingsState,
    catalog: &dyn CapabilityCatalog,
) -> ExclusionResult {
    let mut effective = patch.applied(prev);
    let mut corrections = SettingsPatch::default();
    let mut effects: Vec<CrossStoreEffect> = Vec::new();

    let rules = exclusion_rules();
    let mut converged = false;
    for _pass in 0..rules.len() {
        let mut changed = false;

        for rule in rules {
            let ctx = RuleCtx {
                effective: &effective,
                prev,
                catalog,
            };
            if !(rule.trigger)(&ctx) {
                continue;
            }
            let outcome = (rule.apply)(&ctx);

            let accepted = outcome.corrections.apply_to(&mut effective);
            if !accepted.is_empty() {
                tracing::debug!(rule = rule.id, corrections = ?accepted, "exclusion rule fired");
                corrections.merge(accepted);
                changed = true;
            }

            for effect in outcome.effects {
                if merge_effect(&mut effects, effect) {
                    changed = true;
                }
            }
        }

        if !changed {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::warn!(
            pass_cap = rules.len(),
            "exclusion rules did not converge; returning last computed corrections"
        );
    }

    ExclusionResult {
        corrections,
        cross_store_effects: effects,
    }
}

/// Shallow-merge `effect` into the per-store accumulator.
///
/// Returns true only when a key appeared that was not present before; a
/// level-triggered rule re-emitting the same payload on a later pass does
/// not count as progress.
fn merge_effect(effects: &mut Vec<CrossStoreEffect>, effect: CrossStoreEffect) -> bool {
    match effects.iter_mut().find(|e| e.store == effect.store) {
        Some(existing) => {
            let mut added = false;
            for (key, value) in effect.state {
                if !existing.state.contains_key(&key) {
                    added = true;
                }
                existing.state.insert(key, value);
            }
            added
        }
        None => {
            effects.push(effect);
            true
        }
    }
}

/// UI controls the current configuration makes meaningless.
///
/// A stateless re-expression of the level-triggered invariants as booleans;
/// evaluated on every render, so it must only report, never correct.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisabledConditions {
    pub speech_recognition_mode_switcher: bool,
    pub voice_settings: bool,
    pub temperature_max_tokens: bool,
    pub conversation_continuity_mode: bool,
    pub slide_mode: bool,
    pub idle_mode_enabled: bool,
    pub presence_detection_enabled: bool,
}

/// Derive the disabled flags for the given snapshot.
#[must_use]
pub fn compute_disabled_conditions(state: &SettingsState) -> DisabledConditions {
    let voice_chat = state.realtime_api_mode || state.audio_mode;
    let exclusive_mode =
        voice_chat || state.external_linkage_mode || state.slide_mode;
    let never_multi_modal = state.multi_modal_mode == MultiModalMode::Never;

    DisabledConditions {
        speech_recognition_mode_switcher: voice_chat,
        voice_settings: voice_chat,
        temperature_max_tokens: voice_chat,
        conversation_continuity_mode: state.slide_mode
            || state.external_linkage_mode
            || never_multi_modal,
        slide_mode: never_multi_modal,
        idle_mode_enabled: exclusive_mode,
        presence_detection_enabled: exclusive_mode,
    }
}
