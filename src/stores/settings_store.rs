//! The serializing owner of the settings snapshot.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::settings::catalog::CapabilityCatalog;
use crate::settings::engine::{
    DisabledConditions, ExclusionResult, compute_disabled_conditions, compute_exclusions,
};
use crate::settings::state::{SettingsPatch, SettingsState};
use crate::stores::targets::EffectRouter;

/// Owner of the mutable settings snapshot.
///
/// Every patch goes through [`SettingsStore::apply`], which computes
/// exclusions, merges the patch and its corrections under one write lock
/// (patches are fully serialized; observers never see a half-updated
/// snapshot), and then forwards cross-store effects to the router.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    inner: Arc<SettingsStoreInner>,
}

#[derive(Debug)]
struct SettingsStoreInner {
    state: RwLock<SettingsState>,
    catalog: Box<dyn CapabilityCatalog>,
    router: EffectRouter,
    updated_at: RwLock<DateTime<Utc>>,
}

impl SettingsStore {
    /// Create a store over an initial snapshot.
    ///
    /// The initial snapshot is normalized on entry: persisted state may
    /// predate a rule change, so the rule catalog runs once against it.
    #[must_use]
    pub fn new(
        initial: SettingsState,
        catalog: Box<dyn CapabilityCatalog>,
        router: EffectRouter,
    ) -> Self {
        let result = compute_exclusions(&SettingsPatch::default(), &initial, catalog.as_ref());
        let state = result.corrections.applied(&initial);

        let store = Self {
            inner: Arc::new(SettingsStoreInner {
                state: RwLock::new(state),
                catalog,
                router,
                updated_at: RwLock::new(Utc::now()),
            }),
        };
        store.inner.router.dispatch(&result.cross_store_effects);
        store
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SettingsState {
        self.inner.state.read().unwrap().clone()
    }

    /// Apply a patch, returning the corrections and effects it entailed.
    pub fn apply(&self, patch: &SettingsPatch) -> ExclusionResult {
        let result = {
            let mut guard = self.inner.state.write().unwrap();
            let result = compute_exclusions(patch, &guard, self.inner.catalog.as_ref());
            patch.apply_to(&mut guard);
            result.corrections.apply_to(&mut guard);
            result
        };
        self.touch();

        // Effects are fire-and-forget writes to independently-owned stores;
        // they are applied outside the settings lock.
        self.inner.router.dispatch(&result.cross_store_effects);
        result
    }

    /// The disabled flags for the current snapshot.
    #[must_use]
    pub fn disabled_conditions(&self) -> DisabledConditions {
        compute_disabled_conditions(&self.inner.state.read().unwrap())
    }

    /// The effect targets this store forwards to.
    #[must_use]
    pub fn router(&self) -> &EffectRouter {
        &self.inner.router
    }

    /// When the snapshot last changed.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        *self.inner.updated_at.read().unwrap()
    }

    fn touch(&self) {
        let mut guard = self.inner.updated_at.write().unwrap();
        *guard = Utc::now();
    }
}
