//! Effect target stores and the router that fans effects out to them.
//!
//! The menu, home, and slide containers are owned independently of the
//! settings store. They accept generic key/value patches; unknown keys are
//! ignored, and re-applying the same patch leaves the store unchanged, so
//! effects can safely be recomputed and resent.

use std::sync::{Arc, RwLock};

use serde_json::{Map, Value};

use crate::settings::rules::{CrossStoreEffect, StoreId};

/// A state container that accepts generic cross-store patches.
pub trait PatchTarget {
    /// Apply the named keys to this store. Idempotent.
    fn apply_patch(&self, patch: &Map<String, Value>);
}

/// UI-visibility state owned by the menu.
#[derive(Debug, Clone, Default)]
pub struct MenuStore {
    inner: Arc<RwLock<MenuState>>,
}

#[derive(Debug, Default)]
struct MenuState {
    show_webcam: bool,
}

impl MenuStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn show_webcam(&self) -> bool {
        self.inner.read().unwrap().show_webcam
    }

    pub fn set_show_webcam(&self, value: bool) {
        self.inner.write().unwrap().show_webcam = value;
    }
}

impl PatchTarget for MenuStore {
    fn apply_patch(&self, patch: &Map<String, Value>) {
        let mut guard = self.inner.write().unwrap();
        if let Some(value) = patch.get("showWebcam").and_then(Value::as_bool) {
            guard.show_webcam = value;
        }
    }
}

/// Session-screen state owned by the home view.
#[derive(Debug, Clone, Default)]
pub struct HomeStore {
    inner: Arc<RwLock<HomeState>>,
}

#[derive(Debug, Default)]
struct HomeState {
    modal_image: String,
}

impl HomeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn modal_image(&self) -> String {
        self.inner.read().unwrap().modal_image.clone()
    }

    pub fn set_modal_image(&self, value: impl Into<String>) {
        self.inner.write().unwrap().modal_image = value.into();
    }
}

impl PatchTarget for HomeStore {
    fn apply_patch(&self, patch: &Map<String, Value>) {
        let mut guard = self.inner.write().unwrap();
        if let Some(value) = patch.get("modalImage").and_then(Value::as_str) {
            guard.modal_image = value.to_string();
        }
    }
}

/// Playback state owned by the slide player.
#[derive(Debug, Clone, Default)]
pub struct SlideStore {
    inner: Arc<RwLock<SlideState>>,
}

#[derive(Debug, Default)]
struct SlideState {
    is_playing: bool,
}

impl SlideStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.inner.read().unwrap().is_playing
    }

    pub fn set_is_playing(&self, value: bool) {
        self.inner.write().unwrap().is_playing = value;
    }
}

impl PatchTarget for SlideStore {
    fn apply_patch(&self, patch: &Map<String, Value>) {
        let mut guard = self.inner.write().unwrap();
        if let Some(value) = patch.get("isPlaying").and_then(Value::as_bool) {
            guard.is_playing = value;
        }
    }
}

/// Routes each cross-store effect to the store its id names.
#[derive(Debug, Clone, Default)]
pub struct EffectRouter {
    pub menu: MenuStore,
    pub home: HomeStore,
    pub slide: SlideStore,
}

impl EffectRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply each effect to its target store.
    pub fn dispatch(&self, effects: &[CrossStoreEffect]) {
        for effect in effects {
            let target: &dyn PatchTarget = match effect.store {
                StoreId::Menu => &self.menu,
                StoreId::Home => &self.home,
                StoreId::Slide => &self.slide,
            };
            target.apply_patch(&effect.state);
        }
    }
}
