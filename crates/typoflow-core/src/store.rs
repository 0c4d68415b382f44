//! The single owner of the current style settings.

use crate::catalog::{ColorTheme, Preset};
use crate::settings::{StylePatch, StyleSettings};

/// Holds one `StyleSettings` value and tracks how often it changed.
///
/// The revision counter lets views skip re-applying presentation when nothing
/// moved since their last render.
#[derive(Debug, Clone, Default)]
pub struct StyleStore {
    settings: StyleSettings,
    revision: u64,
}

impl StyleStore {
    pub fn new(settings: StyleSettings) -> Self {
        Self {
            settings,
            revision: 0,
        }
    }

    pub fn settings(&self) -> &StyleSettings {
        &self.settings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Merge a partial update and return the merged whole.
    ///
    /// An empty patch leaves the revision untouched.
    pub fn patch(&mut self, patch: StylePatch) -> &StyleSettings {
        if !patch.is_empty() {
            tracing::debug!(fields = patch.len(), "style patch");
            self.settings.apply(&patch);
            self.revision += 1;
        }
        &self.settings
    }

    /// Replace the whole record.
    pub fn replace(&mut self, settings: StyleSettings) {
        self.settings = settings;
        self.revision += 1;
    }

    pub fn apply_preset(&mut self, preset: &Preset) {
        tracing::debug!(preset = preset.name, "applying preset");
        self.replace(preset.settings.clone());
    }

    /// Set text and background colors, leaving everything else alone.
    pub fn apply_theme(&mut self, theme: &ColorTheme) {
        tracing::debug!(theme = theme.name, "applying color theme");
        self.patch(theme.to_patch());
    }
}
