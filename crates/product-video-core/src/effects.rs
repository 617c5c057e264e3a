//! Visual effects the generation service can apply.
//!
//! [`EffectToggles`] holds the live checkbox state. Each generate
//! action snapshots it into a fresh [`EffectSelection`], which is what
//! gets serialized into the request.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named toggle influencing server-side video generation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Zoom,
    Pan,
    Rotation,
    Perspective,
    DepthOfField,
    MotionBlur,
    ChromaticAberration,
}

impl Effect {
    /// All effects in display order.
    pub const ALL: [Self; 7] = [
        Self::Zoom,
        Self::Pan,
        Self::Rotation,
        Self::Perspective,
        Self::DepthOfField,
        Self::MotionBlur,
        Self::ChromaticAberration,
    ];

    /// Wire name used as the key in the `effects` query parameter.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zoom => "zoom",
            Self::Pan => "pan",
            Self::Rotation => "rotation",
            Self::Perspective => "perspective",
            Self::DepthOfField => "depth_of_field",
            Self::MotionBlur => "motion_blur",
            Self::ChromaticAberration => "chromatic_aberration",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Zoom => "Zoom",
            Self::Pan => "Pan",
            Self::Rotation => "3D rotation",
            Self::Perspective => "Perspective tilt",
            Self::DepthOfField => "Depth of field",
            Self::MotionBlur => "Motion blur",
            Self::ChromaticAberration => "Chromatic aberration",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Zoom => "Camera dolly toward the product.",
            Self::Pan => "Camera drifts left/right and up/down.",
            Self::Rotation => "Full 3D rotation between frames.",
            Self::Perspective => "Tilts the frame for a 3D look.",
            Self::DepthOfField => "Blurs everything outside the focus plane.",
            Self::MotionBlur => "Cinematic blur on fast movement.",
            Self::ChromaticAberration => "Separates the RGB channels slightly.",
        }
    }

    /// Checkbox state on page load.
    #[must_use]
    pub const fn default_enabled(self) -> bool {
        matches!(
            self,
            Self::Zoom | Self::Pan | Self::Perspective | Self::MotionBlur
        )
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current checkbox state for every [`Effect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectToggles {
    enabled: [bool; Effect::ALL.len()],
}

impl Default for EffectToggles {
    fn default() -> Self {
        Self {
            enabled: Effect::ALL.map(Effect::default_enabled),
        }
    }
}

impl EffectToggles {
    #[must_use]
    pub const fn is_enabled(&self, effect: Effect) -> bool {
        self.enabled[effect.index()]
    }

    pub const fn set(&mut self, effect: Effect, enabled: bool) {
        self.enabled[effect.index()] = enabled;
    }

    /// Snapshot the checkboxes into a fresh selection.
    #[must_use]
    pub fn collect(&self) -> EffectSelection {
        EffectSelection(
            Effect::ALL
                .iter()
                .map(|&e| (e.name().to_owned(), self.is_enabled(e)))
                .collect(),
        )
    }
}

/// Mapping from effect name to enabled flag, as sent to the service.
///
/// Backed by a `BTreeMap` so the serialized JSON has a stable key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectSelection(pub BTreeMap<String, bool>);

impl EffectSelection {
    /// Whether the named effect is present and enabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Names of the enabled effects, in key order.
    pub fn enabled_names(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|&(_, &on)| on)
            .map(|(name, _)| name.as_str())
    }

    /// Serialize to the compact JSON object carried in the query string.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_every_variant_in_index_order() {
        for (i, effect) in Effect::ALL.iter().enumerate() {
            assert_eq!(effect.index(), i, "Effect::ALL out of order at {effect}");
        }
    }

    #[test]
    fn defaults_match_service_defaults() {
        let toggles = EffectToggles::default();
        let enabled: Vec<_> = Effect::ALL
            .into_iter()
            .filter(|&e| toggles.is_enabled(e))
            .collect();
        assert_eq!(
            enabled,
            [
                Effect::Zoom,
                Effect::Pan,
                Effect::Perspective,
                Effect::MotionBlur
            ]
        );
    }

    #[test]
    fn collect_reflects_current_checkbox_state() {
        let mut toggles = EffectToggles::default();
        toggles.set(Effect::Rotation, true);
        toggles.set(Effect::Zoom, false);

        let selection = toggles.collect();
        assert_eq!(selection.0.len(), Effect::ALL.len());
        assert!(selection.is_enabled("rotation"));
        assert!(!selection.is_enabled("zoom"));
        assert!(!selection.is_enabled("unknown"));
    }

    #[test]
    fn collect_builds_a_fresh_snapshot() {
        let mut toggles = EffectToggles::default();
        let before = toggles.collect();
        toggles.set(Effect::DepthOfField, true);
        assert!(!before.is_enabled("depth_of_field"));
        assert!(toggles.collect().is_enabled("depth_of_field"));
    }

    #[test]
    fn json_is_a_flat_object_with_sorted_keys() {
        let mut toggles = EffectToggles::default();
        for effect in Effect::ALL {
            toggles.set(effect, false);
        }
        toggles.set(Effect::Pan, true);
        let json = toggles.collect().to_json().unwrap_or_default();
        assert_eq!(
            json,
            r#"{"chromatic_aberration":false,"depth_of_field":false,"motion_blur":false,"pan":true,"perspective":false,"rotation":false,"zoom":false}"#
        );
    }

    #[test]
    fn enabled_names_skips_disabled_effects() {
        let selection = EffectToggles::default().collect();
        let names: Vec<_> = selection.enabled_names().collect();
        assert_eq!(names, ["motion_blur", "pan", "perspective", "zoom"]);
    }
}
