//! Layout settings
//!
//! Loaded from a JSON file on native and from LocalStorage on the web.
//! Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::labels::{PillMetrics, default_vocabulary};
use crate::sim::SpeedRange;

/// What to do with existing tags when the container shrinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Keep tags, the step clamp pins them inside
    #[default]
    Clamp,
    /// Re-place all tags once any of them falls outside the new bounds
    Relayout,
}

/// Tunables for placement and simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Placement ===
    /// Clearance between freshly placed tags
    pub padding: f32,
    /// Candidates tried per tag before accepting an overlap
    pub max_tries_per_item: u32,
    /// Per-axis initial speed range
    pub min_speed: f32,
    pub max_speed: f32,

    // === Simulation ===
    /// Clearance at which two moving tags count as touching
    pub collision_gap: f32,
    pub resize_policy: ResizePolicy,

    // === Content ===
    pub tag_count: usize,
    pub vocabulary: Vec<String>,
    pub pill: PillMetrics,

    // === Accessibility ===
    /// Reduced motion (slow tags to a crawl)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            max_tries_per_item: DEFAULT_MAX_TRIES,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,

            collision_gap: DEFAULT_COLLISION_GAP,
            resize_policy: ResizePolicy::Clamp,

            tag_count: DEFAULT_TAG_COUNT,
            vocabulary: default_vocabulary(),
            pill: PillMetrics::default(),

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Speed multiplier applied when reduced motion is on
    const REDUCED_MOTION_SCALE: f32 = 0.25;

    /// Effective speed range (respects reduced_motion)
    pub fn speed_range(&self) -> SpeedRange {
        let scale = if self.reduced_motion {
            Self::REDUCED_MOTION_SCALE
        } else {
            1.0
        };
        SpeedRange::new(self.min_speed * scale, self.max_speed * scale)
    }

    /// Copy with out-of-range values corrected
    pub fn sanitized(&self) -> Self {
        let mut s = self.clone();
        if s.padding < 0.0 {
            log::warn!("Negative padding {} clamped to 0", s.padding);
            s.padding = 0.0;
        }
        if s.collision_gap < 0.0 {
            log::warn!("Negative collision gap {} clamped to 0", s.collision_gap);
            s.collision_gap = 0.0;
        }
        if s.min_speed < 0.0 || s.max_speed < 0.0 {
            log::warn!("Negative speeds made positive");
            s.min_speed = s.min_speed.abs();
            s.max_speed = s.max_speed.abs();
        }
        if s.min_speed > s.max_speed {
            log::warn!(
                "Speed range inverted ({} > {}), swapping",
                s.min_speed,
                s.max_speed
            );
            std::mem::swap(&mut s.min_speed, &mut s.max_speed);
        }
        if s.max_tries_per_item == 0 {
            log::warn!("Try budget of 0 raised to 1");
            s.max_tries_per_item = 1;
        }
        s
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "floating_tags_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            padding: 12.0,
            resize_policy: ResizePolicy::Relayout,
            vocabulary: vec!["Rust".into()],
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert!(json.contains("\"relayout\""));
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "tag_count": 3 }"#).unwrap();
        assert_eq!(settings.tag_count, 3);
        assert_eq!(settings.padding, DEFAULT_PADDING);
        assert_eq!(settings.vocabulary, default_vocabulary());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_sanitized() {
        let settings = Settings {
            padding: -1.0,
            collision_gap: -2.0,
            min_speed: 2.0,
            max_speed: 0.5,
            max_tries_per_item: 0,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.padding, 0.0);
        assert_eq!(settings.collision_gap, 0.0);
        assert_eq!((settings.min_speed, settings.max_speed), (0.5, 2.0));
        assert_eq!(settings.max_tries_per_item, 1);
    }

    #[test]
    fn test_reduced_motion_scales_speed() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let range = settings.speed_range();
        assert_eq!(range.max, DEFAULT_MAX_SPEED * 0.25);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load_from(Path::new("/nonexistent/floating-tags.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "floating-tags-settings-{}.json",
            std::process::id()
        ));
        let settings = Settings {
            tag_count: 12,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_policy_reads_from_json() {
        let settings = Settings::from_json(r#"{ "resize_policy": "relayout" }"#).unwrap();
        assert_eq!(settings.resize_policy, ResizePolicy::Relayout);
        assert!(Settings::from_json(r#"{ "resize_policy": "sideways" }"#).is_err());
    }
}
