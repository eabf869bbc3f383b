//! Page tuning. Every field defaults to the value the page was designed
//! around; a JSON document can override any subset of them.

use log::LevelFilter;
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub log_level: LevelFilter,
    /// Delay between module start and scene/animation start.
    pub settle_delay_ms: i32,
    /// Pins the layout RNG. Unseeded when absent.
    pub seed: Option<u64>,
    pub cursor: CursorConfig,
    pub background: BackgroundConfig,
    pub globe: GlobeConfig,
    pub reveal: RevealConfig,
    pub card_tilt: CardTiltConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            settle_delay_ms: 100,
            seed: None,
            cursor: CursorConfig::default(),
            background: BackgroundConfig::default(),
            globe: GlobeConfig::default(),
            reveal: RevealConfig::default(),
            card_tilt: CardTiltConfig::default(),
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub halo_offset: f64,
    pub dot_offset: f64,
    pub scroll_threshold: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            halo_offset: 10.0,
            dot_offset: 3.0,
            scroll_threshold: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub surface_id: String,
    pub particle_count: usize,
    /// Side length of the cube the particles are scattered in.
    pub particle_spread: f32,
    pub particle_size: f32,
    pub solid_count: usize,
    pub solid_radius_min: f32,
    pub solid_radius_max: f32,
    /// Fraction of the remaining camera-to-target distance closed per frame.
    pub camera_damping: f32,
    pub pointer_scale: f32,
    pub camera_distance: f32,
    pub fov_deg: f32,
    pub max_pixel_ratio: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            surface_id: "three-container".into(),
            particle_count: 2000,
            particle_spread: 10.0,
            particle_size: 0.005,
            solid_count: 5,
            solid_radius_min: 0.3,
            solid_radius_max: 0.8,
            camera_damping: 0.05,
            pointer_scale: 0.5,
            camera_distance: 3.0,
            fov_deg: 75.0,
            max_pixel_ratio: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub surface_id: String,
    /// Edge length in CSS pixels of the square globe surface.
    pub size: u32,
    pub radius: f32,
    /// Radians per frame around the vertical axis.
    pub rotation_rate: f32,
    pub marker: [f32; 3],
    pub camera_distance: f32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            surface_id: "globe-canvas".into(),
            size: 500,
            radius: 1.5,
            rotation_rate: 0.005,
            marker: [1.2, 0.2, 0.8],
            camera_distance: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Viewport-height fraction the element top must cross to fire.
    pub start_fraction: f64,
    /// Visible fraction at which mask text latches.
    pub mask_threshold: f64,
    pub duration: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            start_fraction: 0.85,
            mask_threshold: 0.2,
            duration: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardTiltConfig {
    pub divisor: f64,
    pub perspective_px: f64,
    pub lift_px: f64,
}

impl Default for CardTiltConfig {
    fn default() -> Self {
        Self {
            divisor: 20.0,
            perspective_px: 1000.0,
            lift_px: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = PageConfig::from_json("{}").unwrap();
        assert_eq!(cfg, PageConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = PageConfig::from_json(
            r#"{ "log_level": "debug", "seed": 7, "card_tilt": { "divisor": 40 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.log_level, LevelFilter::Debug);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.card_tilt.divisor, 40.0);
        assert_eq!(cfg.card_tilt.lift_px, 10.0);
        assert_eq!(cfg.background.particle_count, 2000);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(PageConfig::from_json("{ nope").is_err());
    }
}
