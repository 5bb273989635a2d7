//! Board configuration.
//!
//! Every field has a default, so a user file only needs the keys it overrides. Overrides are
//! deep-merged onto the serialized defaults before being deserialized back, which keeps partial
//! nested sections (e.g. a single thread style) working.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub layout: LayoutConfig,
    pub scene: SceneConfig,
    pub viewport: ViewportConfig,
    pub modal: ModalConfig,
    /// Text shown in place of the board when the dataset could not be loaded.
    pub fallback_message: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            scene: SceneConfig::default(),
            viewport: ViewportConfig::default(),
            modal: ModalConfig::default(),
            fallback_message: "Could not load bulletin data.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Nominal card width used for the ring non-overlap bound.
    pub item_width: f64,
    pub min_spacing: f64,
    pub base_radius: f64,
    pub ring_gap: f64,
    pub padding: f64,
    /// Angular offset per ring index, in radians.
    pub ring_stagger: f64,
    pub evidence_stagger: f64,
    /// Evidence ring distance beyond the outermost person ring, as a fraction of `ring_gap`.
    pub evidence_ring_factor: f64,
    /// Vertical gap between a ring's top edge and its label.
    pub label_lift: f64,
    pub ring_labels: BTreeMap<u32, String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            item_width: 160.0,
            min_spacing: 50.0,
            base_radius: 280.0,
            ring_gap: 220.0,
            padding: 350.0,
            ring_stagger: 0.45,
            evidence_stagger: 0.3,
            evidence_ring_factor: 0.85,
            label_lift: 30.0,
            ring_labels: BTreeMap::from([
                (1, "INNER CIRCLE".to_string()),
                (2, "PERSONS OF INTEREST".to_string()),
                (3, "PERIPHERAL".to_string()),
            ]),
        }
    }
}

impl LayoutConfig {
    pub fn ring_label(&self, tier: u32) -> String {
        self.ring_labels
            .get(&tier)
            .cloned()
            .unwrap_or_else(|| format!("TIER {tier}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardWidths {
    pub center: f64,
    pub person: f64,
    pub polaroid: f64,
    pub note: f64,
    pub document: f64,
    pub tag: f64,
    pub other: f64,
}

impl Default for CardWidths {
    fn default() -> Self {
        Self {
            center: 180.0,
            person: 140.0,
            polaroid: 140.0,
            note: 160.0,
            document: 170.0,
            tag: 130.0,
            other: 140.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadStyle {
    pub width: f64,
    pub color: String,
    pub opacity: f64,
}

/// Stroke styles indexed by connection weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThreadStyles {
    pub light: ThreadStyle,
    pub medium: ThreadStyle,
    pub strong: ThreadStyle,
}

impl Default for ThreadStyles {
    fn default() -> Self {
        Self {
            light: ThreadStyle {
                width: 1.5,
                color: "#993333".to_string(),
                opacity: 0.6,
            },
            medium: ThreadStyle {
                width: 2.5,
                color: "#b52020".to_string(),
                opacity: 0.75,
            },
            strong: ThreadStyle {
                width: 3.5,
                color: "#c91a1a".to_string(),
                opacity: 0.9,
            },
        }
    }
}

impl ThreadStyles {
    /// Weights above 3 share the strong style; 0 and 1 share the light one.
    pub fn for_weight(&self, weight: u32) -> &ThreadStyle {
        match weight.min(3) {
            3 => &self.strong,
            2 => &self.medium,
            _ => &self.light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    pub widths: CardWidths,
    pub threads: ThreadStyles,
    /// Thread sag as a fraction of endpoint distance.
    pub sag_factor: f64,
    pub max_sag: f64,
    /// Apply the turbulence "yarn" filter to threads.
    pub yarn_texture: bool,
    pub vignette: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            widths: CardWidths::default(),
            threads: ThreadStyles::default(),
            sag_factor: 0.08,
            max_sag: 50.0,
            yarn_texture: true,
            vignette: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Fraction of the container the board occupies after fit.
    pub fit_margin: f64,
    pub wheel_sensitivity: f64,
    pub zoom_in_step: f64,
    pub zoom_out_step: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 2.5,
            fit_margin: 0.9,
            wheel_sensitivity: 0.001,
            zoom_in_step: 1.3,
            zoom_out_step: 0.75,
        }
    }
}

impl ViewportConfig {
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if !scale.is_finite() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalConfig {
    /// Prefix joined with a person's document file names.
    pub document_base: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            document_base: "docs/court-documents/".to_string(),
        }
    }
}

impl BoardConfig {
    /// Builds a config from a (possibly partial) override object.
    pub fn from_value(overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(Self::default())?;
        deep_merge_value(&mut base, overrides);
        let config: Self = serde_json::from_value(base).map_err(|err| Error::Config {
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parses overrides as JSON, JSON5 or YAML depending on the file extension (JSON otherwise).
    pub fn from_str_with_extension(text: &str, extension: &str) -> Result<Self> {
        let overrides: Value = match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::from_str(text).map_err(|err| Error::Config {
                message: err.to_string(),
            })?,
            "json5" => json5::from_str(text).map_err(|err| Error::Config {
                message: err.to_string(),
            })?,
            _ => serde_json::from_str(text)?,
        };
        let overrides = if overrides.is_null() {
            Value::Object(Map::new())
        } else {
            overrides
        };
        Self::from_value(&overrides)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("json");
        Self::from_str_with_extension(&text, ext)
    }

    pub fn validate(&self) -> Result<()> {
        let vp = &self.viewport;
        if !(vp.min_scale > 0.0 && vp.min_scale <= vp.max_scale) {
            return Err(Error::Config {
                message: format!(
                    "viewport scale range [{}, {}] is empty or non-positive",
                    vp.min_scale, vp.max_scale
                ),
            });
        }
        if !(vp.zoom_in_step > 0.0 && vp.zoom_out_step > 0.0) {
            return Err(Error::Config {
                message: "zoom steps must be positive".to_string(),
            });
        }
        let l = &self.layout;
        if l.item_width < 0.0 || l.min_spacing < 0.0 || l.padding < 0.0 {
            return Err(Error::Config {
                message: "layout sizes must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
