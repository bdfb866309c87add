//! Canvas, layer and export descriptors shared by templates and projects.
//!
//! All types are plain owned values, so cloning a [`TemplateConfig`] yields a
//! fully independent copy with no shared state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1290,
            height: 2796,
            background_color: "#ffffff".to_string(),
        }
    }
}

/// A single drawable layer. `properties` depends on `kind` (text, image,
/// shape, screenshot) and is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub visible: bool,
    pub locked: bool,
    pub opacity: f64,
    pub properties: Value,
    pub z_index: i32,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: "shape".to_string(),
            name: String::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            visible: true,
            locked: false,
            opacity: 1.0,
            properties: Value::Object(serde_json::Map::new()),
            z_index: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSize {
    pub name: String,
    pub platform: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideData {
    pub id: String,
    pub canvas: CanvasConfig,
    pub layers: Vec<LayerConfig>,
}

/// An uploaded asset referenced by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageAsset {
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateConfig {
    pub canvas: CanvasConfig,
    pub layers: Vec<LayerConfig>,
    pub exports: Vec<ExportSize>,
    pub slides: Vec<SlideData>,
}

/// The self-contained editing state of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    pub canvas: CanvasConfig,
    pub layers: Vec<LayerConfig>,
    pub images: Vec<ImageAsset>,
    pub slides: Vec<SlideData>,
    pub exports: Vec<ExportSize>,
}

impl ProjectConfig {
    /// Snapshots a template into a new project configuration with no images.
    #[must_use]
    pub fn from_template(template: &TemplateConfig) -> Self {
        Self {
            canvas: template.canvas.clone(),
            layers: template.layers.clone(),
            images: Vec::new(),
            slides: template.slides.clone(),
            exports: template.exports.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_template() -> TemplateConfig {
        TemplateConfig {
            canvas: CanvasConfig {
                width: 1080,
                height: 1920,
                background_color: "#000000".to_string(),
            },
            layers: vec![LayerConfig {
                id: "title".to_string(),
                kind: "text".to_string(),
                properties: json!({ "content": "Hello" }),
                ..LayerConfig::default()
            }],
            exports: vec![ExportSize {
                name: "Phone".to_string(),
                platform: "android".to_string(),
                width: 1080,
                height: 1920,
            }],
            slides: Vec::new(),
        }
    }

    #[test]
    fn from_template_copies_fields_and_starts_without_images() {
        let template = sample_template();
        let project = ProjectConfig::from_template(&template);

        assert_eq!(project.canvas, template.canvas);
        assert_eq!(project.layers, template.layers);
        assert_eq!(project.exports, template.exports);
        assert!(project.images.is_empty());
    }

    #[test]
    fn project_copy_is_independent_of_template() {
        let mut template = sample_template();
        let mut project = ProjectConfig::from_template(&template);

        project.layers[0].properties["content"] = json!("Changed");
        project.canvas.width = 1;
        assert_eq!(template.layers[0].properties["content"], json!("Hello"));
        assert_eq!(template.canvas.width, 1080);

        template.layers.clear();
        assert_eq!(project.layers.len(), 1);
    }

    #[test]
    fn layer_uses_wire_field_names() {
        let layer: LayerConfig = serde_json::from_value(json!({
            "id": "l1",
            "type": "image",
            "zIndex": 3,
            "properties": { "src": "https://cdn.test/a.png" }
        }))
        .unwrap();

        assert_eq!(layer.kind, "image");
        assert_eq!(layer.z_index, 3);
        assert!(layer.visible);

        let value = serde_json::to_value(&layer).unwrap();
        assert_eq!(value["type"], "image");
        assert_eq!(value["zIndex"], 3);
    }
}
