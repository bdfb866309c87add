use serde::{Deserialize, Serialize};

use crate::domain::{TemplateConfig, TemplateId};

/// A catalog entry users instantiate projects from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub platform: String,
    pub category: String,
    pub thumbnail: String,
    #[serde(default)]
    pub thumbnails: Vec<String>,
    pub json_config: TemplateConfig,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Catalog definition used when seeding; ids and timestamps are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub description: String,
    pub platform: String,
    pub category: String,
    pub thumbnail: String,
    pub thumbnails: Vec<String>,
    pub json_config: TemplateConfig,
}
