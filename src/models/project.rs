use serde::{Deserialize, Serialize};

use crate::domain::{ProjectConfig, ProjectId, TemplateId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub user_id: UserId,
    pub template_id: TemplateId,
    pub name: String,
    pub thumbnail: String,
    pub project_config: ProjectConfig,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields a caller may change on an existing project. `None` and empty
/// strings leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub project_config: Option<ProjectConfig>,
}

impl ProjectPatch {
    /// Applies the non-empty fields of the patch. Blank strings are ignored.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name.filter(|n| !n.trim().is_empty()) {
            project.name = name;
        }
        if let Some(thumbnail) = self.thumbnail.filter(|t| !t.is_empty()) {
            project.thumbnail = thumbnail;
        }
        if let Some(config) = self.project_config {
            project.project_config = config;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CanvasConfig;

    fn project() -> Project {
        Project {
            id: ProjectId::generate(),
            user_id: UserId::generate(),
            template_id: TemplateId::generate(),
            name: "My Post".to_string(),
            thumbnail: "thumb.png".to_string(),
            project_config: ProjectConfig::default(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn empty_fields_leave_project_untouched() {
        let mut p = project();
        let before = p.clone();

        let patch = ProjectPatch {
            name: Some(String::new()),
            thumbnail: Some(String::new()),
            project_config: None,
        };

        patch.apply_to(&mut p);
        assert_eq!(p, before);
    }

    #[test]
    fn config_is_replaced_wholesale() {
        let mut p = project();
        p.project_config.layers.push(Default::default());

        let replacement = ProjectConfig {
            canvas: CanvasConfig {
                width: 10,
                height: 20,
                background_color: "#123456".to_string(),
            },
            ..ProjectConfig::default()
        };

        let patch = ProjectPatch {
            name: Some("Renamed".to_string()),
            thumbnail: None,
            project_config: Some(replacement.clone()),
        };

        patch.apply_to(&mut p);
        assert_eq!(p.name, "Renamed");
        assert_eq!(p.thumbnail, "thumb.png");
        assert_eq!(p.project_config, replacement);
        assert!(p.project_config.layers.is_empty());
    }
}
