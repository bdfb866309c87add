use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::Store;
use crate::domain::{ProjectConfig, ProjectId, TemplateId, UserId};
use crate::models::{Project, ProjectPatch};
use crate::services::project_service::{ProjectError, ProjectService, ProjectView};

pub struct SeaOrmProjectService {
    store: Store,
}

impl SeaOrmProjectService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProjectService for SeaOrmProjectService {
    async fn create(
        &self,
        user_id: &UserId,
        template_id: &str,
        name: &str,
    ) -> Result<ProjectView, ProjectError> {
        let template_id = TemplateId::parse(template_id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ProjectError::Validation(
                "Project name is required".to_string(),
            ));
        }

        let template = self
            .store
            .get_template(&template_id)
            .await?
            .ok_or(ProjectError::TemplateNotFound)?;

        let config = ProjectConfig::from_template(&template.json_config);
        let project = self
            .store
            .create_project(user_id, &template.id, name, &config)
            .await?;

        info!(project_id = %project.id, template_id = %template.id, "Created project");

        Ok(ProjectView {
            project,
            template: Some(template),
        })
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Project>, ProjectError> {
        Ok(self.store.list_user_projects(user_id).await?)
    }

    async fn get(&self, project_id: &str, user_id: &UserId) -> Result<ProjectView, ProjectError> {
        let project_id = ProjectId::parse(project_id)?;
        let project = self
            .store
            .get_owned_project(&project_id, user_id)
            .await?
            .ok_or(ProjectError::NotFound)?;

        let template = match self.store.get_template(&project.template_id).await {
            Ok(template) => template,
            Err(e) => {
                warn!(
                    project_id = %project.id,
                    template_id = %project.template_id,
                    error = %e,
                    "Failed to load originating template"
                );
                None
            }
        };

        Ok(ProjectView { project, template })
    }

    async fn update(
        &self,
        project_id: &str,
        user_id: &UserId,
        patch: ProjectPatch,
    ) -> Result<Project, ProjectError> {
        let project_id = ProjectId::parse(project_id)?;
        let mut project = self
            .store
            .get_owned_project(&project_id, user_id)
            .await?
            .ok_or(ProjectError::NotFound)?;

        patch.apply_to(&mut project);

        // The row may have been deleted since the read.
        self.store
            .update_owned_project(&project)
            .await?
            .ok_or(ProjectError::NotFound)
    }

    async fn delete(&self, project_id: &str, user_id: &UserId) -> Result<(), ProjectError> {
        let project_id = ProjectId::parse(project_id)?;
        if self.store.delete_owned_project(&project_id, user_id).await? {
            info!(project_id = %project_id, "Deleted project");
            Ok(())
        } else {
            Err(ProjectError::NotFound)
        }
    }

    async fn count(&self, user_id: &UserId) -> Result<u64, ProjectError> {
        Ok(self.store.count_user_projects(user_id).await?)
    }
}
