use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, sea_query::Expr,
};

use crate::domain::{ProjectConfig, ProjectId, TemplateId, UserId};
use crate::entities::{prelude::*, projects};
use crate::models::Project;

pub struct ProjectRepository {
    conn: DatabaseConnection,
}

/// Matches a project by id and owner in one predicate, so a project owned by
/// someone else is indistinguishable from a missing one.
fn owned_by(id: &ProjectId, user_id: &UserId) -> Condition {
    Condition::all()
        .add(projects::Column::Id.eq(id.to_string()))
        .add(projects::Column::UserId.eq(user_id.to_string()))
}

impl ProjectRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: projects::Model) -> Result<Project> {
        Ok(Project {
            id: ProjectId::parse(&model.id).context("Corrupt project id in database")?,
            user_id: UserId::parse(&model.user_id).context("Corrupt project owner in database")?,
            template_id: TemplateId::parse(&model.template_id)
                .context("Corrupt project template id in database")?,
            name: model.name,
            thumbnail: model.thumbnail,
            project_config: serde_json::from_str(&model.project_config).with_context(|| {
                format!("Corrupt project_config for project {}", model.id)
            })?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    pub async fn create(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
        name: &str,
        config: &ProjectConfig,
    ) -> Result<Project> {
        let now = crate::db::now_timestamp();
        let model = projects::ActiveModel {
            id: Set(ProjectId::generate().to_string()),
            user_id: Set(user_id.to_string()),
            template_id: Set(template_id.to_string()),
            name: Set(name.to_string()),
            thumbnail: Set(String::new()),
            project_config: Set(serde_json::to_string(config)?),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let inserted = model
            .insert(&self.conn)
            .await
            .context("Failed to insert project")?;

        Self::map_model(inserted)
    }

    /// All projects of a user, most recently updated first.
    pub async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Project>> {
        let rows = Projects::find()
            .filter(projects::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(projects::Column::UpdatedAt)
            .order_by_desc(projects::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list projects for user")?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn find_owned(&self, id: &ProjectId, user_id: &UserId) -> Result<Option<Project>> {
        let row = Projects::find()
            .filter(owned_by(id, user_id))
            .one(&self.conn)
            .await
            .context("Failed to query project")?;

        row.map(Self::map_model).transpose()
    }

    /// Writes the mutable fields of `project`, scoped to its owner, and stamps
    /// a new `updated_at`. Returns `None` when no owned row matched.
    pub async fn update_owned(&self, project: &Project) -> Result<Option<Project>> {
        let now = crate::db::now_timestamp();

        let result = Projects::update_many()
            .col_expr(projects::Column::Name, Expr::value(project.name.clone()))
            .col_expr(
                projects::Column::Thumbnail,
                Expr::value(project.thumbnail.clone()),
            )
            .col_expr(
                projects::Column::ProjectConfig,
                Expr::value(serde_json::to_string(&project.project_config)?),
            )
            .col_expr(projects::Column::UpdatedAt, Expr::value(now.clone()))
            .filter(owned_by(&project.id, &project.user_id))
            .exec(&self.conn)
            .await
            .context("Failed to update project")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let mut updated = project.clone();
        updated.updated_at = now;
        Ok(Some(updated))
    }

    /// Hard delete scoped to the owner. Returns whether a row was removed.
    pub async fn delete_owned(&self, id: &ProjectId, user_id: &UserId) -> Result<bool> {
        let result = Projects::delete_many()
            .filter(owned_by(id, user_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete project")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_by_user(&self, user_id: &UserId) -> Result<u64> {
        Projects::find()
            .filter(projects::Column::UserId.eq(user_id.to_string()))
            .count(&self.conn)
            .await
            .context("Failed to count projects")
    }
}
