use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::domain::TemplateId;
use crate::entities::{prelude::*, templates};
use crate::models::{NewTemplate, Template};

pub struct TemplateRepository {
    conn: DatabaseConnection,
}

impl TemplateRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: templates::Model) -> Result<Template> {
        Ok(Template {
            id: TemplateId::parse(&model.id).context("Corrupt template id in database")?,
            name: model.name,
            description: model.description,
            platform: model.platform,
            category: model.category,
            thumbnail: model.thumbnail,
            thumbnails: serde_json::from_str(&model.thumbnails).with_context(|| {
                format!("Corrupt thumbnails for template {}", model.id)
            })?,
            json_config: serde_json::from_str(&model.json_config).with_context(|| {
                format!("Corrupt json_config for template {}", model.id)
            })?,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    /// Lists templates in catalog order, optionally restricted to one platform.
    pub async fn find_all(&self, platform: Option<&str>) -> Result<Vec<Template>> {
        let mut query = Templates::find();
        if let Some(platform) = platform {
            query = query.filter(templates::Column::Platform.eq(platform));
        }

        let rows = query
            .order_by_asc(templates::Column::SortOrder)
            .order_by_asc(templates::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list templates")?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn find_by_id(&self, id: &TemplateId) -> Result<Option<Template>> {
        let row = Templates::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query template by ID")?;

        row.map(Self::map_model).transpose()
    }

    pub async fn count(&self) -> Result<u64> {
        Templates::find()
            .count(&self.conn)
            .await
            .context("Failed to count templates")
    }

    /// Inserts the given templates in one statement, preserving their order.
    pub async fn insert_many(&self, catalog: Vec<NewTemplate>) -> Result<usize> {
        if catalog.is_empty() {
            return Ok(0);
        }

        let now = crate::db::now_timestamp();
        let len = catalog.len();
        let mut models = Vec::with_capacity(len);

        for (position, template) in catalog.into_iter().enumerate() {
            models.push(templates::ActiveModel {
                id: Set(TemplateId::generate().to_string()),
                name: Set(template.name),
                description: Set(template.description),
                platform: Set(template.platform),
                category: Set(template.category),
                thumbnail: Set(template.thumbnail),
                thumbnails: Set(serde_json::to_string(&template.thumbnails)?),
                json_config: Set(serde_json::to_string(&template.json_config)?),
                is_active: Set(true),
                sort_order: Set(i32::try_from(position).unwrap_or(i32::MAX)),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
            });
        }

        Templates::insert_many(models)
            .exec(&self.conn)
            .await
            .context("Failed to insert templates")?;

        Ok(len)
    }

    /// Inserts `catalog` only when no template exists yet. Returns the number
    /// of rows inserted (zero when the catalog was already populated).
    pub async fn seed(&self, catalog: Vec<NewTemplate>) -> Result<usize> {
        let existing = self.count().await?;
        if existing > 0 {
            info!(existing, "Template catalog already populated, skipping seed");
            return Ok(0);
        }

        let inserted = self.insert_many(catalog).await?;
        info!(inserted, "Seeded template catalog");
        Ok(inserted)
    }
}
