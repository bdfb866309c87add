use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    pub description: String,

    pub platform: String,

    pub category: String,

    pub thumbnail: String,

    /// JSON array of preview image URLs.
    #[sea_orm(column_type = "Text")]
    pub thumbnails: String,

    /// Serialized `TemplateConfig`.
    #[sea_orm(column_type = "Text")]
    pub json_config: String,

    pub is_active: bool,

    /// Position within the catalog; listing order.
    pub sort_order: i32,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
