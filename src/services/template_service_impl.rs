use async_trait::async_trait;

use crate::catalog;
use crate::db::Store;
use crate::domain::TemplateId;
use crate::models::Template;
use crate::services::template_service::{TemplateError, TemplateService};

pub struct SeaOrmTemplateService {
    store: Store,
}

impl SeaOrmTemplateService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TemplateService for SeaOrmTemplateService {
    async fn find_all(&self, platform: Option<&str>) -> Result<Vec<Template>, TemplateError> {
        let platform = platform.map(str::trim).filter(|p| !p.is_empty());
        Ok(self.store.list_templates(platform).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Template>, TemplateError> {
        let id = TemplateId::parse(id).map_err(|e| TemplateError::InvalidId(e.value))?;
        Ok(self.store.get_template(&id).await?)
    }

    async fn seed(&self) -> Result<usize, TemplateError> {
        Ok(self.store.seed_templates(catalog::builtin()).await?)
    }
}
