use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::{ProjectConfig, ProjectId, TemplateId, UserId};
use crate::models::{NewTemplate, Project, Template, User};

pub mod migrator;
pub mod repositories;

/// RFC 3339 with fixed microsecond precision so stored timestamps sort
/// lexicographically in time order.
#[must_use]
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

fn is_memory_url(db_url: &str) -> bool {
    db_url.contains(":memory:")
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // Every connection to an in-memory SQLite database sees its own empty
        // database, so the pool must hold exactly one.
        let (max_connections, min_connections) = if is_memory_url(db_url) {
            (1, 1)
        } else {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !is_memory_url(db_url) {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn template_repo(&self) -> repositories::template::TemplateRepository {
        repositories::template::TemplateRepository::new(self.conn.clone())
    }

    fn project_repo(&self) -> repositories::project::ProjectRepository {
        repositories::project::ProjectRepository::new(self.conn.clone())
    }

    // Users

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        self.user_repo().email_exists(email).await
    }

    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo()
            .create(email, name, password, security)
            .await
    }

    pub async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(email, password).await
    }

    // Templates

    pub async fn list_templates(&self, platform: Option<&str>) -> Result<Vec<Template>> {
        self.template_repo().find_all(platform).await
    }

    pub async fn get_template(&self, id: &TemplateId) -> Result<Option<Template>> {
        self.template_repo().find_by_id(id).await
    }

    pub async fn count_templates(&self) -> Result<u64> {
        self.template_repo().count().await
    }

    pub async fn seed_templates(&self, catalog: Vec<NewTemplate>) -> Result<usize> {
        self.template_repo().seed(catalog).await
    }

    // Projects

    pub async fn create_project(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
        name: &str,
        config: &ProjectConfig,
    ) -> Result<Project> {
        self.project_repo()
            .create(user_id, template_id, name, config)
            .await
    }

    pub async fn list_user_projects(&self, user_id: &UserId) -> Result<Vec<Project>> {
        self.project_repo().find_by_user(user_id).await
    }

    pub async fn get_owned_project(
        &self,
        id: &ProjectId,
        user_id: &UserId,
    ) -> Result<Option<Project>> {
        self.project_repo().find_owned(id, user_id).await
    }

    pub async fn update_owned_project(&self, project: &Project) -> Result<Option<Project>> {
        self.project_repo().update_owned(project).await
    }

    pub async fn delete_owned_project(&self, id: &ProjectId, user_id: &UserId) -> Result<bool> {
        self.project_repo().delete_owned(id, user_id).await
    }

    pub async fn count_user_projects(&self, user_id: &UserId) -> Result<u64> {
        self.project_repo().count_by_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    async fn memory_store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    #[test]
    fn timestamps_sort_in_time_order() {
        let a = now_timestamp();
        std::thread::sleep(Duration::from_millis(2));
        let b = now_timestamp();
        assert!(a < b);
        assert!(a.ends_with('Z'));
    }

    #[tokio::test]
    async fn seed_is_idempotent() {
        let store = memory_store().await;

        let first = store.seed_templates(catalog::builtin()).await.unwrap();
        assert!(first > 0);
        let count = store.count_templates().await.unwrap();

        let second = store.seed_templates(catalog::builtin()).await.unwrap();
        assert_eq!(second, 0);
        assert_eq!(store.count_templates().await.unwrap(), count);
    }

    #[tokio::test]
    async fn template_listing_keeps_catalog_order_and_filters() {
        let store = memory_store().await;
        store.seed_templates(catalog::builtin()).await.unwrap();

        let names: Vec<String> = store
            .list_templates(None)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        let expected: Vec<String> = catalog::builtin().into_iter().map(|t| t.name).collect();
        assert_eq!(names, expected);

        let ios = store.list_templates(Some("ios")).await.unwrap();
        assert!(!ios.is_empty());
        assert!(ios.iter().all(|t| t.platform == "ios"));

        assert!(store.list_templates(Some("windows")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn owned_project_queries_ignore_other_users() {
        let store = memory_store().await;
        store.seed_templates(catalog::builtin()).await.unwrap();
        let template = store.list_templates(None).await.unwrap().remove(0);

        let owner = UserId::generate();
        let stranger = UserId::generate();
        let config = ProjectConfig::from_template(&template.json_config);
        let project = store
            .create_project(&owner, &template.id, "Mine", &config)
            .await
            .unwrap();

        assert!(
            store
                .get_owned_project(&project.id, &stranger)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            !store
                .delete_owned_project(&project.id, &stranger)
                .await
                .unwrap()
        );

        let mut hijacked = project.clone();
        hijacked.user_id = stranger;
        hijacked.name = "Stolen".to_string();
        assert!(store.update_owned_project(&hijacked).await.unwrap().is_none());

        let stored = store
            .get_owned_project(&project.id, &owner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "Mine");
        assert!(store.delete_owned_project(&project.id, &owner).await.unwrap());
        assert_eq!(store.count_user_projects(&owner).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn corrupt_template_row_is_an_error() {
        use crate::entities::templates;
        use sea_orm::{ActiveModelTrait, EntityTrait, Set};

        let store = memory_store().await;
        store.seed_templates(catalog::builtin()).await.unwrap();
        let template = store.list_templates(None).await.unwrap().remove(0);

        let row = templates::Entity::find_by_id(template.id.to_string())
            .one(&store.conn)
            .await
            .unwrap()
            .unwrap();
        let mut row: templates::ActiveModel = row.into();
        row.thumbnails = Set("not json".to_string());
        row.update(&store.conn).await.unwrap();

        let err = store.get_template(&template.id).await.unwrap_err();
        assert!(format!("{err:#}").contains("Corrupt thumbnails"), "{err:#}");
        assert!(store.list_templates(None).await.is_err());
    }
}
