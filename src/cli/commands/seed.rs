//! Seed command handler

use crate::catalog;
use crate::config::Config;
use crate::db::Store;

pub async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let inserted = store.seed_templates(catalog::builtin()).await?;

    if inserted == 0 {
        println!(
            "Template catalog already populated ({} templates).",
            store.count_templates().await?
        );
    } else {
        println!("✓ Seeded {inserted} templates.");
    }

    Ok(())
}
