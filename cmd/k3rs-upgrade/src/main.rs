use clap::Parser;
use pkg_migration::{GlobalRoleBindingMigration, MigrationCatalog};
use pkg_state::client::StateStore;
use pkg_state::registry::RegistryStore;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "k3rs-upgrade",
    about = "One-shot migration of legacy RBAC bindings to global roles"
)]
struct Cli {
    /// Directory for SlateDB state storage
    #[arg(long, default_value = "/tmp/k3rs-data")]
    data_dir: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    info!("Starting k3rs-upgrade");
    info!("  Data dir:  {}", cli.data_dir);

    let store = StateStore::new(&cli.data_dir).await?;
    let registry = RegistryStore::new(store.clone());

    let migration = GlobalRoleBindingMigration::new(&registry, MigrationCatalog::builtin());
    let result = migration.run().await;

    // Close the store even when the migration failed.
    store.close().await?;
    result?;

    info!("Migration complete");
    Ok(())
}
