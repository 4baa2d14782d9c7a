use crate::catalog::MigrationCatalog;
use pkg_state::{CreateOutcome, DeleteOutcome, RbacRegistry};
use pkg_types::iam::{GlobalRole, GlobalRoleBinding};
use pkg_types::rbac::ClusterRoleBinding;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// One-shot task that migrates legacy personal cluster role bindings to
/// global roles and global role bindings, then retires the legacy objects.
pub struct GlobalRoleBindingMigration<'a, S> {
    store: &'a S,
    catalog: MigrationCatalog,
}

/// Objects resolved for publication. Roles are deduplicated by name and must
/// be written before the bindings that reference them.
struct MigrationBatch {
    roles: Vec<GlobalRole>,
    bindings: Vec<GlobalRoleBinding>,
}

impl<'a, S: RbacRegistry> GlobalRoleBindingMigration<'a, S> {
    pub fn new(store: &'a S, catalog: MigrationCatalog) -> Self {
        Self { store, catalog }
    }

    /// Run the migration to completion. Returns the first fatal error;
    /// re-running after a partial run is safe and converges.
    pub async fn run(&self) -> anyhow::Result<()> {
        let all_bindings = self.store.list_cluster_role_bindings().await?;
        let eligible: Vec<&ClusterRoleBinding> =
            all_bindings.iter().filter(|b| b.is_personal()).collect();
        info!(
            "Migrating {} personal cluster role bindings ({} listed)",
            eligible.len(),
            all_bindings.len()
        );

        let batch = self.resolve(&eligible).await?;
        self.publish(&batch).await?;
        self.retire(&eligible).await;
        Ok(())
    }

    async fn resolve(&self, eligible: &[&ClusterRoleBinding]) -> anyhow::Result<MigrationBatch> {
        let mut roles: Vec<GlobalRole> = Vec::new();
        let mut queued: HashSet<String> = HashSet::new();
        let mut bindings: Vec<GlobalRoleBinding> = Vec::new();

        for binding in eligible {
            // is_personal guarantees exactly one subject
            let username = &binding.subjects[0].name;

            let global_role = match self.catalog.mapped_role(&binding.role_ref) {
                Some(target) => target.to_string(),
                None => {
                    let Some(role) = self.store.get_cluster_role(&binding.role_ref).await? else {
                        warn!(
                            "Invalid cluster role binding {}: role {} not found",
                            binding.name, binding.role_ref
                        );
                        continue;
                    };
                    if !role.is_user_authored() {
                        debug!(
                            "Skipping binding {}: role {} is system-managed",
                            binding.name, role.name
                        );
                        continue;
                    }
                    // Several bindings may reference the same custom role;
                    // synthesize it once.
                    if queued.insert(role.name.clone()) {
                        let templates = self.catalog.satisfied_templates(&role.rules);
                        info!(
                            "Synthesized global role {} aggregating {} templates",
                            role.name,
                            templates.len()
                        );
                        roles.push(GlobalRole::aggregated(&role.name, &templates));
                    }
                    role.name
                }
            };

            bindings.push(GlobalRoleBinding::for_user(username, &global_role));
        }

        Ok(MigrationBatch { roles, bindings })
    }

    async fn publish(&self, batch: &MigrationBatch) -> anyhow::Result<()> {
        // Roles first, so no published binding ever references a role that
        // is not yet visible.
        for role in &batch.roles {
            match self.store.create_global_role(role).await? {
                CreateOutcome::Created => info!(
                    "Published global role {}: {}",
                    role.name,
                    serde_json::to_string(role).unwrap_or_default()
                ),
                CreateOutcome::AlreadyExists => {
                    info!("Global role {} already exists, keeping it", role.name)
                }
            }
        }
        for binding in &batch.bindings {
            match self.store.create_global_role_binding(binding).await? {
                CreateOutcome::Created => info!(
                    "Published global role binding {}: {}",
                    binding.name,
                    serde_json::to_string(binding).unwrap_or_default()
                ),
                CreateOutcome::AlreadyExists => {
                    info!("Global role binding {} already exists, keeping it", binding.name)
                }
            }
        }
        Ok(())
    }

    /// Best-effort cleanup of the legacy bindings. Failures are logged and
    /// never abort: the published objects are already authoritative.
    async fn retire(&self, eligible: &[&ClusterRoleBinding]) {
        for binding in eligible {
            match self.store.delete_cluster_role_binding(&binding.name).await {
                Ok(DeleteOutcome::Deleted) => {
                    info!("Deleted legacy cluster role binding {}", binding.name)
                }
                Ok(DeleteOutcome::NotFound) => {
                    debug!("Legacy cluster role binding {} already gone", binding.name)
                }
                Err(e) => warn!(
                    "Failed to delete legacy cluster role binding {}: {}",
                    binding.name, e
                ),
            }
        }
    }
}
