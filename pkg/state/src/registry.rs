use crate::client::StateStore;
use crate::{CreateOutcome, DeleteOutcome, RbacRegistry};
use anyhow::Context;
use async_trait::async_trait;
use pkg_constants::state::{
    CLUSTER_ROLE_BINDINGS_PREFIX, CLUSTER_ROLES_PREFIX, GLOBAL_ROLE_BINDINGS_PREFIX,
    GLOBAL_ROLES_PREFIX,
};
use pkg_types::iam::{GlobalRole, GlobalRoleBinding};
use pkg_types::rbac::{ClusterRole, ClusterRoleBinding};
use tracing::warn;

/// `RbacRegistry` over the SlateDB `/registry/...` key space, JSON values.
#[derive(Clone)]
pub struct RegistryStore {
    store: StateStore,
}

impl RegistryStore {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RbacRegistry for RegistryStore {
    async fn list_cluster_role_bindings(&self) -> anyhow::Result<Vec<ClusterRoleBinding>> {
        let entries = self.store.list_prefix(CLUSTER_ROLE_BINDINGS_PREFIX).await?;
        let mut bindings = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match serde_json::from_slice::<ClusterRoleBinding>(&value) {
                Ok(binding) => bindings.push(binding),
                // A value we cannot decode is outside the migratable shape;
                // leave it in place like any other ineligible object.
                Err(e) => warn!("Skipping malformed cluster role binding at {}: {}", key, e),
            }
        }
        Ok(bindings)
    }

    async fn get_cluster_role(&self, name: &str) -> anyhow::Result<Option<ClusterRole>> {
        let key = format!("{}{}", CLUSTER_ROLES_PREFIX, name);
        match self.store.get(&key).await? {
            Some(value) => {
                let role = serde_json::from_slice(&value)
                    .with_context(|| format!("decoding cluster role {}", name))?;
                Ok(Some(role))
            }
            None => Ok(None),
        }
    }

    async fn create_global_role(&self, role: &GlobalRole) -> anyhow::Result<CreateOutcome> {
        let key = format!("{}{}", GLOBAL_ROLES_PREFIX, role.name);
        let value = serde_json::to_vec(role)?;
        self.store.put_if_absent(&key, &value).await
    }

    async fn create_global_role_binding(
        &self,
        binding: &GlobalRoleBinding,
    ) -> anyhow::Result<CreateOutcome> {
        let key = format!("{}{}", GLOBAL_ROLE_BINDINGS_PREFIX, binding.name);
        let value = serde_json::to_vec(binding)?;
        self.store.put_if_absent(&key, &value).await
    }

    async fn delete_cluster_role_binding(&self, name: &str) -> anyhow::Result<DeleteOutcome> {
        let key = format!("{}{}", CLUSTER_ROLE_BINDINGS_PREFIX, name);
        self.store.delete(&key).await
    }
}
