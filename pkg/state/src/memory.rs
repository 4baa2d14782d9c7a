use crate::{CreateOutcome, DeleteOutcome, RbacRegistry};
use async_trait::async_trait;
use pkg_types::iam::{GlobalRole, GlobalRoleBinding};
use pkg_types::rbac::{ClusterRole, ClusterRoleBinding};
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    cluster_role_bindings: HashMap<String, ClusterRoleBinding>,
    cluster_roles: HashMap<String, ClusterRole>,
    global_roles: HashMap<String, GlobalRole>,
    global_role_bindings: HashMap<String, GlobalRoleBinding>,
    cluster_role_gets: usize,
    fail_lists: bool,
    fail_creates: bool,
    fail_deletes: bool,
}

/// In-memory `RbacRegistry` for tests. Tracks how many cluster role point
/// reads happened and can be told to fail lists, creates, or deletes.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_cluster_role_binding(&self, binding: ClusterRoleBinding) {
        let mut inner = self.inner.lock().await;
        inner
            .cluster_role_bindings
            .insert(binding.name.clone(), binding);
    }

    pub async fn seed_cluster_role(&self, role: ClusterRole) {
        let mut inner = self.inner.lock().await;
        inner.cluster_roles.insert(role.name.clone(), role);
    }

    pub async fn seed_global_role(&self, role: GlobalRole) {
        let mut inner = self.inner.lock().await;
        inner.global_roles.insert(role.name.clone(), role);
    }

    pub async fn cluster_role_bindings(&self) -> Vec<ClusterRoleBinding> {
        self.inner
            .lock()
            .await
            .cluster_role_bindings
            .values()
            .cloned()
            .collect()
    }

    pub async fn global_roles(&self) -> Vec<GlobalRole> {
        self.inner.lock().await.global_roles.values().cloned().collect()
    }

    pub async fn global_role(&self, name: &str) -> Option<GlobalRole> {
        self.inner.lock().await.global_roles.get(name).cloned()
    }

    pub async fn global_role_bindings(&self) -> Vec<GlobalRoleBinding> {
        self.inner
            .lock()
            .await
            .global_role_bindings
            .values()
            .cloned()
            .collect()
    }

    pub async fn global_role_binding(&self, name: &str) -> Option<GlobalRoleBinding> {
        self.inner.lock().await.global_role_bindings.get(name).cloned()
    }

    /// Number of `get_cluster_role` calls served so far.
    pub async fn cluster_role_gets(&self) -> usize {
        self.inner.lock().await.cluster_role_gets
    }

    pub async fn set_fail_lists(&self, fail: bool) {
        self.inner.lock().await.fail_lists = fail;
    }

    pub async fn set_fail_creates(&self, fail: bool) {
        self.inner.lock().await.fail_creates = fail;
    }

    pub async fn set_fail_deletes(&self, fail: bool) {
        self.inner.lock().await.fail_deletes = fail;
    }
}

#[async_trait]
impl RbacRegistry for MemoryStore {
    async fn list_cluster_role_bindings(&self) -> anyhow::Result<Vec<ClusterRoleBinding>> {
        let inner = self.inner.lock().await;
        if inner.fail_lists {
            anyhow::bail!("injected list failure for cluster role bindings");
        }
        Ok(inner.cluster_role_bindings.values().cloned().collect())
    }

    async fn get_cluster_role(&self, name: &str) -> anyhow::Result<Option<ClusterRole>> {
        let mut inner = self.inner.lock().await;
        inner.cluster_role_gets += 1;
        Ok(inner.cluster_roles.get(name).cloned())
    }

    async fn create_global_role(&self, role: &GlobalRole) -> anyhow::Result<CreateOutcome> {
        let mut inner = self.inner.lock().await;
        if inner.fail_creates {
            anyhow::bail!("injected create failure for global role {}", role.name);
        }
        if inner.global_roles.contains_key(&role.name) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        inner.global_roles.insert(role.name.clone(), role.clone());
        Ok(CreateOutcome::Created)
    }

    async fn create_global_role_binding(
        &self,
        binding: &GlobalRoleBinding,
    ) -> anyhow::Result<CreateOutcome> {
        let mut inner = self.inner.lock().await;
        if inner.fail_creates {
            anyhow::bail!("injected create failure for global role binding {}", binding.name);
        }
        if inner.global_role_bindings.contains_key(&binding.name) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        inner
            .global_role_bindings
            .insert(binding.name.clone(), binding.clone());
        Ok(CreateOutcome::Created)
    }

    async fn delete_cluster_role_binding(&self, name: &str) -> anyhow::Result<DeleteOutcome> {
        let mut inner = self.inner.lock().await;
        if inner.fail_deletes {
            anyhow::bail!("injected delete failure for cluster role binding {}", name);
        }
        match inner.cluster_role_bindings.remove(name) {
            Some(_) => Ok(DeleteOutcome::Deleted),
            None => Ok(DeleteOutcome::NotFound),
        }
    }
}
