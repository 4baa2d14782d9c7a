//! Access to the cluster object store, typed per resource kind.
//!
//! `StateStore` is the raw SlateDB key-value client. `RbacRegistry` is the
//! narrow capability surface the migration needs; `RegistryStore` implements
//! it against SlateDB and `MemoryStore` implements it in memory for tests.

use async_trait::async_trait;
use pkg_types::iam::{GlobalRole, GlobalRoleBinding};
use pkg_types::rbac::{ClusterRole, ClusterRoleBinding};

pub mod client;
pub mod memory;
pub mod registry;

/// Result of a create call. "Already exists" is an outcome, not an error:
/// re-running the migration must converge on objects a prior run created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Result of a delete call. "Not found" is an outcome, not an error: the
/// object being gone already is the state the caller wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// The store operations the RBAC migration needs, one method per resource
/// kind. Errors returned here are transport or decode failures; existence
/// outcomes are modeled in the `Ok` variants.
#[async_trait]
pub trait RbacRegistry: Send + Sync {
    async fn list_cluster_role_bindings(&self) -> anyhow::Result<Vec<ClusterRoleBinding>>;

    /// `None` means the role does not exist (a dangling reference, for the
    /// migration's purposes).
    async fn get_cluster_role(&self, name: &str) -> anyhow::Result<Option<ClusterRole>>;

    async fn create_global_role(&self, role: &GlobalRole) -> anyhow::Result<CreateOutcome>;

    async fn create_global_role_binding(
        &self,
        binding: &GlobalRoleBinding,
    ) -> anyhow::Result<CreateOutcome>;

    /// Immediate delete, no grace period.
    async fn delete_cluster_role_binding(&self, name: &str) -> anyhow::Result<DeleteOutcome>;
}
