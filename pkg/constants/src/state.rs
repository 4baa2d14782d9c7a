//! State store key layout.

/// etcd-style key prefix for legacy cluster role bindings.
pub const CLUSTER_ROLE_BINDINGS_PREFIX: &str = "/registry/rbac/clusterrolebindings/";

/// etcd-style key prefix for legacy cluster roles.
pub const CLUSTER_ROLES_PREFIX: &str = "/registry/rbac/clusterroles/";

/// etcd-style key prefix for global roles.
pub const GLOBAL_ROLES_PREFIX: &str = "/registry/iam/globalroles/";

/// etcd-style key prefix for global role bindings.
pub const GLOBAL_ROLE_BINDINGS_PREFIX: &str = "/registry/iam/globalrolebindings/";
