//! IAM annotation, label, and well-known role name constants.

/// Annotation marking a cluster role as user-authored. Roles without it are
/// system-managed and never migrated.
pub const CREATOR_ANNOTATION: &str = "iam.k3rs.dev/creator";

/// Annotation on a GlobalRole holding the JSON array of aggregated template ids.
pub const AGGREGATION_ROLES_ANNOTATION: &str = "iam.k3rs.dev/aggregation-roles";

/// Label on a GlobalRoleBinding pointing back to its user.
pub const USER_REF_LABEL: &str = "iam.k3rs.dev/user-ref";

/// Built-in global role granted to former cluster-admins.
pub const PLATFORM_ADMIN_ROLE: &str = "platform-admin";

/// Built-in global role granted to former regular cluster users.
pub const PLATFORM_REGULAR_ROLE: &str = "platform-regular";

/// Built-in global role for workspace managers (name carries over unchanged).
pub const WORKSPACES_MANAGER_ROLE: &str = "workspaces-manager";
