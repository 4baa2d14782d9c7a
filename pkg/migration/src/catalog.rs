use crate::rules::rules_cover;
use pkg_constants::iam::{PLATFORM_ADMIN_ROLE, PLATFORM_REGULAR_ROLE, WORKSPACES_MANAGER_ROLE};
use pkg_types::rbac::PolicyRule;
use std::collections::HashMap;

/// One discrete capability: a template id plus the minimal rule that grants it.
#[derive(Debug, Clone)]
pub struct RoleTemplate {
    pub id: String,
    pub rule: PolicyRule,
}

/// Immutable migration configuration: the well-known legacy-role → global-role
/// mapping and the capability template catalog custom roles are matched
/// against. Built once at startup and passed into the migration explicitly.
#[derive(Debug, Clone)]
pub struct MigrationCatalog {
    role_mapping: HashMap<String, String>,
    templates: Vec<RoleTemplate>,
}

const VIEW_VERBS: &[&str] = &["get", "list"];
const MANAGE_VERBS: &[&str] = &["get", "list", "create", "delete", "update"];

fn template(id: &str, verbs: &[&str], api_groups: &[&str], resources: &[&str]) -> RoleTemplate {
    RoleTemplate {
        id: id.to_string(),
        rule: PolicyRule {
            verbs: verbs.iter().map(|s| s.to_string()).collect(),
            api_groups: api_groups.iter().map(|s| s.to_string()).collect(),
            resources: resources.iter().map(|s| s.to_string()).collect(),
        },
    }
}

impl MigrationCatalog {
    /// The built-in catalog shipped with this release.
    pub fn builtin() -> Self {
        let role_mapping = HashMap::from([
            ("cluster-admin".to_string(), PLATFORM_ADMIN_ROLE.to_string()),
            ("cluster-regular".to_string(), PLATFORM_REGULAR_ROLE.to_string()),
            (
                WORKSPACES_MANAGER_ROLE.to_string(),
                WORKSPACES_MANAGER_ROLE.to_string(),
            ),
        ]);
        let templates = vec![
            template("role-template-view-users", VIEW_VERBS, &["*"], &["users"]),
            template(
                "role-template-view-workspaces",
                VIEW_VERBS,
                &["*"],
                &["workspaces"],
            ),
            template(
                "role-template-view-roles",
                VIEW_VERBS,
                &["*"],
                &["clusterroles"],
            ),
            template(
                "role-template-view-app-templates",
                VIEW_VERBS,
                &["apps.k3rs.dev"],
                &["apps"],
            ),
            template("role-template-manage-users", MANAGE_VERBS, &["*"], &["users"]),
            template(
                "role-template-manage-workspaces",
                MANAGE_VERBS,
                &["*"],
                &["workspaces"],
            ),
            template(
                "role-template-manage-roles",
                MANAGE_VERBS,
                &["*"],
                &["clusterroles"],
            ),
            template(
                "role-template-manage-app-templates",
                MANAGE_VERBS,
                &["apps.k3rs.dev"],
                &["apps"],
            ),
        ];
        Self {
            role_mapping,
            templates,
        }
    }

    /// Target global role for a well-known legacy role, if one is mapped.
    pub fn mapped_role(&self, legacy_role: &str) -> Option<&str> {
        self.role_mapping.get(legacy_role).map(String::as_str)
    }

    /// Ids of every template whose rule is covered by `rules`. Returned in
    /// catalog order; callers treat the list as a set.
    pub fn satisfied_templates(&self, rules: &[PolicyRule]) -> Vec<String> {
        self.templates
            .iter()
            .filter(|t| rules_cover(rules, &t.rule))
            .map(|t| t.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(verbs: &[&str], api_groups: &[&str], resources: &[&str]) -> PolicyRule {
        PolicyRule {
            verbs: verbs.iter().map(|s| s.to_string()).collect(),
            api_groups: api_groups.iter().map(|s| s.to_string()).collect(),
            resources: resources.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn well_known_roles_are_mapped() {
        let catalog = MigrationCatalog::builtin();
        assert_eq!(catalog.mapped_role("cluster-admin"), Some("platform-admin"));
        assert_eq!(
            catalog.mapped_role("cluster-regular"),
            Some("platform-regular")
        );
        assert_eq!(
            catalog.mapped_role("workspaces-manager"),
            Some("workspaces-manager")
        );
        assert_eq!(catalog.mapped_role("custom-role-x"), None);
    }

    #[test]
    fn view_only_user_rules_satisfy_exactly_the_view_users_template() {
        let catalog = MigrationCatalog::builtin();
        let satisfied = catalog.satisfied_templates(&[rule(&["get", "list"], &["*"], &["users"])]);
        assert_eq!(satisfied, vec!["role-template-view-users".to_string()]);
    }

    #[test]
    fn manage_rules_also_satisfy_the_view_template() {
        let catalog = MigrationCatalog::builtin();
        let satisfied = catalog.satisfied_templates(&[rule(
            &["get", "list", "create", "delete", "update"],
            &["*"],
            &["users"],
        )]);
        assert!(satisfied.contains(&"role-template-view-users".to_string()));
        assert!(satisfied.contains(&"role-template-manage-users".to_string()));
        assert_eq!(satisfied.len(), 2);
    }

    #[test]
    fn full_wildcard_satisfies_every_template() {
        let catalog = MigrationCatalog::builtin();
        let satisfied = catalog.satisfied_templates(&[rule(&["*"], &["*"], &["*"])]);
        assert_eq!(satisfied.len(), 8);
    }

    #[test]
    fn broadening_rules_keeps_previously_satisfied_templates() {
        let catalog = MigrationCatalog::builtin();
        let mut rules = vec![rule(&["get", "list"], &["*"], &["users"])];
        let before = catalog.satisfied_templates(&rules);

        rules.push(rule(&["*"], &["*"], &["workspaces"]));
        rules[0].verbs.push("create".to_string());
        let after = catalog.satisfied_templates(&rules);

        for id in &before {
            assert!(after.contains(id), "template {} lost after broadening", id);
        }
    }

    #[test]
    fn no_rules_satisfy_nothing() {
        let catalog = MigrationCatalog::builtin();
        assert!(catalog.satisfied_templates(&[]).is_empty());
    }
}
