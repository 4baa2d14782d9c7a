use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- Policy rules ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// API groups this rule applies to (e.g., "" for core, "*" for all)
    pub api_groups: Vec<String>,
    /// Resource types (e.g., "users", "workspaces", "*" for all)
    pub resources: Vec<String>,
    /// Allowed verbs (e.g., "get", "list", "create", "update", "delete", "*" for all)
    pub verbs: Vec<String>,
}

// --- Subject ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectKind {
    User,
    Group,
    ServiceAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub kind: SubjectKind,
    pub name: String,
}

impl Subject {
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            kind: SubjectKind::User,
            name: name.into(),
        }
    }
}

// --- ClusterRole (legacy) ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterRole {
    pub name: String,
    pub rules: Vec<PolicyRule>,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

impl ClusterRole {
    /// Whether this role was authored by a user, as opposed to being
    /// system-managed. Only user-authored roles are candidates for migration.
    pub fn is_user_authored(&self) -> bool {
        self.annotations
            .get(pkg_constants::iam::CREATOR_ANNOTATION)
            .is_some_and(|v| !v.is_empty())
    }
}

// --- ClusterRoleBinding (legacy) ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterRoleBinding {
    pub name: String,
    pub role_ref: String,
    pub subjects: Vec<Subject>,
}

impl ClusterRoleBinding {
    /// A personal binding names exactly one `User` subject and is itself named
    /// after that user. Only personal bindings belong to the legacy
    /// per-user permission scheme; anything else is left alone.
    pub fn is_personal(&self) -> bool {
        match self.subjects.as_slice() {
            [subject] => subject.kind == SubjectKind::User && subject.name == self.name,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(name: &str, subjects: Vec<Subject>) -> ClusterRoleBinding {
        ClusterRoleBinding {
            name: name.to_string(),
            role_ref: "cluster-admin".to_string(),
            subjects,
        }
    }

    #[test]
    fn personal_binding_matches_single_user_named_after_it() {
        assert!(binding("alice", vec![Subject::user("alice")]).is_personal());
    }

    #[test]
    fn non_personal_bindings() {
        // name differs from subject
        assert!(!binding("ops-team", vec![Subject::user("alice")]).is_personal());
        // more than one subject
        assert!(
            !binding("alice", vec![Subject::user("alice"), Subject::user("bob")]).is_personal()
        );
        // no subjects at all
        assert!(!binding("alice", vec![]).is_personal());
        // non-user subject
        assert!(
            !binding(
                "ci-bot",
                vec![Subject {
                    kind: SubjectKind::ServiceAccount,
                    name: "ci-bot".to_string(),
                }]
            )
            .is_personal()
        );
    }

    #[test]
    fn user_authored_requires_non_empty_creator() {
        let mut role = ClusterRole {
            name: "custom".to_string(),
            rules: vec![],
            annotations: HashMap::new(),
        };
        assert!(!role.is_user_authored());

        role.annotations
            .insert(pkg_constants::iam::CREATOR_ANNOTATION.to_string(), String::new());
        assert!(!role.is_user_authored());

        role.annotations
            .insert(pkg_constants::iam::CREATOR_ANNOTATION.to_string(), "alice".to_string());
        assert!(role.is_user_authored());
    }
}
