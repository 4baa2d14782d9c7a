use crate::rbac::{PolicyRule, Subject};
use pkg_constants::iam::{AGGREGATION_ROLES_ANNOTATION, USER_REF_LABEL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- GlobalRole ---

/// Platform-wide role in the new IAM model. An aggregated GlobalRole carries
/// no rules of its own: its capabilities are the role templates listed in the
/// aggregation annotation, expanded at apply time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalRole {
    pub name: String,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
    pub rules: Vec<PolicyRule>,
}

impl GlobalRole {
    /// Build an aggregated GlobalRole from the template ids it satisfies.
    pub fn aggregated(name: impl Into<String>, template_ids: &[String]) -> Self {
        let mut annotations = HashMap::new();
        annotations.insert(
            AGGREGATION_ROLES_ANNOTATION.to_string(),
            serde_json::to_string(template_ids).unwrap_or_default(),
        );
        Self {
            name: name.into(),
            annotations,
            rules: Vec::new(),
        }
    }

    /// The template ids recorded in the aggregation annotation, if any.
    pub fn aggregated_templates(&self) -> Vec<String> {
        self.annotations
            .get(AGGREGATION_ROLES_ANNOTATION)
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }
}

// --- GlobalRoleBinding ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalRoleBinding {
    pub name: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    pub role_ref: String,
    pub subjects: Vec<Subject>,
}

impl GlobalRoleBinding {
    /// Bind `username` to `global_role`. The binding is named
    /// `<username>-<global_role>` and labeled with a user back-reference.
    pub fn for_user(username: &str, global_role: &str) -> Self {
        let mut labels = HashMap::new();
        labels.insert(USER_REF_LABEL.to_string(), username.to_string());
        Self {
            name: format!("{}-{}", username, global_role),
            labels,
            role_ref: global_role.to_string(),
            subjects: vec![Subject::user(username)],
        }
    }
}
