use pkg_types::rbac::PolicyRule;

/// Whether any single rule in `rules` grants everything `required` asks for.
///
/// A rule covers a required rule when, field by field, every required entry
/// is listed literally or matched by a `*` wildcard. Coverage never combines
/// permissions across rules.
pub fn rules_cover(rules: &[PolicyRule], required: &PolicyRule) -> bool {
    rules.iter().any(|rule| rule_covers(rule, required))
}

fn rule_covers(rule: &PolicyRule, required: &PolicyRule) -> bool {
    covers_all(&rule.verbs, &required.verbs)
        && covers_all(&rule.api_groups, &required.api_groups)
        && covers_all(&rule.resources, &required.resources)
}

fn covers_all(granted: &[String], needed: &[String]) -> bool {
    needed
        .iter()
        .all(|need| granted.iter().any(|have| have == "*" || have == need))
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
    fn exact_superset_covers() {
        let granted = rule(&["get", "list", "watch"], &["*"], &["users"]);
        let required = rule(&["get", "list"], &["*"], &["users"]);
        assert!(rules_cover(&[granted], &required));
    }

    #[test]
    fn wildcard_covers_any_value() {
        let granted = rule(&["*"], &["*"], &["*"]);
        let required = rule(&["get", "list", "create"], &["apps.k3rs.dev"], &["apps"]);
        assert!(rules_cover(&[granted], &required));
    }

    #[test]
    fn missing_verb_does_not_cover() {
        let granted = rule(&["get"], &["*"], &["users"]);
        let required = rule(&["get", "list"], &["*"], &["users"]);
        assert!(!rules_cover(&[granted], &required));
    }

    #[test]
    fn wrong_resource_does_not_cover() {
        let granted = rule(&["get", "list"], &["*"], &["workspaces"]);
        let required = rule(&["get", "list"], &["*"], &["users"]);
        assert!(!rules_cover(&[granted], &required));
    }

    #[test]
    fn narrower_api_group_does_not_cover_wildcard_requirement() {
        let granted = rule(&["get", "list"], &["iam.k3rs.dev"], &["users"]);
        let required = rule(&["get", "list"], &["*"], &["users"]);
        assert!(!rules_cover(&[granted], &required));
    }

    #[test]
    fn coverage_is_per_rule_not_a_union() {
        // Verbs come from one rule, resources from another; neither alone
        // grants the required combination.
        let granted = vec![
            rule(&["get", "list"], &["*"], &["workspaces"]),
            rule(&["create"], &["*"], &["users"]),
        ];
        let required = rule(&["get", "list"], &["*"], &["users"]);
        assert!(!rules_cover(&granted, &required));
    }

    #[test]
    fn any_rule_in_the_set_may_cover() {
        let granted = vec![
            rule(&["create"], &["batch"], &["jobs"]),
            rule(&["get", "list", "delete"], &["*"], &["users"]),
        ];
        let required = rule(&["get", "list"], &["*"], &["users"]);
        assert!(rules_cover(&granted, &required));
    }

    #[test]
    fn adding_grants_never_removes_coverage() {
        let required = rule(&["get", "list"], &["*"], &["users"]);
        let mut granted = rule(&["get", "list"], &["*"], &["users"]);
        assert!(rules_cover(std::slice::from_ref(&granted), &required));

        granted.verbs.push("delete".to_string());
        granted.resources.push("workspaces".to_string());
        granted.api_groups.push("apps.k3rs.dev".to_string());
        assert!(rules_cover(&[granted], &required));
    }
}
