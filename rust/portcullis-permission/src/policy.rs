use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Permission, PermissionSet};

/// A read-only access policy: permissions nobody may exercise, permissions
/// everybody may exercise, and permissions granted per role.
///
/// ```
/// use portcullis_permission::{Decision, Permission, Policy, WebResourcePermission};
///
/// let policy = Policy::default()
///     .with_unchecked(WebResourcePermission::new(Some("/public/*"), Some("GET")).unwrap())
///     .with_role("admin", WebResourcePermission::new(Some("/admin/*"), None).unwrap());
///
/// let request: Permission = WebResourcePermission::new(Some("/admin/users"), Some("DELETE")).unwrap().into();
/// assert_eq!(policy.decide(&request, &["admin"]), Decision::Role("admin".into()));
/// assert_eq!(policy.decide(&request, &["guest"]), Decision::NotGranted);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Permissions denied to every caller.
    #[serde(default)]
    pub excluded: PermissionSet,
    /// Permissions granted to every caller.
    #[serde(default)]
    pub unchecked: PermissionSet,
    /// Permissions granted to callers in a role, by role name.
    #[serde(default)]
    pub roles: BTreeMap<String, PermissionSet>,
}

/// The outcome of evaluating a permission against a [`Policy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "decision", content = "role")]
pub enum Decision {
    /// An excluded permission implies the request.
    Excluded,
    /// An unchecked permission implies the request.
    Unchecked,
    /// The named role, held by the caller, implies the request.
    Role(String),
    /// Nothing implies the request.
    NotGranted,
}

impl Decision {
    /// Whether the request may proceed.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Unchecked | Self::Role(_))
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excluded => f.write_str("excluded"),
            Self::Unchecked => f.write_str("unchecked"),
            Self::Role(role) => write!(f, "granted by role '{role}'"),
            Self::NotGranted => f.write_str("not granted"),
        }
    }
}

impl Policy {
    /// Add an excluded permission.
    pub fn with_excluded(mut self, permission: impl Into<Permission>) -> Self {
        self.excluded.push(permission);
        self
    }

    /// Add an unchecked permission.
    pub fn with_unchecked(mut self, permission: impl Into<Permission>) -> Self {
        self.unchecked.push(permission);
        self
    }

    /// Grant a permission to a role.
    pub fn with_role(mut self, role: impl Into<String>, permission: impl Into<Permission>) -> Self {
        self.roles.entry(role.into()).or_default().push(permission);
        self
    }

    /// Evaluate `permission` for a caller holding `roles`.
    ///
    /// Exclusion wins over everything, then unchecked grants, then the first
    /// role in lexical order that the caller holds and that implies the
    /// permission.
    pub fn decide<S: AsRef<str>>(&self, permission: &Permission, roles: &[S]) -> Decision {
        let decision = if self.excluded.implies(permission) {
            Decision::Excluded
        } else if self.unchecked.implies(permission) {
            Decision::Unchecked
        } else {
            self.roles
                .iter()
                .filter(|(role, _)| roles.iter().any(|held| held.as_ref() == role.as_str()))
                .find(|(_, granted)| granted.implies(permission))
                .map(|(role, _)| Decision::Role(role.clone()))
                .unwrap_or(Decision::NotGranted)
        };

        trace!(%permission, %decision, "Evaluated permission");
        decision
    }

    /// Shorthand for `decide(..).is_granted()`.
    pub fn is_granted<S: AsRef<str>>(&self, permission: &Permission, roles: &[S]) -> bool {
        self.decide(permission, roles).is_granted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{WebResourcePermission, WebUserDataPermission};
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    const NO_ROLES: &[&str] = &[];

    fn resource(name: &str, actions: Option<&str>) -> Permission {
        WebResourcePermission::new(Some(name), actions).unwrap().into()
    }

    fn policy() -> Policy {
        Policy::default()
            .with_excluded(WebResourcePermission::new(Some("/internal/*"), None).unwrap())
            .with_unchecked(WebResourcePermission::new(Some("/public/*"), Some("GET")).unwrap())
            .with_role("admin", WebResourcePermission::new(Some("/"), None).unwrap())
            .with_role("editor", WebResourcePermission::new(Some("/docs/*"), Some("GET,PUT")).unwrap())
            .with_role("auditor", WebResourcePermission::new(Some("/docs/*"), Some("GET")).unwrap())
    }

    #[test_log::test]
    fn it_lets_exclusion_win() {
        let policy = policy().with_unchecked(WebResourcePermission::new(Some("/internal/*"), None).unwrap());
        assert_eq!(policy.decide(&resource("/internal/health", Some("GET")), &["admin"]), Decision::Excluded);
    }

    #[test_log::test]
    fn it_grants_unchecked_permissions_without_roles() {
        assert_eq!(policy().decide(&resource("/public/index.html", Some("GET")), NO_ROLES), Decision::Unchecked);
        assert_eq!(policy().decide(&resource("/public/index.html", Some("POST")), NO_ROLES), Decision::NotGranted);
    }

    #[test_log::test]
    fn it_picks_the_first_granting_role_the_caller_holds() {
        let read = resource("/docs/guide", Some("GET"));
        assert_eq!(policy().decide(&read, &["editor", "auditor"]), Decision::Role("auditor".into()));
        assert_eq!(policy().decide(&read, &["editor"]), Decision::Role("editor".into()));

        let write = resource("/docs/guide", Some("PUT"));
        assert_eq!(policy().decide(&write, &["auditor"]), Decision::NotGranted);
        assert_eq!(policy().decide(&write, &["auditor", "admin"]), Decision::Role("admin".into()));
    }

    #[test]
    fn it_ignores_roles_the_policy_does_not_declare() {
        assert!(!policy().is_granted(&resource("/docs/guide", Some("GET")), &["reader"]));
    }

    #[test]
    fn it_does_not_cross_permission_kinds() -> TestResult {
        let transport: Permission = WebUserDataPermission::new(Some("/docs/guide"), Some("GET"))?.into();
        assert_eq!(policy().decide(&transport, &["admin"]), Decision::NotGranted);
        Ok(())
    }

    #[test]
    fn it_reports_whether_a_decision_grants() {
        assert!(Decision::Unchecked.is_granted());
        assert!(Decision::Role("admin".into()).is_granted());
        assert!(!Decision::Excluded.is_granted());
        assert!(!Decision::NotGranted.is_granted());
    }

    #[test]
    fn it_reads_a_declared_policy() -> TestResult {
        let policy: Policy = serde_json::from_str(
            r#"{
                "unchecked": [{ "type": "web-user-data", "name": "/", "actions": ":NONE" }],
                "roles": {
                    "manager": [{ "type": "ejb-method", "name": "Payroll", "actions": "approve" }]
                }
            }"#,
        )?;
        assert!(policy.excluded.is_empty());
        assert_eq!(policy.unchecked.len(), 1);

        let approve: Permission = crate::MethodPermission::new("Payroll", Some("approve,Local,long")).into();
        assert_eq!(policy.decide(&approve, &["manager"]), Decision::Role("manager".into()));
        assert_eq!(
            serde_json::to_value(Decision::Role("manager".into()))?,
            serde_json::json!({ "decision": "role", "role": "manager" })
        );
        Ok(())
    }
}
