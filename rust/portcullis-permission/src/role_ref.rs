use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Which kind of component a role reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleRefScope {
    /// A web resource (servlet) role reference.
    Web,
    /// An enterprise component role reference.
    Ejb,
}

/// Permission for a component to test membership in a role through a
/// locally declared role reference.
///
/// Role references have no structure to compare: one implies another only
/// when scope, name and role are all identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleRefPermission {
    scope: RoleRefScope,
    name: String,
    role: String,
}

impl RoleRefPermission {
    /// A role reference made from within a web resource.
    pub fn web(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self::new(RoleRefScope::Web, name, role)
    }

    /// A role reference made from within an enterprise component.
    pub fn ejb(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self::new(RoleRefScope::Ejb, name, role)
    }

    /// A role reference in the given scope.
    pub fn new(scope: RoleRefScope, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            scope,
            name: name.into(),
            role: role.into(),
        }
    }

    /// Web or component scope.
    pub fn scope(&self) -> RoleRefScope {
        self.scope
    }

    /// The servlet or component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The referenced role, which is also the permission's actions.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Same scope, name and role.
    pub fn implies(&self, other: &RoleRefPermission) -> bool {
        self == other
    }
}

impl Display for RoleRefPermission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},role-ref={}]", self.name, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_implies_only_identical_references() {
        let admin = RoleRefPermission::web("ReportServlet", "admin");
        assert!(admin.implies(&RoleRefPermission::web("ReportServlet", "admin")));
        assert!(!admin.implies(&RoleRefPermission::web("ReportServlet", "user")));
        assert!(!admin.implies(&RoleRefPermission::web("OtherServlet", "admin")));
        assert!(!admin.implies(&RoleRefPermission::ejb("ReportServlet", "admin")));
    }

    #[test]
    fn it_displays_the_reference() {
        assert_eq!(RoleRefPermission::ejb("Payroll", "manager").to_string(), "[Payroll,role-ref=manager]");
    }
}
