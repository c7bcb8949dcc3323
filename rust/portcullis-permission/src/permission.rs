use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    MethodPermission, PermissionError, RoleRefPermission, RoleRefScope, WebResourcePermission,
    WebUserDataPermission,
};

/// The type tag of a [`Permission`], as it appears in serialized policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionKind {
    /// [`WebResourcePermission`]
    WebResource,
    /// [`WebUserDataPermission`]
    WebUserData,
    /// [`MethodPermission`]
    EjbMethod,
    /// [`RoleRefPermission`] in web scope
    WebRoleRef,
    /// [`RoleRefPermission`] in component scope
    EjbRoleRef,
}

impl PermissionKind {
    /// Every kind, in tag order.
    pub const ALL: [PermissionKind; 5] = [
        Self::WebResource,
        Self::WebUserData,
        Self::EjbMethod,
        Self::WebRoleRef,
        Self::EjbRoleRef,
    ];

    /// The serialized tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebResource => "web-resource",
            Self::WebUserData => "web-user-data",
            Self::EjbMethod => "ejb-method",
            Self::WebRoleRef => "web-role-ref",
            Self::EjbRoleRef => "ejb-role-ref",
        }
    }
}

impl Display for PermissionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionKind {
    type Err = PermissionError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == kind)
            .ok_or_else(|| PermissionError::UnknownKind {
                kind: kind.to_string(),
            })
    }
}

/// Any of the permission descriptors.
///
/// Implication between two different variants is always `false`. Equality
/// is mutual implication, as it is for each variant.
///
/// ```
/// use portcullis_permission::{Permission, PermissionKind};
///
/// let grant = Permission::parse(PermissionKind::WebResource, Some("/app/*"), Some("GET")).unwrap();
/// let need = Permission::parse(PermissionKind::WebResource, Some("/app/index.html"), Some("GET")).unwrap();
/// let other = Permission::parse(PermissionKind::WebUserData, Some("/app/index.html"), Some("GET")).unwrap();
///
/// assert!(grant.implies(&need));
/// assert!(!grant.implies(&other));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PermissionRecord", into = "PermissionRecord")]
pub enum Permission {
    /// Access to URL patterns with HTTP methods.
    WebResource(WebResourcePermission),
    /// Transport guarantees for URL patterns.
    WebUserData(WebUserDataPermission),
    /// Invocation of component methods.
    Method(MethodPermission),
    /// Role references made from within a component.
    RoleRef(RoleRefPermission),
}

impl Permission {
    /// Construct a permission of the given kind from its name and actions
    /// strings, with the same defaults and validation as the variant's own
    /// constructor.
    pub fn parse(
        kind: PermissionKind,
        name: Option<&str>,
        actions: Option<&str>,
    ) -> Result<Self, PermissionError> {
        Ok(match kind {
            PermissionKind::WebResource => WebResourcePermission::new(name, actions)?.into(),
            PermissionKind::WebUserData => WebUserDataPermission::new(name, actions)?.into(),
            PermissionKind::EjbMethod => {
                let name = name.ok_or(PermissionError::MissingName { kind })?;
                MethodPermission::new(name, actions).into()
            }
            PermissionKind::WebRoleRef | PermissionKind::EjbRoleRef => {
                let name = name.ok_or(PermissionError::MissingName { kind })?;
                let role = actions.ok_or_else(|| PermissionError::MissingRole {
                    name: name.to_string(),
                })?;
                let scope = match kind {
                    PermissionKind::WebRoleRef => RoleRefScope::Web,
                    _ => RoleRefScope::Ejb,
                };
                RoleRefPermission::new(scope, name, role).into()
            }
        })
    }

    /// The type tag.
    pub fn kind(&self) -> PermissionKind {
        match self {
            Self::WebResource(_) => PermissionKind::WebResource,
            Self::WebUserData(_) => PermissionKind::WebUserData,
            Self::Method(_) => PermissionKind::EjbMethod,
            Self::RoleRef(permission) => match permission.scope() {
                RoleRefScope::Web => PermissionKind::WebRoleRef,
                RoleRefScope::Ejb => PermissionKind::EjbRoleRef,
            },
        }
    }

    /// The permission name.
    pub fn name(&self) -> &str {
        match self {
            Self::WebResource(permission) => permission.name(),
            Self::WebUserData(permission) => permission.name(),
            Self::Method(permission) => permission.name(),
            Self::RoleRef(permission) => permission.name(),
        }
    }

    /// The canonical actions string, `None` when unconstrained.
    pub fn actions(&self) -> Option<String> {
        match self {
            Self::WebResource(permission) => permission.actions(),
            Self::WebUserData(permission) => permission.actions(),
            Self::Method(permission) => permission.actions(),
            Self::RoleRef(permission) => Some(permission.role().to_string()),
        }
    }

    /// Whether `self` authorizes everything `other` does.
    pub fn implies(&self, other: &Permission) -> bool {
        match (self, other) {
            (Self::WebResource(mine), Self::WebResource(theirs)) => mine.implies(theirs),
            (Self::WebUserData(mine), Self::WebUserData(theirs)) => mine.implies(theirs),
            (Self::Method(mine), Self::Method(theirs)) => mine.implies(theirs),
            (Self::RoleRef(mine), Self::RoleRef(theirs)) => mine.implies(theirs),
            _ => false,
        }
    }
}

impl From<WebResourcePermission> for Permission {
    fn from(permission: WebResourcePermission) -> Self {
        Self::WebResource(permission)
    }
}

impl From<WebUserDataPermission> for Permission {
    fn from(permission: WebUserDataPermission) -> Self {
        Self::WebUserData(permission)
    }
}

impl From<MethodPermission> for Permission {
    fn from(permission: MethodPermission) -> Self {
        Self::Method(permission)
    }
}

impl From<RoleRefPermission> for Permission {
    fn from(permission: RoleRefPermission) -> Self {
        Self::RoleRef(permission)
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WebResource(permission) => Display::fmt(permission, f),
            Self::WebUserData(permission) => Display::fmt(permission, f),
            Self::Method(permission) => Display::fmt(permission, f),
            Self::RoleRef(permission) => Display::fmt(permission, f),
        }
    }
}

/// Serialized shape of a [`Permission`]. Only the name and the canonical
/// actions are stored; decoding re-parses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PermissionRecord {
    #[serde(rename = "type")]
    kind: PermissionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actions: Option<String>,
}

impl TryFrom<PermissionRecord> for Permission {
    type Error = PermissionError;

    fn try_from(record: PermissionRecord) -> Result<Self, Self::Error> {
        Permission::parse(record.kind, record.name.as_deref(), record.actions.as_deref())
    }
}

impl From<Permission> for PermissionRecord {
    fn from(permission: Permission) -> Self {
        PermissionRecord {
            kind: permission.kind(),
            name: Some(permission.name().to_string()),
            actions: permission.actions(),
        }
    }
}
