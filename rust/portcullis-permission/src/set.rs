use serde::{Deserialize, Serialize};

use crate::Permission;

/// An ordered collection of granted permissions.
///
/// The set implies a permission when any one of its members does. Members
/// are kept in insertion order and are not deduplicated, since equality
/// between permissions is mutual implication rather than identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    permissions: Vec<Permission>,
}

impl PermissionSet {
    /// An empty set, which implies nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a permission.
    pub fn push(&mut self, permission: impl Into<Permission>) {
        self.permissions.push(permission.into());
    }

    /// Builder form of [`PermissionSet::push`].
    pub fn with(mut self, permission: impl Into<Permission>) -> Self {
        self.push(permission);
        self
    }

    /// The members, in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Permission> {
        self.permissions.iter()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Whether any member implies `permission`.
    pub fn implies(&self, permission: &Permission) -> bool {
        self.implying(permission).next().is_some()
    }

    /// The members that imply `permission`.
    pub fn implying<'a>(&'a self, permission: &'a Permission) -> impl Iterator<Item = &'a Permission> {
        self.permissions
            .iter()
            .filter(move |granted| granted.implies(permission))
    }
}

impl<P: Into<Permission>> FromIterator<P> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            permissions: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<P: Into<Permission>> Extend<P> for PermissionSet {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.permissions.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for PermissionSet {
    type Item = Permission;
    type IntoIter = std::vec::IntoIter<Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.into_iter()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::slice::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.iter()
    }
}
