use std::fmt::{Display, Formatter};

const FIELD_SEPARATOR: char = ',';

/// Permission to invoke methods of a named component.
///
/// Actions follow
/// `[MethodName] [',' [MethodInterface] [',' MethodParamsCommaList]]`.
/// Each of the three parts is optional and an absent part matches anything.
/// A present but empty parameter list is distinct from an absent one: it
/// names methods that take no arguments.
///
/// ```
/// use portcullis_permission::MethodPermission;
///
/// let any_lookup = MethodPermission::new("Catalog", Some("lookup"));
/// let remote_lookup = MethodPermission::new("Catalog", Some("lookup,Remote,java.lang.String"));
///
/// assert!(any_lookup.implies(&remote_lookup));
/// assert!(!remote_lookup.implies(&any_lookup));
/// ```
#[derive(Debug, Clone)]
pub struct MethodPermission {
    name: String,
    method_name: Option<String>,
    method_interface: Option<String>,
    method_params: Option<String>,
}

impl MethodPermission {
    /// Parse a permission from a component name and method spec. Every
    /// string fits the grammar, so this cannot fail.
    pub fn new(name: impl Into<String>, actions: Option<&str>) -> Self {
        let mut parts = actions.unwrap_or_default().splitn(3, FIELD_SEPARATOR);
        let method_name = parts.next().and_then(non_empty);
        let method_interface = parts.next().and_then(non_empty);
        let method_params = parts.next().map(str::to_string);

        Self {
            name: name.into(),
            method_name,
            method_interface,
            method_params,
        }
    }

    /// Build a permission from its parts. An empty method name or interface
    /// is the same as an absent one. `params` of `None` matches any
    /// signature; `Some(&[])` matches only methods without parameters.
    pub fn from_parts<S: AsRef<str>>(
        name: impl Into<String>,
        method_name: Option<&str>,
        method_interface: Option<&str>,
        params: Option<&[S]>,
    ) -> Self {
        Self {
            name: name.into(),
            method_name: method_name.and_then(non_empty),
            method_interface: method_interface.and_then(non_empty),
            method_params: params.map(|params| {
                params
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<&str>>()
                    .join(",")
            }),
        }
    }

    /// The component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The method name, if constrained.
    pub fn method_name(&self) -> Option<&str> {
        self.method_name.as_deref()
    }

    /// The method interface (`Home`, `Remote`, `Local`, ...), if constrained.
    pub fn method_interface(&self) -> Option<&str> {
        self.method_interface.as_deref()
    }

    /// The comma-joined parameter type list, if constrained.
    pub fn method_params(&self) -> Option<&str> {
        self.method_params.as_deref()
    }

    /// The canonical method spec, `None` when nothing is constrained.
    pub fn actions(&self) -> Option<String> {
        let mut actions = self.method_name.clone().unwrap_or_default();
        if let Some(interface) = &self.method_interface {
            actions.push(FIELD_SEPARATOR);
            actions.push_str(interface);
        } else if self.method_params.is_some() {
            actions.push(FIELD_SEPARATOR);
        }
        if let Some(params) = &self.method_params {
            actions.push(FIELD_SEPARATOR);
            actions.push_str(params);
        }
        (!actions.is_empty()).then_some(actions)
    }

    /// Whether `self` grants every invocation `other` grants: same component,
    /// and every part `self` constrains is constrained identically by
    /// `other`.
    pub fn implies(&self, other: &MethodPermission) -> bool {
        fn covers(mine: &Option<String>, theirs: &Option<String>) -> bool {
            mine.is_none() || mine == theirs
        }

        self.name == other.name
            && covers(&self.method_name, &other.method_name)
            && covers(&self.method_interface, &other.method_interface)
            && covers(&self.method_params, &other.method_params)
    }
}

fn non_empty(part: &str) -> Option<String> {
    (!part.is_empty()).then(|| part.to_string())
}

impl PartialEq for MethodPermission {
    fn eq(&self, other: &Self) -> bool {
        self.implies(other) && other.implies(self)
    }
}

impl Display for MethodPermission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}:{}({})]",
            self.name,
            self.method_interface.as_deref().unwrap_or("*"),
            self.method_name.as_deref().unwrap_or("*"),
            self.method_params.as_deref().unwrap_or_default()
        )
    }
}
