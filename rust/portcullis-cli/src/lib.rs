#![warn(missing_docs)]

//! Command line front end for `portcullis-permission`.
//!
//! ```bash
//! portcullis implies --kind web-resource --grant '/app/*' --grant-actions GET \
//!     --candidate /app/index.html --candidate-actions GET
//! portcullis canonical --kind web-user-data --actions 'POST,GET:NONE'
//! portcullis check --policy policy.json --method GET --path /shop/cart \
//!     --context-path /shop --role customer
//! ```

mod cli;
pub use cli::*;

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use portcullis_permission::{
    Decision, HttpRequest, Permission, PermissionError, PermissionKind, Policy,
    WebResourcePermission, WebUserDataPermission,
};
use tracing::{debug, info};

/// Printed by `canonical` when the actions are unconstrained.
pub const ALL_ACTIONS: &str = "<all>";

/// One permission derived from a request and the policy's decision on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// The permission the request needs.
    pub permission: Permission,
    /// What the policy decided for it.
    pub decision: Decision,
}

/// Whether the `grant` permission implies the `candidate`, both of `kind`.
pub fn implies(
    kind: PermissionKind,
    grant: (Option<&str>, Option<&str>),
    candidate: (Option<&str>, Option<&str>),
) -> Result<bool, PermissionError> {
    let grant = Permission::parse(kind, grant.0, grant.1)?;
    let candidate = Permission::parse(kind, candidate.0, candidate.1)?;
    Ok(grant.implies(&candidate))
}

/// The canonical actions of a permission, `None` when unconstrained.
pub fn canonical(
    kind: PermissionKind,
    name: Option<&str>,
    actions: Option<&str>,
) -> Result<Option<String>, PermissionError> {
    Ok(Permission::parse(kind, name, actions)?.actions())
}

/// Derive the resource and user-data permissions a request needs and decide
/// each against `policy`.
pub fn check(
    policy: &Policy,
    request: &HttpRequest,
    roles: &[String],
) -> Result<Vec<Check>, PermissionError> {
    let needed: [Permission; 2] = [
        WebResourcePermission::from_request(request)?.into(),
        WebUserDataPermission::from_request(request)?.into(),
    ];

    Ok(needed
        .into_iter()
        .map(|permission| {
            let decision = policy.decide(&permission, roles);
            debug!(%permission, %decision, "Checked request");
            Check {
                permission,
                decision,
            }
        })
        .collect())
}

/// Read a JSON policy declaration.
pub fn load_policy(path: &Path) -> Result<Policy> {
    let declaration = fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy {}", path.display()))?;
    let policy: Policy = serde_json::from_str(&declaration)
        .with_context(|| format!("Invalid policy declaration in {}", path.display()))?;
    info!(
        path = %path.display(),
        excluded = policy.excluded.len(),
        unchecked = policy.unchecked.len(),
        roles = policy.roles.len(),
        "Loaded policy"
    );
    Ok(policy)
}

/// Execute a parsed command line, writing results to `out`.
pub fn run(cli: PortcullisCli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::Implies {
            kind,
            grant,
            grant_actions,
            candidate,
            candidate_actions,
        } => {
            let implied = implies(
                kind,
                (grant.as_deref(), grant_actions.as_deref()),
                (candidate.as_deref(), candidate_actions.as_deref()),
            )?;
            writeln!(out, "{implied}")?;
        }
        Command::Canonical {
            kind,
            name,
            actions,
        } => {
            let actions = canonical(kind, name.as_deref(), actions.as_deref())?;
            writeln!(out, "{}", actions.as_deref().unwrap_or(ALL_ACTIONS))?;
        }
        Command::Check {
            policy,
            method,
            path,
            context_path,
            secure,
            roles,
        } => {
            let policy = load_policy(&policy)?;
            let mut request = HttpRequest::new(method, path).with_context_path(context_path);
            request.secure = secure;

            for Check {
                permission,
                decision,
            } in check(&policy, &request, &roles)?
            {
                writeln!(out, "{permission}: {decision}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    const POLICY: &str = r#"{
        "excluded": [{ "type": "web-resource", "name": "/shop/internal/*" }],
        "unchecked": [{ "type": "web-user-data", "name": "/" }],
        "roles": {
            "customer": [{ "type": "web-resource", "name": "/cart/*", "actions": "GET,POST" }]
        }
    }"#;

    fn run_with(args: &[&str]) -> Result<String> {
        let cli = PortcullisCli::try_parse_from(std::iter::once("portcullis").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn it_prints_implication_results() -> TestResult {
        let args = [
            "implies", "--kind", "web-resource", "--grant", "/app/*", "--grant-actions", "GET",
            "--candidate", "/app/index.html", "--candidate-actions", "GET",
        ];
        assert_eq!(run_with(&args)?, "true\n");

        let args = [
            "implies", "--kind", "web-resource", "--grant", "/", "--grant-actions", "!GET",
            "--candidate", "/", "--candidate-actions", "!GET,POST",
        ];
        assert_eq!(run_with(&args)?, "false\n");
        Ok(())
    }

    #[test]
    fn it_prints_canonical_actions() -> TestResult {
        assert_eq!(
            run_with(&["canonical", "--kind", "web-user-data", "--actions", "POST,GET:NONE"])?,
            "GET,POST\n"
        );
        assert_eq!(run_with(&["canonical", "--kind", "web-resource"])?, "<all>\n");
        assert_eq!(
            run_with(&["canonical", "--kind", "ejb-method", "--name", "Catalog", "--actions", "lookup,,"])?,
            "lookup,,\n"
        );
        Ok(())
    }

    #[test]
    fn it_rejects_unknown_kinds_and_bad_actions() {
        assert!(PortcullisCli::try_parse_from(["portcullis", "canonical", "--kind", "jms"]).is_err());
        let error = run_with(&["canonical", "--kind", "web-resource", "--actions", "GET,"]).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<PermissionError>(),
            Some(PermissionError::Actions(_))
        ));
    }

    #[test]
    fn it_checks_requests_against_a_policy_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("policy.json");
        std::fs::write(&path, POLICY)?;
        let policy = path.to_string_lossy().to_string();

        let output = run_with(&[
            "check", "--policy", policy.as_str(), "--method", "POST", "--path", "/shop/cart/items",
            "--context-path", "/shop", "--role", "customer",
        ])?;
        assert_eq!(
            output,
            "WebResourcePermission(\"/cart/items\", \"POST\"): granted by role 'customer'\n\
             WebUserDataPermission(\"/cart/items\", \"POST\"): unchecked\n"
        );
        Ok(())
    }

    #[test]
    fn it_decides_each_derived_permission() -> TestResult {
        let policy: Policy = serde_json::from_str(POLICY)?;
        let request = HttpRequest::new("GET", "/shop/cart/items").with_context_path("/shop").secure();
        let checks = check(&policy, &request, &[])?;

        let decisions: Vec<&Decision> = checks.iter().map(|check| &check.decision).collect();
        assert_eq!(decisions, vec![&Decision::NotGranted, &Decision::Unchecked]);
        assert_eq!(checks[1].permission.actions(), Some("GET:CONFIDENTIAL".into()));
        Ok(())
    }

    #[test]
    fn it_reports_missing_policy_files() {
        let error = load_policy(Path::new("/nonexistent/policy.json")).unwrap_err();
        assert!(error.to_string().starts_with("Failed to read policy"));
    }
}
