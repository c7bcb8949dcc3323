use std::path::PathBuf;

use clap::{Parser, Subcommand};
use portcullis_permission::PermissionKind;

/// Command line arguments of the `portcullis` binary.
#[derive(Debug, Parser)]
#[command(name = "portcullis")]
#[command(bin_name = "portcullis")]
#[command(version, about = "Evaluate web and component permissions", long_about = None)]
pub struct PortcullisCli {
    /// Log at debug level regardless of PORTCULLIS_LOG
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// The `portcullis` subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print whether the granted permission implies the candidate
    Implies {
        /// Permission type: web-resource, web-user-data, ejb-method, web-role-ref or ejb-role-ref
        #[arg(short, long)]
        kind: PermissionKind,

        /// Name of the granted permission
        #[arg(long)]
        grant: Option<String>,

        /// Actions of the granted permission
        #[arg(long)]
        grant_actions: Option<String>,

        /// Name of the candidate permission
        #[arg(long)]
        candidate: Option<String>,

        /// Actions of the candidate permission
        #[arg(long)]
        candidate_actions: Option<String>,
    },

    /// Print the canonical actions of a permission
    Canonical {
        /// Permission type: web-resource, web-user-data, ejb-method, web-role-ref or ejb-role-ref
        #[arg(short, long)]
        kind: PermissionKind,

        /// Permission name
        #[arg(short, long)]
        name: Option<String>,

        /// Permission actions
        #[arg(short, long)]
        actions: Option<String>,
    },

    /// Decide a request against a JSON policy declaration
    Check {
        /// Policy declaration file
        #[arg(short, long, env = "PORTCULLIS_POLICY")]
        policy: PathBuf,

        /// HTTP method of the request
        #[arg(short, long)]
        method: String,

        /// Full request path, including the context path
        #[arg(long)]
        path: String,

        /// Deployment prefix stripped from the path
        #[arg(long, env = "PORTCULLIS_CONTEXT_PATH", default_value = "")]
        context_path: String,

        /// The request arrived over a confidential transport
        #[arg(long)]
        secure: bool,

        /// A role held by the caller; may be repeated
        #[arg(short, long = "role")]
        roles: Vec<String>,
    },
}
