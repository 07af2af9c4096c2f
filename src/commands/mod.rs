pub mod adapters;
pub mod scan;
pub mod tag;
pub mod whoami;

pub use adapters::AdaptersCommand;
pub use scan::ScanCommand;
pub use tag::TagCommand;
pub use whoami::WhoamiCommand;

use clap::ValueEnum;

use crate::aws::identity::current_identity;
use crate::aws::AwsSession;
use crate::model::AwsIdentity;
use crate::output;

/// How command results are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Resolve the caller's AWS identity or fail the command with guidance.
///
/// Commands that talk to the provider call this before doing anything else,
/// so credential problems surface immediately instead of halfway through a
/// multi-resource run.
pub(crate) fn require_identity(session: &AwsSession) -> anyhow::Result<AwsIdentity> {
    match current_identity(session) {
        Ok(identity) => Ok(identity),
        Err(err) => {
            output::error(&err.to_string());
            output::blank();
            output::dimmed("Check that:");
            output::list_item("credentials are configured for the selected profile");
            output::list_item("the session token has not expired");
            output::list_item("the aws CLI is installed and on PATH");
            output::blank();
            output::command_suggestion("Configure credentials with", "aws configure");
            output::command_suggestion("Or sign in with", "aws sso login");
            anyhow::bail!("AWS identity could not be resolved")
        }
    }
}
