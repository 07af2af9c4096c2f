//! The `scan` command: check every resource of one kind for the tags the
//! template requires.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::adapters;
use crate::aws::AwsSession;
use crate::engine::scan::scan_resources;
use crate::output;
use crate::template::TagTemplate;

use super::require_identity;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Service whose resources to scan (e.g. s3, lambda)
    pub service: String,

    /// Resource kind within the service, when it has more than one
    pub resource_type: Option<String>,

    /// Tag template file (YAML)
    #[arg(short, long)]
    pub template: PathBuf,

    /// Write the YAML report here instead of printing it
    #[arg(short, long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// AWS profile to use
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// AWS region to use
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,
}

pub struct ScanCommand;

impl ScanCommand {
    pub fn execute(args: ScanArgs) -> Result<()> {
        let session = AwsSession::new(args.profile.clone(), args.region.clone());
        require_identity(&session)?;

        let template = TagTemplate::from_path(&args.template)?;
        let report = scan_resources(
            &session,
            adapters::registry(),
            &args.service,
            args.resource_type.as_deref(),
            &template,
        )?;

        let yaml = report.to_yaml()?;
        match &args.output_file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).with_context(|| {
                            format!("failed to create directory {}", parent.display())
                        })?;
                    }
                }
                fs::write(path, &yaml)
                    .with_context(|| format!("failed to write {}", path.display()))?;

                output::success_with_details(
                    "Scan report written",
                    &path.display().to_string(),
                );
                if report.summary.non_compliant > 0 {
                    output::warning(&format!(
                        "{} of {} resources are missing required tags",
                        report.summary.non_compliant, report.summary.total_resources
                    ));
                }
            }
            // Raw YAML on stdout so the report stays pipeable
            None => print!("{yaml}"),
        }

        Ok(())
    }
}
