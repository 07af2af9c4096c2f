//! The `whoami` command: show which AWS identity the tool would act as.

use anyhow::Result;
use clap::Args;

use crate::aws::AwsSession;
use crate::output;

use super::{require_identity, OutputFormat};

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// AWS profile to use
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// AWS region to use
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

pub struct WhoamiCommand;

impl WhoamiCommand {
    pub fn execute(args: WhoamiArgs) -> Result<()> {
        let session = AwsSession::new(args.profile.clone(), args.region.clone());
        let identity = require_identity(&session)?;

        match args.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&identity)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&identity)?),
            OutputFormat::Text => {
                output::section("AWS identity");
                output::key_value("Account", &identity.account);
                output::key_value_highlight("ARN", &identity.arn);
                output::key_value("User ID", &identity.user_id);
                if let Some(region) = &identity.region {
                    output::key_value("Region", region);
                }
                if let Some(profile) = &identity.profile {
                    output::key_value("Profile", profile);
                }
            }
        }

        Ok(())
    }
}
