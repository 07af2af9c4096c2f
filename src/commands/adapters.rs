//! The `adapters` command: list every resource kind the tool can tag.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::adapters;
use crate::output;

use super::OutputFormat;

#[derive(Args, Debug)]
pub struct AdaptersArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Serialize)]
struct AdapterListing {
    name: &'static str,
    service: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_type: Option<&'static str>,
}

pub struct AdaptersCommand;

impl AdaptersCommand {
    pub fn execute(args: AdaptersArgs) -> Result<()> {
        let mut listings: Vec<AdapterListing> = adapters::registry()
            .adapters()
            .map(|adapter| AdapterListing {
                name: adapter.name(),
                service: adapter.service(),
                resource_type: adapter.resource_type(),
            })
            .collect();
        listings.sort_by_key(|listing| listing.name);

        match args.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listings)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&listings)?),
            OutputFormat::Text => {
                output::section("Registered adapters");
                output::table_header(&[
                    &format!("{:26}", "Name"),
                    &format!("{:16}", "Service"),
                    "Resource type",
                ]);
                for listing in &listings {
                    let name = format!("{:26}", listing.name);
                    let service = format!("{:16}", listing.service);
                    output::table_row(&[
                        &name,
                        &service,
                        listing.resource_type.unwrap_or("-"),
                    ]);
                }
                output::blank();
                output::dimmed(&format!("{} adapters registered", listings.len()));
            }
        }

        Ok(())
    }
}
