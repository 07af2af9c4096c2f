//! The `tag` command: render the template for each resource and reconcile
//! the result against the live tags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use crate::adapters;
use crate::aws::AwsSession;
use crate::diff::{render_applied, render_dry_run};
use crate::engine::tag_run::{tag_resources, TagRunOptions};
use crate::model::TagRunResult;
use crate::output;
use crate::template::{TagTemplate, TemplateContext};

use super::{require_identity, OutputFormat};

#[derive(Args, Debug)]
pub struct TagArgs {
    /// Resource ARN to tag (repeat for several resources)
    #[arg(long = "arn", value_name = "ARN", required = true)]
    pub arns: Vec<String>,

    /// Tag template file (YAML)
    #[arg(short, long)]
    pub template: PathBuf,

    /// Inline JSON object with extra template context values
    #[arg(long, value_name = "JSON")]
    pub overrides: Option<String>,

    /// AWS profile to use
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// AWS region to use
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Template values replace existing tags on conflicts
    #[arg(long)]
    pub force: bool,

    /// Environment name placed into the template context
    #[arg(long, value_name = "NAME", group = "environment")]
    pub env: Option<String>,

    /// Shortcut for --env dev
    #[arg(long, group = "environment")]
    pub dev: bool,

    /// Shortcut for --env hml
    #[arg(long, group = "environment")]
    pub hml: bool,

    /// Shortcut for --env prd
    #[arg(long, group = "environment")]
    pub prd: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

pub struct TagCommand;

impl TagCommand {
    pub fn execute(args: TagArgs) -> Result<()> {
        let session = AwsSession::new(args.profile.clone(), args.region.clone());
        let identity = require_identity(&session)?;

        if args.output == OutputFormat::Text {
            output::dimmed(&format!(
                "Authenticated as {} (account {})",
                identity.arn, identity.account
            ));
        }

        let template = TagTemplate::from_path(&args.template)?;
        let overrides = build_context(&args)?;

        let results = tag_resources(
            &session,
            adapters::registry(),
            &args.arns,
            &template,
            &overrides,
            TagRunOptions {
                dry_run: args.dry_run,
                override_existing: args.force,
            },
        )?;

        match args.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&results)?),
            OutputFormat::Text => render_text(&results, &args),
        }

        Ok(())
    }
}

fn render_text(results: &[TagRunResult], args: &TagArgs) {
    for result in results {
        if args.dry_run {
            println!("{}", render_dry_run(result, args.force));
        } else {
            println!("{}", render_applied(result));
        }
    }

    output::blank();
    if args.dry_run {
        output::info(&format!(
            "Dry run finished for {} resource(s); nothing was written",
            results.len()
        ));
    } else {
        output::success(&format!("Applied tags to {} resource(s)", results.len()));
    }
}

/// Assemble the template context from `--overrides` and the environment
/// flags. An explicit `environment` key in the overrides wins over the
/// flags.
fn build_context(args: &TagArgs) -> Result<TemplateContext> {
    let mut context = match &args.overrides {
        Some(raw) => {
            let parsed: Value =
                serde_json::from_str(raw).context("failed to parse --overrides as JSON")?;
            match parsed {
                Value::Object(map) => map,
                _ => anyhow::bail!("--overrides must be a JSON object"),
            }
        }
        None => TemplateContext::new(),
    };

    if let Some(environment) = resolved_environment(args) {
        context
            .entry("environment")
            .or_insert(Value::String(environment));
    }

    Ok(context)
}

fn resolved_environment(args: &TagArgs) -> Option<String> {
    if let Some(env) = &args.env {
        return Some(env.clone());
    }
    if args.dev {
        return Some("dev".to_string());
    }
    if args.hml {
        return Some("hml".to_string());
    }
    if args.prd {
        return Some("prd".to_string());
    }
    None
}
