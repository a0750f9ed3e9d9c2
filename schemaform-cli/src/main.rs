use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use schemaform_core::{Document, Template, TransformerContext, TransformerRegistry};

#[derive(Parser)]
#[command(name = "schemaform")]
#[command(about = "Apply schema directives to generated infrastructure templates", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all directive transformers and write the updated template
    Transform {
        /// Parsed schema document (JSON)
        #[arg(long)]
        schema: PathBuf,

        /// CloudFormation template holding the generated resources
        #[arg(long)]
        template: PathBuf,

        /// Write the result here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Check directive usage without writing anything
    Validate {
        /// Parsed schema document (JSON)
        #[arg(long)]
        schema: PathBuf,

        /// CloudFormation template holding the generated resources
        #[arg(long)]
        template: PathBuf,
    },
    /// Print the SDL of every supported directive
    Directives,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Transform {
            schema,
            template,
            output,
        } => run_transform(&schema, &template, output.as_deref()),
        Commands::Validate { schema, template } => run_validate(&schema, &template),
        Commands::Directives => {
            println!("{}", TransformerRegistry::with_defaults().sdl());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Load inputs and run the default transformers over them
fn transform(schema: &Path, template: &Path) -> Result<Template> {
    let document = Document::load(schema)
        .with_context(|| format!("Failed to load schema {}", schema.display()))?;
    let template = Template::load(template)
        .with_context(|| format!("Failed to load template {}", template.display()))?;

    log::debug!(
        "Loaded {} types and {} resources",
        document.types.len(),
        template.resources.len()
    );

    let mut ctx = TransformerContext::new(template);
    TransformerRegistry::with_defaults().transform(&document, &mut ctx)?;
    Ok(ctx.into_template())
}

fn run_transform(schema: &Path, template: &Path, output: Option<&Path>) -> Result<()> {
    let result = transform(schema, template)?;

    match output {
        Some(path) => {
            result
                .save(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} {}", "Wrote".green().bold(), path.display());
        }
        None => println!("{}", result.to_json_pretty()?),
    }
    Ok(())
}

fn run_validate(schema: &Path, template: &Path) -> Result<()> {
    transform(schema, template)?;
    println!("{}", "Schema directives are valid.".green().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn write_json(dir: &Path, name: &str, value: serde_json::Value) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
        path
    }

    fn event_template(dir: &Path) -> PathBuf {
        write_json(
            dir,
            "stack.json",
            json!({
                "Resources": {
                    "EventTable": {
                        "Type": "AWS::DynamoDB::Table",
                        "Properties": {
                            "KeySchema": [{ "AttributeName": "id", "KeyType": "HASH" }]
                        }
                    }
                }
            }),
        )
    }

    #[test]
    fn transform_writes_ttl_specification() {
        let dir = tempdir().unwrap();
        let schema = write_json(
            dir.path(),
            "schema.json",
            json!({
                "types": [{
                    "name": "Event",
                    "fields": [
                        { "name": "id", "type": { "NonNull": { "Named": "ID" } } },
                        {
                            "name": "occursAt",
                            "type": { "Named": "AWSTimestamp" },
                            "directives": [{ "name": "ttl" }]
                        }
                    ]
                }]
            }),
        );
        let template = event_template(dir.path());
        let output = dir.path().join("out.json");

        run_transform(&schema, &template, Some(&output)).unwrap();

        let written = Template::load(&output).unwrap();
        let table = written.resources.get("EventTable").unwrap();
        assert_eq!(
            table.property("TimeToLiveSpecification"),
            Some(&json!({ "AttributeName": "occursAt", "Enabled": true }))
        );
        assert!(table.property("KeySchema").is_some());
    }

    #[test]
    fn transform_changes_nothing_but_the_ttl_specification() {
        let dir = tempdir().unwrap();
        let schema = write_json(
            dir.path(),
            "schema.json",
            json!({
                "types": [{
                    "name": "Event",
                    "fields": [{
                        "name": "occursAt",
                        "type": { "NonNull": { "Named": "AWSTimestamp" } },
                        "directives": [{ "name": "ttl" }]
                    }]
                }]
            }),
        );
        let input = json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Description": "Event API",
            "Parameters": { "Env": { "Type": "String" } },
            "Conditions": { "IsProd": { "Fn::Equals": [{ "Ref": "Env" }, "prod"] } },
            "Mappings": { "Billing": { "prod": { "Mode": "PROVISIONED" } } },
            "Resources": {
                "EventTable": {
                    "Type": "AWS::DynamoDB::Table",
                    "DeletionPolicy": "Retain",
                    "UpdateReplacePolicy": "Retain",
                    "Condition": "IsProd",
                    "Metadata": { "Owner": "events" },
                    "Properties": {
                        "KeySchema": [{ "AttributeName": "id", "KeyType": "HASH" }],
                        "BillingMode": "PAY_PER_REQUEST"
                    }
                },
                "EventRole": {
                    "Type": "AWS::IAM::Role",
                    "DependsOn": "EventTable",
                    "Properties": { "RoleName": "event-role" }
                },
                "EventWaitHandle": { "Type": "AWS::CloudFormation::WaitConditionHandle" }
            },
            "Outputs": { "EventTableName": { "Value": { "Ref": "EventTable" } } }
        });
        let template = write_json(dir.path(), "stack.json", input.clone());
        let output = dir.path().join("out.json");

        run_transform(&schema, &template, Some(&output)).unwrap();

        let mut written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let properties = written["Resources"]["EventTable"]["Properties"]
            .as_object_mut()
            .unwrap();
        assert_eq!(
            properties.remove("TimeToLiveSpecification"),
            Some(json!({ "AttributeName": "occursAt", "Enabled": true }))
        );
        assert_eq!(written, input);
    }

    #[test]
    fn validate_reports_invalid_placement() {
        let dir = tempdir().unwrap();
        let schema = write_json(
            dir.path(),
            "schema.json",
            json!({
                "types": [{
                    "name": "Event",
                    "fields": [{
                        "name": "occursAt",
                        "type": { "Named": "String" },
                        "directives": [{ "name": "ttl" }]
                    }]
                }]
            }),
        );
        let template = event_template(dir.path());

        let err = run_validate(&schema, &template).unwrap_err();
        assert!(err.to_string().contains("AWSTimestamp or Int"));
    }

    #[test]
    fn missing_schema_file_is_reported() {
        let dir = tempdir().unwrap();
        let template = event_template(dir.path());

        let err = transform(&dir.path().join("missing.json"), &template).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load schema"));
    }
}
