//! Wireform Command Line Tool
//!
//! Provides commands for working with response payloads:
//! - validate: Validate a payload file against a schema document
//! - render: Serialize a JSON payload file to a wire format
//! - headers: Print the transport headers a payload would carry

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use wireform_core::{assert_schema, serialize, PayloadFormat};

#[derive(Parser)]
#[command(name = "wireform")]
#[command(version)]
#[command(about = "Wireform Command Line Tool - Validate and render response payloads")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a payload file against a schema document
    #[command(about = "Validate a payload file against a JSON Schema or XSD")]
    Validate {
        /// Path to the payload file (JSON document, or raw XML for --format xml)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the schema document
        #[arg(long, short, value_name = "SCHEMA")]
        schema: PathBuf,

        /// Wire format of the payload ("json" or "xml")
        #[arg(long, short, default_value = "json")]
        format: String,
    },

    /// Serialize a JSON payload file to a wire format
    #[command(about = "Render a JSON payload file as a json or xml wire body")]
    Render {
        /// Path to the JSON payload file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target wire format ("json" or "xml")
        #[arg(long, short, default_value = "json")]
        format: String,
    },

    /// Print the transport headers a payload would carry
    #[command(about = "Print derived headers for the given metadata")]
    Headers {
        /// Content-Type header value
        #[arg(long)]
        content_type: Option<String>,

        /// Location header value
        #[arg(long)]
        location: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            file,
            schema,
            format,
        } => handle_validate(&file, &schema, &format),
        Commands::Render { file, format } => handle_render(&file, &format),
        Commands::Headers {
            content_type,
            location,
        } => handle_headers(content_type, location),
    }
}

fn handle_validate(file: &PathBuf, schema: &PathBuf, format: &str) -> Result<()> {
    let format = PayloadFormat::from_str(format)?;

    let schema_text = std::fs::read_to_string(schema)
        .with_context(|| format!("Failed to read schema: {}", schema.display()))?;
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;

    let content = match format {
        PayloadFormat::Json => serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {} as JSON", file.display()))?,
        PayloadFormat::Xml => Value::String(raw),
    };

    match assert_schema(format, Some(&schema_text), &content) {
        Ok(()) => {
            println!("Payload satisfies schema");
            Ok(())
        }
        Err(err) => {
            for violation in err.violations() {
                eprintln!("{violation}");
            }
            Err(err).context("Payload validation failed")
        }
    }
}

fn handle_render(file: &PathBuf, format: &str) -> Result<()> {
    let format = PayloadFormat::from_str(format)?;

    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let content: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {} as JSON", file.display()))?;

    let body = serialize(&content, format).with_context(|| "Failed to serialize payload")?;
    println!("{body}");

    Ok(())
}

fn handle_headers(content_type: Option<String>, location: Option<String>) -> Result<()> {
    // A throwaway payload is enough to derive headers; the router is never
    // invoked.
    struct NullRouter;
    impl wireform_core::Router for NullRouter {
        type Response = ();
        fn build_response(&self, _: String, _: u16, _: &[(String, String)]) {}
    }

    let mut payload =
        wireform_core::ResponsePayload::new(NullRouter, PayloadFormat::Json, 200);
    if let Some(content_type) = content_type {
        payload.set_content_type(content_type);
    }
    if let Some(location) = location {
        payload.set_location(location);
    }

    for (name, value) in payload.configured_headers() {
        println!("{name}: {value}");
    }

    Ok(())
}
