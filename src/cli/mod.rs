//! Command-line interface for artifacts.
//!
//! Provides commands for listing artifact kinds, encoding and decoding
//! value artifact payloads, validating artifact records, and showing the
//! resolved configuration.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use num_bigint::BigInt;

use crate::adapters::FsPayloadStore;
use crate::core::{registry, ValueArtifact};
use crate::domain::{Artifact, Value, ValueKind};

/// artifacts - Typed pipeline artifacts with scalar value encoding
#[derive(Parser, Debug)]
#[command(name = "artifacts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List artifact kinds and their property schemas
    Kinds,

    /// Encode a value into a payload
    Encode {
        /// Value kind (Bytes, String, Integer, Float)
        kind: String,

        /// Value as text
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Store the payload under this artifact uri (prints to stdout if not provided)
        #[arg(short, long)]
        uri: Option<String>,
    },

    /// Decode a payload into a value
    Decode {
        /// Value kind (Bytes, String, Integer, Float)
        kind: String,

        /// Read the payload stored under this artifact uri
        #[arg(short, long)]
        uri: Option<String>,

        /// Read the payload from a file (reads stdin if neither is given)
        #[arg(short, long, conflicts_with = "uri")]
        input: Option<PathBuf>,
    },

    /// Validate an artifact record (JSON) against its kind's schema
    Validate {
        /// Record file
        path: PathBuf,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Kinds => list_kinds(),
            Commands::Encode { kind, value, uri } => encode_value(&kind, &value, uri).await,
            Commands::Decode { kind, uri, input } => decode_value(&kind, uri, input).await,
            Commands::Validate { path } => validate_record(&path),
            Commands::Config => show_config(),
        }
    }
}

/// List all registered kinds
fn list_kinds() -> Result<()> {
    println!("{:<20} {:<10} {}", "KIND", "VALUE", "PROPERTIES");
    println!("{}", "-".repeat(60));

    for kind in registry().kinds() {
        let value = kind.value_kind().map(|v| v.expected()).unwrap_or("-");
        let properties = kind
            .schema()
            .iter()
            .map(|def| format!("{}: {}", def.name, def.property.property_type))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:<20} {:<10} {}", kind.name(), value, properties);
    }

    Ok(())
}

/// Parse command-line text into a value of the given kind
fn parse_literal(kind: ValueKind, text: &str) -> Result<Value> {
    let value = match kind {
        ValueKind::Bytes => Value::Bytes(text.as_bytes().to_vec()),
        ValueKind::String => Value::String(text.to_string()),
        ValueKind::Integer => Value::Integer(
            BigInt::from_str(text).with_context(|| format!("Not an integer: {}", text))?,
        ),
        ValueKind::Float => {
            Value::Float(f64::from_str(text).with_context(|| format!("Not a float: {}", text))?)
        }
    };
    Ok(value)
}

fn value_artifact(kind_name: &str) -> Result<ValueArtifact> {
    let kind = registry().resolve_value(kind_name)?;
    Ok(ValueArtifact::new(kind)?)
}

/// Encode a value and print or store its payload
async fn encode_value(kind_name: &str, text: &str, uri: Option<String>) -> Result<()> {
    let mut artifact = value_artifact(kind_name)?;
    let value_kind = *artifact.codec();
    artifact.set_value(parse_literal(value_kind, text)?)?;

    match uri {
        Some(uri) => {
            let store = FsPayloadStore::from_config()?;
            artifact.artifact_mut().uri = Some(uri.clone());
            artifact.commit(&store).await?;
            eprintln!("[Stored {} value at {}]", kind_name, store.value_path(&uri)?.display());
        }
        None => {
            let payload = artifact.payload().unwrap_or_default();
            let mut stdout = io::stdout().lock();
            stdout.write_all(payload).context("Failed to write payload")?;
            stdout.flush().context("Failed to write payload")?;
        }
    }

    Ok(())
}

/// Decode a payload read from the store, a file, or stdin
async fn decode_value(kind_name: &str, uri: Option<String>, input: Option<PathBuf>) -> Result<()> {
    let mut artifact = value_artifact(kind_name)?;

    if let Some(uri) = uri {
        let store = FsPayloadStore::from_config()?;
        artifact.artifact_mut().uri = Some(uri.clone());
        if !artifact.load(&store).await? {
            anyhow::bail!("No payload stored at {}", uri);
        }
    } else if let Some(path) = input {
        let payload = std::fs::read(&path)
            .with_context(|| format!("Failed to read payload file: {}", path.display()))?;
        artifact.set_payload(payload);
    } else {
        let mut payload = Vec::new();
        io::stdin()
            .read_to_end(&mut payload)
            .context("Failed to read from stdin")?;
        artifact.set_payload(payload);
    }

    let value = artifact.value()?.clone();
    println!("{}", value);
    if let Some(loss) = artifact.precision_diagnostic() {
        eprintln!("\n[Warning: {}]", loss);
    }

    Ok(())
}

/// Validate an artifact record file
fn validate_record(path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record: {}", path.display()))?;
    let artifact = registry().parse_artifact(&json)?;

    println!("Kind: {}", artifact.kind_id());
    if let Some(uri) = &artifact.uri {
        println!("Uri: {}", uri);
    }
    println!("Created: {}", artifact.created_at);
    println!("\nProperties:");
    for def in artifact.schema() {
        match artifact.get_property(def.name) {
            Ok(value) => println!("  {}: {}", def.name, value),
            Err(_) => println!("  {}: (not set)", def.name),
        }
    }

    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let cfg = crate::config::config()?;

    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:  {}", cfg.home.display());
    println!("  Store: {}", cfg.store.display());

    Ok(())
}
