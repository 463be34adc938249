//! CLI binary for vultr-metadata crate.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vultr_metadata::{region_code_to_id, Client, MetaData, MetadataError, REGIONS};

#[derive(Parser)]
#[command(name = "vultr-metadata")]
#[command(author, version, about = "Read instance metadata from the Vultr metadata service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the instance metadata document
    Fetch {
        /// Metadata service base URL
        #[arg(short, long)]
        base_url: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Maximum size in bytes to accept (fails if exceeded)
        #[arg(short, long)]
        max_size: Option<usize>,
    },

    /// Look up the numeric ID of a region code, or list all known regions
    ///
    /// An unknown code prints an empty line and still exits successfully.
    Region {
        /// Region code, e.g. EWR
        code: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), MetadataError> {
    match cli.command {
        Commands::Fetch {
            base_url,
            format,
            max_size,
        } => {
            let mut client = Client::new()?;
            if let Some(base_url) = base_url {
                client.set_base_url(&base_url)?;
            }
            if let Some(size) = max_size {
                client = client.with_max_size(size);
            }

            let metadata = client.metadata().await?;
            let mut stdout = io::stdout().lock();
            match format {
                OutputFormat::Text => write_text(&mut stdout, &metadata)?,
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut stdout, &metadata)?;
                    writeln!(stdout)?;
                }
            }
            Ok(())
        }

        Commands::Region { code: Some(code) } => {
            let id = region_id_line(&code);
            if id.is_empty() {
                tracing::warn!(%code, "unknown region code");
            }
            println!("{}", id);
            Ok(())
        }

        Commands::Region { code: None } => {
            let mut stdout = io::stdout().lock();
            for region in REGIONS {
                writeln!(stdout, "{}\t{}\t{}", region.code, region.id, region.name)?;
            }
            Ok(())
        }
    }
}

/// Region ID to print for `code`; empty when the code is unknown.
fn region_id_line(code: &str) -> &'static str {
    region_code_to_id(code).unwrap_or_default()
}

fn write_text(out: &mut impl Write, metadata: &MetaData) -> io::Result<()> {
    writeln!(out, "hostname: {}", metadata.hostname)?;
    writeln!(out, "instance-id: {}", metadata.instance_id)?;
    writeln!(out, "public-keys: {}", metadata.public_keys)?;
    writeln!(
        out,
        "region: {} (id {})",
        metadata.region.region_code,
        metadata.region.id().unwrap_or("unknown")
    )?;
    for (family, peering) in [("ipv4", &metadata.bgp.ipv4), ("ipv6", &metadata.bgp.ipv6)] {
        writeln!(
            out,
            "bgp {}: {} AS{} <-> {} AS{}",
            family, peering.my_address, peering.my_asn, peering.peer_address, peering.peer_asn
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_id_line() {
        assert_eq!(region_id_line("EWR"), "1");
        assert_eq!(region_id_line("unknown-code"), "");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("raw".parse::<OutputFormat>().is_err());
    }
}
