//! CLI utility for converting NAV2 navigation meshes

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use nav2_file::{FormatVersion, NavFile};
use nav2_graph::{NavJson, NavigationGraph};

/// A CLI utility for inspecting NAV2 navigation files and converting them
/// to and from the editable JSON form
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the version and record counts of a NAV2 file
    Info {
        /// Input NAV2 file
        #[clap(value_parser)]
        file: PathBuf,
    },

    /// Convert a NAV2 file to a JSON document
    ToJson {
        /// Input NAV2 file
        #[clap(long, value_parser)]
        input: PathBuf,

        /// Output JSON file
        #[clap(long, value_parser)]
        output: PathBuf,

        /// Force a specific format version instead of auto-detecting
        #[clap(long, value_parser = parse_version)]
        format_version: Option<FormatVersion>,
    },

    /// Convert a JSON document back to a NAV2 file
    FromJson {
        /// Input JSON file
        #[clap(long, value_parser)]
        input: PathBuf,

        /// Output NAV2 file
        #[clap(long, value_parser)]
        output: PathBuf,

        /// NAV2 format version to write
        #[clap(long, default_value = "17", value_parser = parse_version)]
        format_version: FormatVersion,
    },
}

/// Parse a NAV2 format version number
fn parse_version(s: &str) -> Result<FormatVersion, String> {
    let number = s.parse::<u32>().map_err(|e| e.to_string())?;
    FormatVersion::from_number(number)
        .ok_or_else(|| format!("unsupported NAV2 version {number}"))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Commands::Info { file } => info(&file),
        Commands::ToJson {
            input,
            output,
            format_version,
        } => to_json(&input, &output, format_version),
        Commands::FromJson {
            input,
            output,
            format_version,
        } => from_json(&input, &output, format_version),
    }
}

/// Print the header and record counts of a NAV2 file
fn info(path: &Path) -> Result<()> {
    let data =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let version = FormatVersion::identify(&data)
        .map_err(|e| anyhow!("Failed to identify {}: {}", path.display(), e))?;
    let file = NavFile::decode(&data, version)
        .map_err(|e| anyhow!("Failed to decode {}: {}", path.display(), e))?;

    println!("{}", path.display());
    println!("  version:    {}", file.version);
    println!("  nodes:      {}", file.nodes.len());
    println!("  links:      {}", file.links.len());
    println!("  traversals: {}", file.traversals.len());
    println!("  edicts:     {}", file.edicts.len());

    Ok(())
}

/// Convert a NAV2 file to a JSON document
fn to_json(input: &Path, output: &Path, format_version: Option<FormatVersion>) -> Result<()> {
    let data =
        fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let graph = NavigationGraph::load_from_bytes(&data, format_version)
        .map_err(|e| anyhow!("Failed to load {}: {}", input.display(), e))?;

    let text = NavJson::from_graph(&graph)
        .to_json_string()
        .map_err(|e| anyhow!("Failed to serialize JSON: {}", e))?;
    fs::write(output, text)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Converted {} nodes to {}",
        graph.len(),
        output.display()
    );
    Ok(())
}

/// Convert a JSON document back to a NAV2 file
fn from_json(input: &Path, output: &Path, format_version: FormatVersion) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let graph = NavJson::from_json_string(&text)
        .and_then(|document| document.to_graph())
        .map_err(|e| anyhow!("Failed to load {}: {}", input.display(), e))?;

    let bytes = graph
        .save_to_bytes(format_version)
        .map_err(|e| anyhow!("Failed to encode version {}: {}", format_version, e))?;
    fs::write(output, bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} nodes as NAV2 version {} to {}",
        graph.len(),
        format_version,
        output.display()
    );
    Ok(())
}
