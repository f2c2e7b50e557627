//! Relkit CLI - Command-line tool for game audio metadata.
//!
//! This is the main entry point for the relkit command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use relkit::markers::TRACK_TEXT_IDS_TYPE;
use relkit::prelude::*;

/// Relkit - game audio metadata tool
#[derive(Parser)]
#[command(name = "relkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base directory for relative name table and text table paths
    #[arg(long, global = true, env = "RELKIT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the joaat hash of each string
    Hash {
        /// Strings to hash
        #[arg(required = true)]
        strings: Vec<String>,
    },

    /// Dump a GXT2 text table
    Gxt2 {
        /// Input GXT2 file
        #[arg(short, long)]
        input: PathBuf,

        /// Print a JSON object instead of HEX=value lines
        #[arg(long)]
        json: bool,
    },

    /// Collapse a rel XML document, or one of its items, to JSON
    Collapse {
        /// Input XML file
        #[arg(short, long)]
        input: PathBuf,

        /// Maximum depth below the collapsed node (0 = unlimited)
        #[arg(short, long, default_value_t = 0)]
        depth: usize,

        /// Only collapse the item with this type
        #[arg(long = "type", requires = "name")]
        type_name: Option<String>,

        /// Name of the item to collapse
        #[arg(long, requires = "type_name")]
        name: Option<String>,

        /// Retry a missed lookup with the hash of the name
        #[arg(long)]
        try_hash: bool,

        /// Name tables (.txt or .nametable) used to resolve item names
        #[arg(short = 'n', long = "nametable")]
        nametables: Vec<PathBuf>,
    },

    /// Resolve hash_XXXXXXXX identifiers to names
    Resolve {
        /// Name tables (.txt or .nametable)
        #[arg(short = 'n', long = "nametable")]
        nametables: Vec<PathBuf>,

        /// Text tables (.txt with HEX=value lines, or .gxt2)
        #[arg(short = 't', long = "text-table")]
        text_tables: Vec<PathBuf>,

        /// Identifiers to resolve
        #[arg(required = true)]
        strings: Vec<String>,
    },

    /// Decode the track and beat markers of a radio track
    Markers {
        /// Input XML file
        #[arg(short, long)]
        input: PathBuf,

        /// Radio track name, or its hash_XXXXXXXX form
        #[arg(long)]
        track: String,

        /// Track id text tables used for titles and artists
        #[arg(short = 't', long = "text-table")]
        text_tables: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Commands::Hash { strings } => {
            cmd_hash(&strings);
        }
        Commands::Gxt2 { input, json } => {
            cmd_gxt2(&input, json)?;
        }
        Commands::Collapse {
            input,
            depth,
            type_name,
            name,
            try_hash,
            nametables,
        } => {
            let names = load_names(data_dir, &nametables, &[])?;
            let item = type_name.zip(name);
            cmd_collapse(&input, depth, item, try_hash, &names)?;
        }
        Commands::Resolve {
            nametables,
            text_tables,
            strings,
        } => {
            let names = load_names(data_dir, &nametables, &text_tables)?;
            cmd_resolve(&names, &strings);
        }
        Commands::Markers {
            input,
            track,
            text_tables,
        } => {
            let track_ids = load_names(data_dir, &[], &text_tables)?;
            cmd_markers(&input, &track, &track_ids)?;
        }
    }

    Ok(())
}

/// Join a relative path onto the data directory, if one is set.
fn data_path(data_dir: Option<&Path>, path: &Path) -> PathBuf {
    match data_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

fn load_names(data_dir: Option<&Path>, nametables: &[PathBuf], text_tables: &[PathBuf]) -> Result<NameTable> {
    let start = Instant::now();
    let mut names = NameTable::new();

    for path in nametables {
        let path = data_path(data_dir, path);
        names
            .load_nametable_file(&path)
            .with_context(|| format!("Failed to load name table {}", path.display()))?;
    }
    for path in text_tables {
        let path = data_path(data_dir, path);
        names
            .load_text_table_file(&path)
            .with_context(|| format!("Failed to load text table {}", path.display()))?;
    }

    if !nametables.is_empty() || !text_tables.is_empty() {
        info!(
            names = names.len(),
            conflicts = names.conflicts().len(),
            "Loaded names in {:?}",
            start.elapsed()
        );
    }

    Ok(names)
}

fn read_xml(input: &Path) -> Result<XmlElement> {
    let start = Instant::now();
    let data = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let root = XmlElement::parse_bytes(&data).context("Failed to parse XML")?;
    info!("Parsed {} in {:?}", input.display(), start.elapsed());
    Ok(root)
}

fn cmd_hash(strings: &[String]) {
    for s in strings {
        println!("{}\t{}", s, JoaatHash::of(s));
    }
}

fn cmd_gxt2(input: &Path, json: bool) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;

    if !Gxt2Table::is_gxt2(&data) {
        anyhow::bail!("Input file is not a GXT2 table");
    }

    let table = Gxt2Table::parse(&data).context("Failed to parse GXT2")?;
    info!(entries = table.len(), magic = ?table.magic(), "Decoded {}", input.display());

    if json {
        let map: serde_json::Map<String, serde_json::Value> = table
            .entries()
            .iter()
            .map(|entry| (format_hash(entry.hash), entry.text.clone().into()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for entry in table.entries() {
            println!("{:08X}={}", entry.hash, entry.text);
        }
    }

    Ok(())
}

fn cmd_collapse(
    input: &Path,
    depth: usize,
    item: Option<(String, String)>,
    try_hash: bool,
    names: &NameTable,
) -> Result<()> {
    let root = read_xml(input)?;

    let value = match item {
        Some((type_name, name)) => {
            let index = TypeIndex::new(&root, &[type_name.as_str()], Some(names))?;
            info!(items = index.len(), "Indexed {}", type_name);

            let node = index
                .get(&type_name, &name, try_hash)
                .with_context(|| format!("No {type_name} item named {name}"))?;
            collapse(node, depth)
        }
        None => collapse(&root, depth),
    };

    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}

fn cmd_resolve(names: &NameTable, strings: &[String]) {
    for s in strings {
        println!("{}\t{}", s, names.resolve_string(s));
    }
}

fn cmd_markers(input: &Path, track: &str, track_ids: &NameTable) -> Result<()> {
    let root = read_xml(input)?;
    let index = TypeIndex::new(&root, &[TRACK_TEXT_IDS_TYPE], None)?;

    let markers = track_markers(&index, track, track_ids).context("Failed to decode markers")?;
    if markers.is_empty() {
        anyhow::bail!("No marker records for track {track}");
    }

    println!("{}", serde_json::to_string_pretty(&markers)?);

    Ok(())
}
