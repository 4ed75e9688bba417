//! # Seatplan CLI
//!
//! Command-line front end for the seat layout editor.
//!
//! ## Usage
//!
//! ```bash
//! # List area and amenity templates
//! seatplan templates
//!
//! # Write the smart layout to a file
//! seatplan generate --name "East Wing" --out east.json
//!
//! # List the seats of a layout file
//! seatplan show east.json --kind seat
//!
//! # Count elements per kind and zone
//! seatplan stats east.json
//!
//! # Run an editing script against a layout, saving into ./layouts
//! seatplan edit --layout east.json --script moves.txt --store layouts --out east.json
//!
//! # Type session commands interactively
//! seatplan edit
//! ```
//!
//! Set `RUST_LOG=seatplan=debug` to trace every commit and history move.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use seatplan::{
    EditorConfig, LayoutDocument, LayoutEditor, SeatplanError,
    config::{DEFAULT_GRID_SIZE, DEFAULT_HISTORY_CAPACITY},
    layout::{self, KindFilter, LayoutStats, templates},
    session::{self, Session},
    shortcuts::ShortcutRegistry,
    storage::{FileStore, LayoutStore, MemoryStore},
};

/// Seatplan - Seat layout designer
#[derive(Parser, Debug)]
#[command(name = "seatplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List area and amenity template keys
    Templates,

    /// Write the smart layout to a file
    Generate {
        /// Layout name stored in the file
        #[arg(long, default_value = "Smart Layout")]
        name: String,

        /// Output file (defaults to <name>_layout.json)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// List the elements of a layout file
    Show {
        /// Layout file to read
        file: PathBuf,

        /// Only show one kind (seat, area, amenity)
        #[arg(long, default_value = "all")]
        kind: KindFilter,

        /// Only show elements whose label contains this text
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Count the elements of a layout file
    Stats {
        /// Layout file to read
        file: PathBuf,
    },

    /// Run session commands against an editor
    Edit {
        /// Layout file to start from
        #[arg(long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Script to run (reads stdin if omitted)
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,

        /// Directory holding the save/load slot (in-memory if omitted)
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,

        /// Export the final layout to this file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Grid size in canvas units
        #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
        grid: i32,

        /// Undo snapshots to keep
        #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
        history: usize,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seatplan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SeatplanError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Templates => {
            println!("Area templates:");
            for t in templates::AREA_TEMPLATES {
                println!("  {:<16} {} ({}x{})", t.key, t.name, t.size.width, t.size.height);
            }
            println!("\nAmenity templates:");
            for t in templates::AMENITY_TEMPLATES {
                println!("  {:<16} {}", t.key, t.name);
            }
            Ok(())
        }

        Commands::Generate { name, out } => {
            let mut editor = LayoutEditor::new(EditorConfig::default())?;
            editor.set_name(&name);
            editor.generate_smart_layout();
            let exported = editor.export_layout()?;
            let path = out.unwrap_or_else(|| PathBuf::from(&exported.file_name));
            fs::write(&path, exported.contents)?;
            println!(
                "Wrote {} ({} seats)",
                path.display(),
                editor.stats().total_seats
            );
            Ok(())
        }

        Commands::Show { file, kind, search } => {
            let doc = read_layout(&file)?;
            if let Some(name) = &doc.name {
                println!("{}", name);
            }
            let visible = layout::visible_elements(&doc.elements, kind, &search);
            for element in &visible {
                println!("{}", session::describe(element));
            }
            println!("{} of {} elements", visible.len(), doc.elements.len());
            Ok(())
        }

        Commands::Stats { file } => {
            let doc = read_layout(&file)?;
            let stats = LayoutStats::of(&doc.elements);
            println!("Seats:     {}", stats.total_seats);
            println!("Areas:     {}", stats.areas);
            println!("Amenities: {}", stats.amenities);
            for (zone, count) in &stats.seats_by_zone {
                println!("  {:<12} {}", zone, count);
            }
            Ok(())
        }

        Commands::Edit {
            layout,
            script,
            store,
            out,
            grid,
            history,
        } => {
            let config = EditorConfig {
                grid_size: grid,
                history_capacity: history,
                ..EditorConfig::default()
            };
            let mut editor = LayoutEditor::new(config)?;
            if let Some(path) = &layout {
                editor.import_layout(&fs::read_to_string(path)?)?;
                editor.take_notifications();
            }

            let store: Box<dyn LayoutStore> = match store {
                Some(dir) => Box::new(FileStore::open(dir)?),
                None => Box::new(MemoryStore::new()),
            };

            let input: Box<dyn BufRead> = match &script {
                Some(path) => Box::new(BufReader::new(fs::File::open(path)?)),
                None => Box::new(io::stdin().lock()),
            };

            let registry = ShortcutRegistry::new();
            let mut session = Session::new(editor, &registry, store, io::stdout());
            let executed = session.run_script(input)?;
            let (mut editor, _) = session.finish();
            tracing::info!(commands = executed, "session finished");

            if let Some(path) = out {
                let exported = editor.export_layout()?;
                fs::write(&path, exported.contents)?;
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
    }
}

fn read_layout(path: &Path) -> Result<LayoutDocument, SeatplanError> {
    LayoutDocument::from_json(&fs::read_to_string(path)?)
}
