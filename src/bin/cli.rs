//! docbox CLI
//!
//! Command-line front end for document containers.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use docbox::listing::{self, ListingRow};
use docbox::{Config, Container, CursorMove, DocboxError, ViewCommand, ViewCursor};
use tracing_subscriber::{fmt, EnvFilter};

/// docbox CLI
#[derive(Parser, Debug)]
#[command(name = "docbox")]
#[command(about = "Single-file document container")]
#[command(version)]
struct Args {
    /// Copy buffer size in bytes
    #[arg(long, global = true, default_value_t = docbox::config::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Skip fsync after metadata writes
    #[arg(long, global = true)]
    no_sync: bool,

    /// Do not take advisory locks on the container
    #[arg(long, global = true)]
    no_lock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty container (overwrites an existing file)
    Create {
        /// Container file
        container: PathBuf,
    },

    /// Add or replace documents
    Add {
        /// Container file (created if missing)
        container: PathBuf,

        /// Files to store
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Store under this name instead of the source path (single source only)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Remove documents from the directory
    Remove {
        /// Container file
        container: PathBuf,

        /// Document names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List documents in directory order
    List {
        /// Container file
        container: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Page through a document: n = next, p = previous, q = quit
    View {
        /// Container file
        container: PathBuf,

        /// Document name
        name: String,

        /// Bytes per page
        #[arg(short, long, default_value_t = docbox::config::DEFAULT_VIEW_BLOCK_SIZE)]
        block: usize,
    },

    /// Reorder the directory: name, date or size
    Order {
        /// Container file
        container: PathBuf,

        /// Sort key
        criterion: String,
    },

    /// Check container consistency and report dead space
    Verify {
        /// Container file
        container: PathBuf,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,docbox=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> docbox::Result<()> {
    let mut builder = Config::builder()
        .chunk_size(args.chunk_size)
        .sync_writes(!args.no_sync)
        .lock_files(!args.no_lock);
    if let Commands::View { block, .. } = &args.command {
        builder = builder.view_block_size(*block);
    }
    let config = builder.build()?;

    match args.command {
        Commands::Create { container } => {
            Container::create_with_config(&container, config)?;
            println!("created {}", container.display());
        }
        Commands::Add {
            container,
            sources,
            name,
        } => {
            if name.is_some() && sources.len() > 1 {
                return Err(DocboxError::Config("--name needs exactly one source".to_string()));
            }
            let mut handle = Container::open_with_config(&container, config)?;
            for source in &sources {
                let doc_name = match &name {
                    Some(n) => n.clone(),
                    None => source_name(source),
                };
                let entry = handle.add(source, &doc_name)?;
                println!("added '{}' ({} bytes at offset {})", entry.name, entry.size, entry.offset);
            }
            handle.close();
        }
        Commands::Remove { container, names } => {
            let mut handle = Container::open_with_config(&container, config)?;
            for name in &names {
                handle.remove(name)?;
                println!("removed '{}'", name);
            }
            handle.close();
        }
        Commands::List { container, json } => {
            let handle = Container::open_with_config(&container, config)?;
            let rows = listing::rows(handle.list());
            if json {
                print_json(&rows)?;
            } else {
                print!("{}", listing::render_table(&rows));
            }
        }
        Commands::View { container, name, .. } => {
            let handle = Container::open_with_config(&container, config)?;
            view(&handle, &name)?;
        }
        Commands::Order {
            container,
            criterion,
        } => {
            let mut handle = Container::open_with_config(&container, config)?;
            handle.order_by(&criterion)?;
            println!("ordered by {}", criterion);
        }
        Commands::Verify { container } => {
            let handle = Container::open_with_config(&container, config)?;
            let report = handle.verify()?;
            println!("file length:      {}", report.file_len);
            println!("documents:        {}", report.count);
            println!("directory offset: {}", report.directory_offset);
            println!("live bytes:       {}", report.live_bytes);
            println!("dead bytes:       {}", report.dead_bytes);
        }
    }

    Ok(())
}

/// Document name for a source given without --name: the path as typed
fn source_name(source: &Path) -> String {
    source.to_string_lossy().into_owned()
}

fn print_json(rows: &[ListingRow]) -> docbox::Result<()> {
    let json = serde_json::to_string_pretty(rows)
        .map_err(|e| DocboxError::Serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// Interactive pager driven by `ViewCursor`
fn view(handle: &Container, name: &str) -> docbox::Result<()> {
    let entry = handle
        .get(name)
        .ok_or_else(|| DocboxError::NotFound {
            name: name.to_string(),
        })?;
    let mut cursor = ViewCursor::new(entry.size, handle.config().view_block_size);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    loop {
        let page = handle.read_range(name, cursor.position(), cursor.block_size())?;
        writeln!(
            stdout,
            "\n--- {} ({} bytes) | from byte {} ---",
            name,
            cursor.size(),
            cursor.position()
        )?;
        stdout.write_all(&page)?;
        write!(stdout, "\n\n[n] next  [p] previous  [q] quit > ")?;
        stdout.flush()?;

        let mut line = String::new();
        let command = if input.read_line(&mut line)? == 0 {
            ViewCommand::Stop
        } else {
            match line.trim() {
                "n" => ViewCommand::Next,
                "p" => ViewCommand::Prev,
                "q" => ViewCommand::Stop,
                other => {
                    writeln!(stdout, "unknown command '{}'", other)?;
                    continue;
                }
            }
        };

        match cursor.apply(command) {
            CursorMove::Moved => {}
            CursorMove::AtLastBlock => writeln!(stdout, "already at the last page")?,
            CursorMove::AtFirstBlock => writeln!(stdout, "already at the first page")?,
            CursorMove::Stopped => return Ok(()),
        }
    }
}
