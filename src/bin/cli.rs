//! ordtable CLI
//!
//! Command-line interface for driving an ordered symbol table.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{fmt, EnvFilter};

use ordtable::{Backend, Config, GrowthPolicy, Result, Session};

/// ordtable CLI
#[derive(Parser, Debug)]
#[command(name = "ordtable-cli")]
#[command(about = "Ordered symbol tables: sorted array and binary search tree")]
#[command(version)]
struct Args {
    /// Table implementation
    #[arg(short, long, value_enum, default_value = "bst")]
    backend: BackendArg,

    /// Initial capacity of the sorted array
    #[arg(short, long, default_value = "16")]
    capacity: usize,

    /// Double the sorted array when full instead of rejecting inserts
    #[arg(short, long)]
    grow: bool,

    /// Log every algorithm step (default filter `ordtable=trace`, `RUST_LOG` wins)
    #[arg(short, long)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BackendArg {
    Bst,
    Array,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a command script from a file, or stdin when omitted
    Run {
        /// Script file, one command per line
        file: Option<PathBuf>,
    },

    /// Insert random values, dump, delete one key, dump again
    Demo {
        /// Number of keys to insert
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// RNG seed for reproducible values
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_filter = match args.trace {
        true => "info,ordtable=trace",
        false => "info",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let backend = match args.backend {
        BackendArg::Bst => Backend::Bst,
        BackendArg::Array => Backend::SortedArray,
    };
    let growth = match args.grow {
        true => GrowthPolicy::Double,
        false => GrowthPolicy::Fixed,
    };
    let config = Config::builder()
        .backend(backend)
        .capacity(args.capacity)
        .growth(growth)
        .build();

    tracing::debug!("ordtable v{}", ordtable::VERSION);

    if let Err(e) = run(config, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: Config, command: Commands) -> Result<()> {
    let session = Session::open(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Run { file: Some(path) } => {
            let mut reader = BufReader::new(File::open(&path)?);
            session.run_script(&mut reader, &mut out)?;
        }
        Commands::Run { file: None } => {
            let stdin = io::stdin();
            session.run_script(&mut stdin.lock(), &mut out)?;
        }
        Commands::Demo { count, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            run_demo(&session, count, &mut rng, &mut out)?;
        }
    }

    Ok(())
}

/// Put `key_0..key_{count-1}` with random values, dump, delete `key_3`, dump
fn run_demo<R: Rng, W: Write>(
    session: &Session,
    count: usize,
    rng: &mut R,
    out: &mut W,
) -> Result<()> {
    for i in 0..count {
        let value = rng.gen_range(0..1000u32);
        session.put(format!("key_{}", i), value.to_string())?;
    }
    writeln!(out, "{}", session.dump())?;

    session.delete("key_3");
    writeln!(out, "{}", session.dump())?;
    Ok(())
}
