//! lcb-find: locally collinear block finder
//!
//! Usage: lcb-find --graph <FILE> [OPTIONS] <FASTA>...

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use lcb_find::config::RunConfig;
use lcb_find::error::{LcbError, Result};
use lcb_find::output::gff::GffWriter;
use lcb_find::output::legacy::LegacyWriter;
use lcb_find::{fasta, graph, worker_pool, JunctionStore};

#[derive(Parser)]
#[command(name = "lcb-find")]
#[command(version)]
#[command(about = "Finds locally collinear blocks across chromosomes from a pre-built junction graph", long_about = None)]
struct Cli {
    /// Binary junction graph file produced by the upstream graph builder
    #[arg(long)]
    graph: PathBuf,

    /// One or more FASTA files; the i-th record across all files becomes chromosome i
    #[arg(required = true)]
    fasta: Vec<PathBuf>,

    /// Junction k-mer length (must be odd)
    #[arg(short = 'k', default_value_t = 25)]
    k: usize,

    /// Minimum total block length
    #[arg(short = 'm', default_value_t = 50)]
    min_block_size: i64,

    /// Maximum allowed gap when extending within a bubble
    #[arg(short = 'b', default_value_t = 200)]
    max_branch_size: i64,

    /// Junctions occurring at least this many times are dropped
    #[arg(short = 'a', default_value_t = 150)]
    abundance_threshold: usize,

    /// Number of worker threads
    #[arg(short = 't', default_value_t = 1)]
    threads: usize,

    /// Output directory for blocks_coords.gff (and blocks_coords.txt with --legacy)
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,

    /// Also emit the legacy blocks_coords.txt index
    #[arg(long)]
    legacy: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.threads > 1 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
        {
            eprintln!("error: failed to initialize thread pool: {e}");
            process::exit(1);
        }
    }

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = RunConfig::new(
        cli.k,
        cli.min_block_size,
        cli.max_branch_size,
        cli.abundance_threshold,
        cli.threads,
        cli.legacy,
    )?;

    let fasta_records = fasta::load_all(&cli.fasta)?;
    if fasta_records.is_empty() {
        return Err(LcbError::BadArg("no FASTA records found in input files".to_string()));
    }

    let sequences: Vec<_> = fasta_records.iter().map(|r| r.sequence.clone()).collect();
    let descriptions: Vec<_> = fasta_records.into_iter().map(|r| r.description).collect();

    let triples = graph::load_filtered(&cli.graph, config.abundance_threshold)?;
    let store = JunctionStore::build(config.k, triples, &sequences, descriptions)?;

    let blocks = worker_pool::run(&store, &config);

    fs::create_dir_all(&cli.output_dir)?;

    let gff_path = cli.output_dir.join("blocks_coords.gff");
    let mut gff = GffWriter::new(fs::File::create(&gff_path)?, false);
    gff.write_header()?;
    for block in &blocks {
        gff.write_block(block, store.chr_description(block.chr))?;
    }
    gff.flush()?;

    if config.legacy {
        let legacy_path = cli.output_dir.join("blocks_coords.txt");
        let mut legacy = LegacyWriter::new(fs::File::create(&legacy_path)?, false);
        legacy.write_blocks(&blocks, |chr| store.chr_description(chr).to_string())?;
        legacy.flush()?;
    }

    Ok(())
}
