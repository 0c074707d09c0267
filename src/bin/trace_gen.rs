use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use minset::{codec, CorpusStore, CoverageSet, TraceDb};

#[derive(Parser)]
#[command(about = "Generate a synthetic coverage trace database")]
struct Args {
    /// Output DB file
    #[clap(long, default_value = "ccov-traces.db")]
    out: PathBuf,

    /// Number of traces to generate
    #[clap(long, default_value_t = 10_000)]
    traces: usize,

    /// Block id universe size
    #[clap(long, default_value_t = 65_536)]
    universe: u32,

    /// Upper bound on blocks covered per trace
    #[clap(long, default_value_t = 1024)]
    max_blocks: usize,

    /// RNG seed
    #[clap(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), minset::MinsetError> {
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut db = TraceDb::new();

    for i in 0..args.traces {
        let blocks = rng.gen_range(1..=args.max_blocks);
        let mut set = CoverageSet::new();
        for _ in 0..blocks {
            set.insert(rng.gen_range(0..args.universe));
        }
        let raw = codec::pack(&set);
        // Corpus convention: name each trace by its content hash.
        let id = hex::encode(&Sha256::digest(&raw)[..16]);
        db.insert(id, set.len() as u64, raw);

        if (i + 1) % 1000 == 0 {
            eprintln!("Progress: {}", i + 1);
        }
    }

    db.save(&args.out)?;
    eprintln!("Wrote {} traces to {}", db.total_count(), args.out.display());
    Ok(())
}
