use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use minset::{
    greedy_reduce, iterative_reduce, minset_to_sample, sample_fraction, CorpusStore,
    MinsetError, ReductionReport, Sample, TraceDb,
};

#[derive(Parser)]
#[command(about = "Reduce a coverage trace corpus to a minimal covering subset")]
struct Args {
    /// Trace DB file to use
    #[clap(long, default_value = "ccov-traces.db")]
    db: PathBuf,

    /// Seed for sampling and candidate shuffle order
    #[clap(long)]
    seed: Option<u64>,

    /// Smallest sampling fraction; doubles until the full corpus
    #[clap(long, default_value_t = 1.0 / 128.0)]
    start_fraction: f64,

    /// Emit each report as a JSON line on stdout
    #[clap(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), MinsetError> {
    let args = Args::parse();
    if !(args.start_fraction > 0.0 && args.start_fraction <= 1.0) {
        return Err(MinsetError::InvalidArgument(format!(
            "start fraction must be in (0, 1], got {}",
            args.start_fraction
        )));
    }

    let db = TraceDb::load(&args.db)?;
    let total = db.total_count();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Materialize every sample up front; the reducers never touch the store.
    let mut samples = Vec::new();
    let mut fraction = args.start_fraction;
    while fraction < 1.0 {
        samples.push(sample_fraction(&db, fraction, &mut rng)?);
        fraction *= 2.0;
    }
    samples.push(sample_fraction(&db, 1.0, &mut rng)?);
    drop(db);

    eprintln!("Collected {} samples, starting work", samples.len());
    for sample in samples {
        eprintln!("Random sample of {} from {}", sample.len(), total);

        report(&args, run_greedy("greedy", sample.clone())?);

        let mark = Instant::now();
        let (minset, coverage) = iterative_reduce(sample.clone(), &mut rng)?;
        report(
            &args,
            ReductionReport {
                algorithm: "iterative",
                sample_size: sample.len(),
                minset_size: minset.len(),
                coverage_size: coverage.len(),
                elapsed: mark.elapsed(),
            },
        );

        // Refinement pass: the iterative minset re-enters the greedy
        // reducer as a fresh sample.
        report(
            &args,
            run_greedy("iterative+greedy", minset_to_sample(minset))?,
        );
    }

    Ok(())
}

fn run_greedy(algorithm: &'static str, sample: Sample) -> Result<ReductionReport, MinsetError> {
    let sample_size = sample.len();
    let mark = Instant::now();
    let (minset, coverage) = greedy_reduce(sample)?;
    Ok(ReductionReport {
        algorithm,
        sample_size,
        minset_size: minset.len(),
        coverage_size: coverage.len(),
        elapsed: mark.elapsed(),
    })
}

fn report(args: &Args, report: ReductionReport) {
    if args.json {
        println!("{}", report.to_json());
    } else {
        report.print_text();
    }
}
