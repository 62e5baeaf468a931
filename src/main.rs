use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use genpaint::{
    load_reference, BlendRule, EvolutionLauncher, EvolutionOptions, PngSnapshot,
    RandomNumberGenerator,
};

/// Evolve a painting made of rectangles toward a reference image.
///
/// Every time the best fitness improves, the best painting is written to the
/// output file, replacing the previous one.
#[derive(Parser, Debug)]
#[command(name = "genpaint", version, about, long_about = None)]
struct Args {
    /// Reference image (PNG or JPEG)
    #[arg(short, long)]
    input: PathBuf,

    /// Where the current best painting is written
    #[arg(short, long, default_value = "best.png")]
    output: PathBuf,

    /// Number of generations to evolve
    #[arg(short, long, default_value_t = 10_000)]
    generations: usize,

    /// Number of individuals per generation
    #[arg(short, long, default_value_t = 1_000)]
    population: usize,

    /// Number of rectangles per individual
    #[arg(short = 'n', long, default_value_t = 2_000)]
    genes: usize,

    /// Fitness worker threads (defaults to one per core)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Regenerate the weakest three quarters of the population every generation
    #[arg(long)]
    mass_mutation: bool,

    /// Compositing rule: averaged or weighted-alpha
    #[arg(long, default_value_t = BlendRule::Averaged)]
    blend: BlendRule,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let reference = load_reference(&args.input)?;
    info!(
        path = %args.input.display(),
        width = reference.width(),
        height = reference.height(),
        "loaded reference image"
    );

    let mut builder = EvolutionOptions::builder()
        .num_generations(args.generations)
        .population_size(args.population)
        .gene_count(args.genes)
        .mass_mutation(args.mass_mutation)
        .blend_rule(args.blend);
    if let Some(threads) = args.threads {
        builder = builder.worker_threads(threads);
    }
    let options = builder.build();

    let mut rng = match args.seed {
        Some(seed) => RandomNumberGenerator::from_seed(seed),
        None => RandomNumberGenerator::new(),
    };
    let mut sink = PngSnapshot::new(&args.output);

    let launcher = EvolutionLauncher::new(Arc::new(reference));
    let result = launcher.evolve(&options, &mut rng, &mut sink)?;

    info!(
        best = result.best_fitness,
        generations = result.history.len(),
        snapshot_failures = result.snapshot_failures,
        output = %sink.path().display(),
        "evolution finished"
    );

    Ok(())
}
