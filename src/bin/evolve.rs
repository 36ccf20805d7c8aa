use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use neuro_dilemma::config::AppConfig;
use neuro_dilemma::evolution::{EvolutionMetrics, GenerationReport, Population, Reporter};

/// Evolve neural-network strategies for the iterated prisoner's dilemma.
#[derive(Parser)]
#[command(name = "evolve", about = "Evolve prisoner's dilemma strategies")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "evolve.toml")]
    config: PathBuf,

    /// Override number of generations
    #[arg(long)]
    generations: Option<usize>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override tournament worker threads
    #[arg(long)]
    threads: Option<usize>,

    /// Emit each generation report as one JSON line instead of text
    #[arg(long)]
    json: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

/// Renders the top of each leaderboard as text.
struct ConsoleReporter {
    rows: usize,
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, report: &GenerationReport) {
        println!("Generation {}", report.generation);
        for entry in report.leaderboard.iter().take(self.rows) {
            println!("  {entry}");
        }
    }
}

/// Writes each report as a single JSON line.
struct JsonReporter;

impl Reporter for JsonReporter {
    fn report(&mut self, report: &GenerationReport) {
        match serde_json::to_string(report) {
            Ok(line) => println!("{line}"),
            Err(e) => log::error!("failed to serialize generation {}: {e}", report.generation),
        }
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(generations) = cli.generations {
        config.run.generations = generations;
    }
    if let Some(seed) = cli.seed {
        config.run.seed = Some(seed);
    }
    if let Some(threads) = cli.threads {
        config.tournament.threads = threads;
    }
    config.validate().context("validating configuration")?;

    let seed = config.run.seed.unwrap_or_else(rand::random);
    log::info!(
        "Evolving {} agents ({} survivors, layers {:?}) for {} generations, seed {}",
        config.population.size,
        config.population.survivors,
        config.population.layer_sizes,
        config.run.generations,
        seed
    );

    let mut population = Population::from_config(
        &config.population,
        &config.tournament,
        &config.mutation,
        StdRng::seed_from_u64(seed),
    )
    .context("building population")?;

    let mut reporter: Box<dyn Reporter> = if cli.json {
        Box::new(JsonReporter)
    } else {
        Box::new(ConsoleReporter {
            rows: config.run.leaderboard_size,
        })
    };

    let mut metrics = EvolutionMetrics::new();
    let window = config.run.log_interval;

    for _ in 0..config.run.generations {
        let started = Instant::now();
        let report = population
            .play_generation()
            .with_context(|| format!("playing generation {}", population.generation() + 1))?;
        metrics.record_generation_time(started.elapsed());
        metrics.record_generation(report.summary);
        reporter.report(&report);

        if report.generation % window == 0 {
            log::info!(
                "Generation {}/{} | best: {:.0} | mean: {:.1} | defection: {:.2}% | {:.1} ms/gen",
                report.generation,
                config.run.generations,
                metrics.average_best_score(window),
                metrics.average_mean_score(window),
                metrics.average_defection_rate(window),
                metrics.avg_generation_ms(window),
            );
        }
    }

    log::info!(
        "Evolution complete. Total generations: {}",
        metrics.total_generations()
    );
    Ok(())
}
