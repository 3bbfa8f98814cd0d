use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use immigration_core::*;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use web_time::Instant;

mod load;

#[derive(Parser, Debug)]
#[command(version, about = "Plays an Immigration Game match until it settles", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Starting pattern, rows of `.`, `1` and `2`
    #[arg(short, long, required_unless_present = "import")]
    pattern: Option<PathBuf>,

    /// Continue from a previous export instead of a pattern
    #[arg(short, long, conflicts_with = "pattern")]
    import: Option<PathBuf>,

    /// Board side, patterns are centered on it
    #[arg(short, long, default_value_t = DEFAULT_SIDE)]
    size: Coord,

    /// Force a tie-break seed instead of one from OS entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many generations when nothing settles
    #[arg(short = 'n', long, default_value_t = 1000)]
    max_generations: u64,

    /// How many snapshots to search for cycles
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history: usize,

    /// Score cycles on populations summed over a whole period
    #[arg(long)]
    cumulative: bool,

    /// Write the final state as JSON
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Print the final board
    #[arg(long)]
    show: bool,
}

impl Args {
    fn config(&self) -> SimConfig {
        let scoring = if self.cumulative {
            PeriodicScoring::Cumulative
        } else {
            PeriodicScoring::CurrentCounts
        };
        SimConfig::new(self.size, self.history, scoring)
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(random_seed)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let seed = args.seed();
    log::debug!("seed: {}", seed);

    let mut sim = start(args, seed)?;
    let start_generation = sim.generation();
    log::info!(
        "Starting at generation {} on a {}x{} board: {}",
        start_generation,
        sim.config().side,
        sim.config().side,
        sim.status(true)
    );

    let started_at = Instant::now();
    let is_running = play(&mut sim, args.max_generations);
    log::info!(
        "Ran {} generations in {:?}",
        sim.generation() - start_generation,
        started_at.elapsed()
    );

    if args.show {
        for row in sim.engine().to_rows() {
            println!("{}", row);
        }
    }

    let classification = sim.classification();
    println!("Generation: {}", sim.generation());
    match classification.regime {
        Regime::Periodic => println!(
            "State: {} ({} generations)",
            classification.regime.label(),
            classification.period
        ),
        regime => println!("State: {}", regime.label()),
    }
    println!("Status: {}", sim.status(is_running));
    println!("Winner: {}", sim.winner(is_running));

    if let Some(path) = &args.export {
        let json = sim.export().to_json_pretty()?;
        fs::write(path, json).with_context(|| format!("Could not write {}", path.display()))?;
        log::info!("Exported generation {} to {}", sim.generation(), path.display());
    }

    Ok(())
}

fn start(args: &Args, seed: u64) -> Result<Simulation> {
    let config = args.config();
    let tie_break = SeededTieBreak::new(seed);

    if let Some(path) = &args.import {
        let export = load::export_file(path)?;
        return Ok(Simulation::from_export(&export, config, tie_break)?);
    }
    let Some(path) = &args.pattern else {
        bail!("Nothing to simulate, pass --pattern or --import");
    };

    let engine = load::pattern_file(path, config.side)?;
    let mut sim = Simulation::with_engine(engine, config, tie_break);
    if sim.counts().is_extinct() {
        log::warn!("Pattern {} has no live cells", path.display());
    }
    sim.mark_initial();
    Ok(sim)
}

/// Steps until the detector asks for a pause or the budget runs out.
///
/// Returns whether the match would still be running.
fn play<T: TieBreak>(sim: &mut Simulation<T>, max_generations: u64) -> bool {
    for _ in 0..max_generations {
        let report = sim.step(true);
        log::trace!(
            "generation {}: {}-{} {:?}",
            report.generation,
            report.counts.player1,
            report.counts.player2,
            report.regime
        );
        if report.auto_pause {
            log::info!(
                "Pausing at generation {}, {} detected",
                report.generation,
                report.regime.label()
            );
            return false;
        }
    }
    log::info!("Stopped after {} generations", max_generations);
    true
}

fn random_seed() -> u64 {
    SmallRng::from_os_rng().next_u64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_with_pattern() {
        let args =
            Args::try_parse_from(["immigration", "-p", "glider.txt", "--cumulative", "-s", "16"])
                .unwrap();

        assert_eq!(args.config().side, 16);
        assert_eq!(args.config().periodic_scoring, PeriodicScoring::Cumulative);
    }

    #[test]
    fn explicit_seed_overrides_entropy() {
        let args = Args::try_parse_from(["immigration", "-p", "a.txt", "--seed", "42"]).unwrap();

        assert_eq!(args.seed(), 42);
        assert_eq!(args.seed(), 42);
    }

    #[test]
    fn missing_seed_is_drawn_fresh() {
        let args = Args::try_parse_from(["immigration", "-p", "a.txt"]).unwrap();

        assert_ne!(args.seed(), args.seed());
    }

    #[test]
    fn args_require_a_source() {
        assert!(Args::try_parse_from(["immigration"]).is_err());
        assert!(Args::try_parse_from(["immigration", "-p", "a.txt", "-i", "b.json"]).is_err());
    }

    #[test]
    fn play_pauses_on_settled_board() {
        let engine = LifeEngine::from_rows(&["....", ".11.", ".22.", "...."]).unwrap();
        let mut sim =
            Simulation::with_engine(engine, SimConfig::default(), FixedTieBreak(Player::One));

        let is_running = play(&mut sim, 50);

        assert!(!is_running);
        assert_eq!(sim.classification().regime, Regime::Static);
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn play_keeps_running_when_budget_runs_out() {
        let engine = LifeEngine::from_rows(&[".....", "..1..", "..1..", "..1..", "....."]).unwrap();
        let mut sim =
            Simulation::with_engine(engine, SimConfig::default(), FixedTieBreak(Player::One));

        assert!(play(&mut sim, 2));
        assert_eq!(sim.generation(), 2);
    }
}
