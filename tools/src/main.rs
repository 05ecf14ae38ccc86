//! granular-runner: headless runner for the distributed granular demo.
//!
//! Usage:
//!   granular-runner [worker_threads]
//!
//! The single optional positional argument is the worker-thread count
//! per node (default 1). Rank and node count come from the launcher
//! environment (GRANULAR_RANK, GRANULAR_NUM_RANKS; defaults 0 and 1);
//! GRANULAR_CONFIG may name a JSON configuration file. Exit status is
//! zero iff every tick completed.

mod ballistic;
mod scene;
mod sink;

use anyhow::{bail, Context, Result};
use ballistic::BallisticEngine;
use granular_core::{
    config::SimConfig,
    context::RunContext,
    domain::DomainPartitioner,
    driver::{RunSummary, SimDriver},
    physics::PhysicsEngine,
};
use sink::CsvFrameSink;
use std::env;

const SCENE_SEED: u64 = 42;

fn main() -> Result<()> {
    env_logger::init();

    let threads = parse_thread_count()?;
    let rank = parse_env("GRANULAR_RANK", 0usize)?;
    let node_count = parse_env("GRANULAR_NUM_RANKS", 1usize)?;
    let ctx = RunContext::new(rank, node_count, threads)?;

    let config = match env::var("GRANULAR_CONFIG") {
        Ok(path) => SimConfig::from_json_file(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        Err(_) => SimConfig::default(),
    };
    config.validate()?;

    let run_id = uuid::Uuid::new_v4();
    if ctx.is_master() {
        println!("granular-runner — run {run_id}");
        println!("  started:  {}", chrono::Utc::now().to_rfc3339());
        println!("  ranks:    {}", ctx.node_count);
        println!("  threads:  {}", ctx.threads_per_node);
        println!("  ticks:    {}", config.total_ticks());
        println!();
    }

    let partitioner = DomainPartitioner::configure(
        config.domain_lower,
        config.domain_upper,
        config.split_axis,
        ctx.node_count,
    )?;
    if ctx.is_master() {
        println!("{}", partitioner.describe());
        println!();
    }

    let mut engine = BallisticEngine::new(ctx.threads_per_node);
    engine.configure_domain(config.domain_lower, config.domain_upper, config.split_axis)?;
    engine.set_gravity(config.gravity);

    scene::add_container(&mut engine)?;
    let balls = scene::add_falling_balls(&mut engine, SCENE_SEED)?;
    scene::add_big_ball(&mut engine)?;
    log::info!(
        "rank {}: scene holds {balls} balls, the big ball, and the bin",
        ctx.rank
    );

    let mut sink = CsvFrameSink::new("out");
    let mut driver = SimDriver::from_config(&config, ctx)?;
    let summary = driver.run(&mut engine, &mut sink)?;

    if ctx.is_master() {
        print_summary(&summary, &engine);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary, engine: &BallisticEngine) {
    println!();
    println!("=== RUN SUMMARY ===");
    println!("  ticks run:      {}", summary.ticks_run);
    println!("  frames written: {}", summary.frames_written);
    println!("  frames failed:  {}", summary.frames_failed);
    println!("  checkpoints:    {}", summary.checkpoints_applied);
    println!("  bodies:         {}", engine.body_count());
    println!("  workers:        {}", engine.worker_count());
}

/// One optional positional integer; anything else is a usage error.
fn parse_thread_count() -> Result<usize> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok(1),
        [raw] => {
            let threads: usize = raw
                .parse()
                .with_context(|| format!("worker-thread count must be an integer, got '{raw}'"))?;
            Ok(threads)
        }
        _ => bail!("usage: granular-runner [worker_threads]"),
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} must be an integer, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
