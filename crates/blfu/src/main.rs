//! blfu - demonstration driver for the batchlfu cache

mod script;

use anyhow::{Context, Result};
use batchlfu::{CacheConfig, LfuCache, UndersizedBatch};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::script::Op;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries, also the top frequency rung)
    #[arg(short, long, default_value_t = 4)]
    capacity: usize,

    /// Fraction of capacity evicted per pass, in (0, 1]
    #[arg(short = 'f', long, default_value_t = 0.8)]
    eviction_factor: f64,

    /// Evict at least one entry even when the batch rounds down to zero
    #[arg(long)]
    evict_at_least_one: bool,

    /// Print a JSON report after the run
    #[arg(long)]
    json: bool,

    /// Operations: put:KEY=VALUE or get:KEY (default: built-in trace)
    ops: Vec<String>,
}

#[derive(Serialize)]
struct StatsReport {
    hits: u64,
    misses: u64,
    inserts: u64,
    updates: u64,
    evictions: u64,
    eviction_passes: u64,
    hit_ratio: f64,
}

#[derive(Serialize)]
struct Report {
    capacity: usize,
    eviction_factor: f64,
    len: usize,
    stats: StatsReport,
    buckets: Vec<Vec<String>>,
}

impl Report {
    fn from_cache(cache: &LfuCache) -> Self {
        let stats = cache.stats();
        Self {
            capacity: cache.capacity(),
            eviction_factor: cache.eviction_factor(),
            len: cache.len(),
            stats: StatsReport {
                hits: stats.hits(),
                misses: stats.misses(),
                inserts: stats.inserts(),
                updates: stats.updates(),
                evictions: stats.evictions(),
                eviction_passes: stats.eviction_passes(),
                hit_ratio: stats.hit_ratio(),
            },
            buckets: (0..=cache.highest_frequency())
                .map(|freq| cache.bucket_keys(freq).map(str::to_string).collect())
                .collect(),
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let policy = if args.evict_at_least_one {
        UndersizedBatch::EvictOne
    } else {
        UndersizedBatch::Overflow
    };
    let config =
        CacheConfig::new(args.capacity, args.eviction_factor).with_undersized_batch(policy);
    let mut cache = LfuCache::with_config(config).context("invalid cache parameters")?;

    let ops = if args.ops.is_empty() {
        script::canonical_trace()
    } else {
        script::parse_ops(&args.ops)?
    };

    info!(
        capacity = cache.capacity(),
        eviction_factor = cache.eviction_factor(),
        batch_size = cache.batch_size(),
        ops = ops.len(),
        "Starting run"
    );

    run(&mut cache, &ops);

    println!("{}", cache.debug_dump());

    if args.json {
        let report = Report::from_cache(&cache);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Apply each operation, dumping the rungs around every evicting put
fn run(cache: &mut LfuCache, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Put { key, value } => {
                let evicts = !cache.contains(key) && cache.len() >= cache.capacity();
                if evicts {
                    println!("{}", cache.debug_dump());
                }

                let evicted_before = cache.stats().evictions();
                cache.put(key, *value);

                if evicts {
                    println!(
                        "{} evicted {} entries",
                        op,
                        cache.stats().evictions() - evicted_before
                    );
                }
            }
            Op::Get { key } => match cache.get(key) {
                Some(value) => println!("get {} -> {}", key, value),
                None => println!("get {} -> miss", key),
            },
        }
    }
}
