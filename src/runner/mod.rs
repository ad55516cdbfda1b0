//! Harness driver: validates the target, loads the corpus, runs each
//! selected strategy sequentially, and logs one JSON result line per run.

mod wait;

use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::args::{HarnessArgs, StrategyKind};
use crate::corpus::{Corpus, Sampler, SharedSampler};
use crate::error::{AppError, AppResult, ConfigError};
use crate::report::Measurement;
use crate::strategy::{run_buffered, run_chunked, run_direct, run_pool};
use crate::transport::{HttpTransport, Transport};

pub(crate) async fn run_all(args: &HarnessArgs) -> AppResult<()> {
    let data_file = args
        .data_file
        .as_deref()
        .ok_or_else(|| AppError::config(ConfigError::MissingDataFile))?;
    let corpus = Corpus::load(Path::new(data_file))?;
    debug!("Loaded {} corpus records from {}", corpus.len(), data_file);

    if !args.no_wait {
        let (host, port) = args.target_host_port()?;
        wait::wait_for_service(&host, port, args.wait_timeout).await?;
    }

    let transport = Arc::new(HttpTransport::new(&args.url, &args.schema_id)?);
    let limit = Some(args.item_count);

    let mut results: Vec<(&'static str, Measurement)> = Vec::new();
    for (run_index, strategy) in args.strategies.iter().enumerate() {
        debug!("Starting {}", strategy.as_str());
        let rng = run_rng(args.seed, run_index);
        let sampler = Sampler::new(Arc::clone(&corpus), limit, rng);
        let measurement = match strategy {
            StrategyKind::Direct => run_direct(transport.as_ref(), sampler).await?,
            StrategyKind::Chunked => {
                run_chunked(transport.as_ref(), sampler, args.chunk_size_bytes.get()).await?
            }
            StrategyKind::Pool => {
                let shared = SharedSampler::new(sampler);
                run_pool(
                    Arc::clone(&transport) as Arc<dyn Transport>,
                    shared,
                    args.parallelism.get(),
                )
                .await?
            }
            StrategyKind::Buffered => {
                run_buffered(
                    Arc::clone(&transport) as Arc<dyn Transport>,
                    sampler,
                    args.buffer_capacity_bytes.get(),
                )
                .await?
            }
        };
        info!(
            "{} results: {}",
            strategy.as_str(),
            serde_json::to_string(&measurement)?
        );
        results.push((strategy.as_str(), measurement));
    }

    info!("Done. Results: {}", summary_json(&results)?);
    Ok(())
}

/// Derives one generator per run so a fixed `--seed` still gives each
/// strategy an independent sequence.
fn run_rng(seed: Option<u64>, run_index: usize) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, |seed| {
        StdRng::seed_from_u64(seed.wrapping_add(u64::try_from(run_index).unwrap_or(u64::MAX)))
    })
}

fn summary_json(results: &[(&'static str, Measurement)]) -> AppResult<String> {
    let entries: Vec<serde_json::Value> = results
        .iter()
        .map(|(name, measurement)| {
            serde_json::json!({
                "impl": name,
                "items": measurement.items,
                "total_time_taken_seconds": measurement.total_time_taken_seconds,
            })
        })
        .collect();
    Ok(serde_json::to_string(&entries)?)
}
