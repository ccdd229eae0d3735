use rayon::prelude::*;
use tracing::{info, warn};

use crate::insight::analyze_match;
use crate::model::{MatchInsight, MatchRecord};

/// Analyse every record on a dedicated rayon pool. Output order matches input.
pub fn analyze_all(records: &[MatchRecord], threads: usize) -> Vec<MatchInsight> {
    let pool = build_analysis_pool(threads);
    let insights = with_analysis_pool(&pool, || {
        records.par_iter().map(analyze_match).collect::<Vec<_>>()
    });
    info!(
        matches = insights.len(),
        threads = pool.as_ref().map(|p| p.current_num_threads()).unwrap_or(1),
        "batch analysis finished"
    );
    insights
}

fn build_analysis_pool(threads: usize) -> Option<rayon::ThreadPool> {
    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
    {
        Ok(pool) => Some(pool),
        Err(err) => {
            warn!(%err, "analysis pool unavailable, running inline");
            None
        }
    }
}

fn with_analysis_pool<T>(pool: &Option<rayon::ThreadPool>, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    if let Some(pool) = pool.as_ref() {
        pool.install(action)
    } else {
        action()
    }
}
