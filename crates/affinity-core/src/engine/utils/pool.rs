use super::partition::Partition;
use crate::engine::error::EngineError;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs `task` once per partition on a dedicated pool of `workers` threads and returns
/// the results in partition order.
///
/// Tasks share only what `task` borrows immutably; each builds its own result.
#[cfg(feature = "parallel")]
pub fn run_partitions<T, F>(
    workers: usize,
    partitions: &[Partition],
    task: F,
) -> Result<Vec<T>, EngineError>
where
    T: Send,
    F: Fn(&Partition) -> T + Sync,
{
    debug!(
        "Dispatching {} partition(s) to {} worker(s).",
        partitions.len(),
        workers
    );
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|idx| format!("affinity-worker-{idx}"))
        .build()
        .map_err(|e| EngineError::WorkerPool(e.to_string()))?;

    Ok(pool.install(|| partitions.par_iter().map(&task).collect()))
}

#[cfg(not(feature = "parallel"))]
pub fn run_partitions<T, F>(
    workers: usize,
    partitions: &[Partition],
    task: F,
) -> Result<Vec<T>, EngineError>
where
    T: Send,
    F: Fn(&Partition) -> T + Sync,
{
    debug!(
        "Running {} partition(s) sequentially ({} worker(s) requested, parallel feature disabled).",
        partitions.len(),
        workers
    );
    Ok(partitions.iter().map(task).collect())
}
