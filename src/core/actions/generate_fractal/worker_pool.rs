use std::error::Error;
use std::fmt;
use std::num::NonZeroUsize;

use log::debug;

#[derive(Debug)]
pub struct WorkerPoolError(rayon::ThreadPoolBuildError);

impl fmt::Display for WorkerPoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to start worker pool: {}", self.0)
    }
}

impl Error for WorkerPoolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

/// Fixed-size pool the sections of every render run on.
///
/// Built once; its threads stop when the pool is dropped.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    worker_count: NonZeroUsize,
}

impl WorkerPool {
    pub fn new(worker_count: NonZeroUsize) -> Result<Self, WorkerPoolError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count.get())
            .thread_name(|index| format!("fractal-worker-{}", index))
            .build()
            .map_err(WorkerPoolError)?;

        debug!("worker pool started with {} threads", worker_count);

        Ok(Self { pool, worker_count })
    }

    #[must_use]
    pub fn worker_count(&self) -> NonZeroUsize {
        self.worker_count
    }

    /// Runs `op` inside the pool so rayon iterators in it use these threads.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("worker_count", &self.worker_count)
            .finish()
    }
}
