use crate::sink::{Sink, WriteTask};
use anyhow::{Result, anyhow, bail};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    pub batches: u64,
    pub size: u64,
    pub concurrency: usize,
}

/// signalled once every write of a batch has returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCompleted {
    pub index: u64,
    pub size: u64,
}

/// The write that ended a run, plus how far the run got before it.
///
/// `rows_written` counts every write the sink acknowledged, including siblings of the
/// failed write that finished inside the same batch.
#[derive(Debug)]
pub struct BatchFailure {
    pub batch: u64,
    pub task: u64,
    pub batches_completed: u64,
    pub rows_written: u64,
    pub source: anyhow::Error,
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "write {} of batch {} failed ({} batches completed, {} rows written)",
            self.task, self.batch, self.batches_completed, self.rows_written
        )
    }
}

impl Error for BatchFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

/// Runs `batches` rounds of `size` writes against a shared sink, never holding more than
/// `concurrency` writes in flight, and waits for each round to drain before starting the
/// next one.
pub struct BatchWriter<S: Sink> {
    sink: Arc<S>,
    opts: WriterOptions,
}

impl<S: Sink> BatchWriter<S> {
    pub fn new(sink: Arc<S>, opts: WriterOptions) -> Result<Self> {
        if opts.concurrency == 0 {
            bail!("concurrency must be at least 1");
        }
        Ok(Self { sink, opts })
    }

    pub fn options(&self) -> WriterOptions {
        self.opts
    }

    /// Writes `batches * size` rows and returns that count.
    ///
    /// The first failed write is fatal: no further writes or batches are launched, writes
    /// already in flight are awaited (not cancelled), and the run returns a [`BatchFailure`]
    /// wrapped in the error.
    pub async fn run<F>(&self, mut on_batch: F) -> Result<u64>
    where
        F: FnMut(BatchCompleted),
    {
        let WriterOptions {
            batches,
            size,
            concurrency,
        } = self.opts;

        let permits = Arc::new(Semaphore::new(concurrency));
        let written = Arc::new(AtomicU64::new(0));
        let failed = Arc::new(AtomicBool::new(false));

        for batch in 0..batches {
            let mut tasks = JoinSet::new();
            let mut task_ids = HashMap::new();

            for task in 0..size {
                let permit = permits.clone().acquire_owned().await?;
                if failed.load(Ordering::Acquire) {
                    debug!("batch {batch}: write failed, not launching task {task}");
                    break;
                }

                let sink = self.sink.clone();
                let written = written.clone();
                let failed = failed.clone();
                let handle = tasks.spawn(async move {
                    let _permit = permit;
                    let res = sink.write(WriteTask::new()).await;
                    match res {
                        Ok(()) => {
                            written.fetch_add(1, Ordering::AcqRel);
                        }
                        Err(_) => failed.store(true, Ordering::Release),
                    }
                    (task, res)
                });
                task_ids.insert(handle.id(), task);
            }

            // barrier: every launched write returns before the next batch starts
            let mut first_err: Option<(u64, anyhow::Error)> = None;
            while let Some(joined) = tasks.join_next_with_id().await {
                let (task, res) = match joined {
                    Ok((_, out)) => out,
                    Err(e) => {
                        failed.store(true, Ordering::Release);
                        let task = task_ids.get(&e.id()).copied().unwrap_or_default();
                        (task, Err(anyhow!("write task panicked: {e}")))
                    }
                };
                if let Err(e) = res {
                    if first_err.is_none() {
                        first_err = Some((task, e));
                    } else {
                        warn!("batch {batch}: write {task} also failed: {e:#}");
                    }
                }
            }

            if let Some((task, source)) = first_err {
                return Err(BatchFailure {
                    batch,
                    task,
                    batches_completed: batch,
                    rows_written: written.load(Ordering::Acquire),
                    source,
                }
                .into());
            }

            info!("batch {} of {batches} completed ({size} writes)", batch + 1);
            on_batch(BatchCompleted { index: batch, size });
        }

        Ok(batches * size)
    }
}
