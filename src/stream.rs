use crate::error::{PipelineError, Result};
use crate::stats::{PipelineStats, StageStats};
use crossbeam::channel::{bounded, Receiver, Sender};
use std::sync::Arc;
use std::thread::{spawn, JoinHandle};
use std::time::Instant;

/// A stage thread together with the name reported if it panics
struct Worker {
    stage: String,
    handle: JoinHandle<()>,
}

/// A concurrent pipeline over a finite ordered sequence.
///
/// Each attached stage runs on its own thread and hands elements to the next
/// stage through a rendezvous channel: a send blocks until the receiver is
/// ready, so a slow downstream stage stalls every upstream producer back to
/// the source. Dropping any receiver makes the upstream sends fail, which
/// unwinds the whole chain without leaking threads; [`Stream::limit`] and an
/// early-dropped pipeline both rely on this.
///
/// Exactly one terminal call ([`Stream::reduce`] or [`Stream::collect`])
/// drains the pipeline; both join every stage thread before returning.
///
/// Order is preserved through `filter`/`map`/`flat_map`/`limit`. A
/// [`Stream::parallel`] stage with more than one worker deliberately gives
/// up ordering: downstream sees whatever interleaving the racing workers
/// produce, and only the multiset of elements is guaranteed.
pub struct Stream<T> {
    rx: Receiver<T>,
    workers: Vec<Worker>,
    stats: PipelineStats,
}

impl<T: Send + 'static> Stream<T> {
    /// Start a pipeline from an in-memory sequence.
    ///
    /// Spawns the source thread immediately; it sends each element in order
    /// and closes the channel by dropping its sender when done.
    pub fn from_vec(items: Vec<T>) -> Self {
        let stats = PipelineStats::default();
        let stage = stats.register("source");
        let (tx, rx) = bounded(0);

        let handle = spawn(move || {
            for item in items {
                if tx.send(item).is_err() {
                    // Downstream hung up; stop producing.
                    return;
                }
                stage.record_forwarded();
            }
        });

        Self {
            rx,
            workers: vec![Worker {
                stage: "source".into(),
                handle,
            }],
            stats,
        }
    }

    /// Replace the current output channel with a new one fed by a fresh
    /// stage thread that drains the previous channel.
    fn attach<F>(mut self, name: &str, body: F) -> Self
    where
        F: FnOnce(Receiver<T>, Sender<T>, Arc<StageStats>) + Send + 'static,
    {
        let stage = self.stats.register(name);
        let (tx, rx) = bounded(0);
        let upstream = std::mem::replace(&mut self.rx, rx);

        let handle = spawn(move || body(upstream, tx, stage));
        self.workers.push(Worker {
            stage: name.into(),
            handle,
        });
        self
    }

    /// Keep only elements for which `predicate` returns true, in order.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + 'static,
    {
        self.attach("filter", move |rx, tx, stats| {
            for item in rx {
                let start = Instant::now();
                let keep = predicate(&item);
                stats.record_latency(start.elapsed().as_nanos() as u64);

                if keep {
                    if tx.send(item).is_err() {
                        return;
                    }
                    stats.record_forwarded();
                } else {
                    stats.record_discarded();
                }
            }
        })
    }

    /// Transform each element, preserving order and length.
    ///
    /// `transform` must not panic; a panic kills the stage thread and is
    /// reported by the terminal call as [`PipelineError::StagePanicked`].
    pub fn map<F>(self, transform: F) -> Self
    where
        F: Fn(T) -> T + Send + 'static,
    {
        self.attach("map", move |rx, tx, stats| {
            for item in rx {
                let start = Instant::now();
                let result = transform(item);
                stats.record_latency(start.elapsed().as_nanos() as u64);

                if tx.send(result).is_err() {
                    return;
                }
                stats.record_forwarded();
            }
        })
    }

    /// Expand each element into zero or more elements.
    ///
    /// A single worker drains the source, so order is preserved both within
    /// one element's expansion and across elements.
    pub fn flat_map<F>(self, expand: F) -> Self
    where
        F: Fn(T) -> Vec<T> + Send + 'static,
    {
        self.attach("flat_map", move |rx, tx, stats| {
            for item in rx {
                let start = Instant::now();
                let expanded = expand(item);
                stats.record_latency(start.elapsed().as_nanos() as u64);

                for output in expanded {
                    if tx.send(output).is_err() {
                        return;
                    }
                    stats.record_forwarded();
                }
            }
        })
    }

    /// Forward at most the first `n` elements, then stop.
    ///
    /// Once the cap is reached the stage stops reading and drops its
    /// receiver, so upstream producers see a failed send and terminate
    /// instead of blocking forever. `limit(0)` yields an empty stream.
    pub fn limit(self, n: usize) -> Self {
        self.attach("limit", move |rx, tx, stats| {
            if n == 0 {
                return;
            }
            let mut sent = 0usize;
            for item in rx {
                if tx.send(item).is_err() {
                    return;
                }
                stats.record_forwarded();
                sent += 1;
                if sent == n {
                    // Dropping rx here cancels the upstream chain.
                    return;
                }
            }
        })
    }

    /// Fan consumption out across `workers` threads racing on one shared
    /// input and one shared output.
    ///
    /// Elements pass through unmodified but in whatever order the workers
    /// happen to forward them; with one worker the stage degenerates to an
    /// order-preserving passthrough. The output closes when the last worker
    /// exits and drops its sender clone.
    pub fn parallel(mut self, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(PipelineError::NoWorkers);
        }

        let stage = self.stats.register("parallel");
        let (tx, rx) = bounded(0);
        let upstream = std::mem::replace(&mut self.rx, rx);

        for i in 0..workers {
            let rx = upstream.clone();
            let tx = tx.clone();
            let stats = Arc::clone(&stage);

            let handle = spawn(move || {
                for item in rx {
                    if tx.send(item).is_err() {
                        return;
                    }
                    stats.record_forwarded();
                }
            });
            self.workers.push(Worker {
                stage: format!("parallel-{i}"),
                handle,
            });
        }
        drop(tx);

        Ok(self)
    }

    /// Drain the pipeline, folding every element into an accumulator.
    ///
    /// This is a true left-fold: `acc = combine(acc, element)` for each
    /// element in receive order, starting from `initial`.
    pub fn reduce<F>(self, initial: T, combine: F) -> Result<T>
    where
        F: FnMut(T, T) -> T,
    {
        let Self { rx, workers, .. } = self;
        let folded = rx.into_iter().fold(initial, combine);
        join_all(workers)?;
        Ok(folded)
    }

    /// Drain the pipeline into a `Vec` in receive order.
    pub fn collect(self) -> Result<Vec<T>> {
        let Self { rx, workers, .. } = self;
        let items: Vec<T> = rx.into_iter().collect();
        join_all(workers)?;
        Ok(items)
    }

    /// Clonable handle to this pipeline's per-stage counters.
    ///
    /// Take the handle before the terminal call; it stays valid after the
    /// pipeline has been drained.
    pub fn stats(&self) -> PipelineStats {
        self.stats.clone()
    }
}

impl<T: Send + 'static> From<Vec<T>> for Stream<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

/// Join every stage thread, reporting the first panicked stage.
///
/// All handles are joined even after a panic is seen, so no thread outlives
/// the terminal call.
fn join_all(workers: Vec<Worker>) -> Result<()> {
    let mut panicked = None;
    for worker in workers {
        if worker.handle.join().is_err() && panicked.is_none() {
            panicked = Some(worker.stage);
        }
    }
    match panicked {
        Some(stage) => Err(PipelineError::StagePanicked { stage }),
        None => Ok(()),
    }
}
