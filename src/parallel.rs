//! Order-preserving parallel parsing of log files.
//!
//! Every index entry becomes one work item tagged with its position. Workers
//! parse independently and report back tagged results; the collector puts
//! them back into index order. As in sequential mode the run fails with the
//! error of the earliest failing entry.

use anyhow::{anyhow, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::parser::{LogParser, ParsedLog};

/// Configuration for the worker pool
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    pub num_workers: usize,
}

struct WorkItem<'a> {
    index: usize,
    path: &'a str,
}

struct FileResult {
    index: usize,
    result: Result<ParsedLog>,
}

/// Outcome of a pool run: parsed logs in index order and the workers actually started
#[derive(Debug)]
pub struct ParallelRun {
    pub logs: Vec<ParsedLog>,
    pub workers: usize,
}

/// Parses log files on a fixed pool of scoped worker threads
pub struct ParallelProcessor {
    config: ParallelConfig,
}

impl ParallelProcessor {
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }

    pub fn num_workers(&self) -> usize {
        self.config.num_workers.max(1)
    }

    /// Workers started for `file_count` files: never more than there are files
    pub fn effective_workers(&self, file_count: usize) -> usize {
        self.num_workers().min(file_count.max(1))
    }

    /// Parse every path, returning results in the same order as `paths`
    pub fn process(&self, paths: &[String], parser: &LogParser) -> Result<ParallelRun> {
        let num_workers = self.effective_workers(paths.len());
        log::debug!(
            "Parsing {} file(s) on {} worker(s)",
            paths.len(),
            num_workers
        );

        let (work_sender, work_receiver) = unbounded::<WorkItem>();
        let (result_sender, result_receiver) = unbounded::<FileResult>();

        for (index, path) in paths.iter().enumerate() {
            work_sender
                .send(WorkItem { index, path })
                .map_err(|_| anyhow!("work queue closed before all files were queued"))?;
        }
        drop(work_sender);

        // Lowest index that has failed so far; later items are skipped
        let first_failure = AtomicUsize::new(usize::MAX);

        let mut slots: Vec<Option<Result<ParsedLog>>> = paths.iter().map(|_| None).collect();

        thread::scope(|scope| {
            for worker_id in 0..num_workers {
                let work_receiver = work_receiver.clone();
                let result_sender = result_sender.clone();
                let first_failure = &first_failure;
                scope.spawn(move || {
                    worker_thread(worker_id, work_receiver, result_sender, parser, first_failure)
                });
            }
            drop(result_sender);

            for parsed in result_receiver.iter() {
                slots[parsed.index] = Some(parsed.result);
            }
        });

        Ok(ParallelRun {
            logs: collect_in_order(slots)?,
            workers: num_workers,
        })
    }
}

fn worker_thread(
    worker_id: usize,
    work_receiver: Receiver<WorkItem>,
    result_sender: Sender<FileResult>,
    parser: &LogParser,
    first_failure: &AtomicUsize,
) {
    let mut parsed_count = 0usize;
    for item in work_receiver.iter() {
        if item.index > first_failure.load(Ordering::Relaxed) {
            continue;
        }

        let result = parser.read_and_parse(item.path);
        if result.is_err() {
            first_failure.fetch_min(item.index, Ordering::Relaxed);
        }
        parsed_count += 1;

        if result_sender
            .send(FileResult {
                index: item.index,
                result,
            })
            .is_err()
        {
            break; // Collector gone
        }
    }
    log::trace!("worker {} finished after {} file(s)", worker_id, parsed_count);
}

/// Walk slots in index order; the first error wins
fn collect_in_order(slots: Vec<Option<Result<ParsedLog>>>) -> Result<Vec<ParsedLog>> {
    let mut records = Vec::with_capacity(slots.len());
    for (index, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(Ok(parsed)) => records.push(parsed),
            Some(Err(e)) => return Err(e),
            None => return Err(anyhow!("no result reported for index entry {}", index + 1)),
        }
    }
    Ok(records)
}
