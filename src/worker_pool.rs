//! Runs one `Sweeper` per worker thread, workers claiming reference
//! chromosomes off a shared atomic counter until none remain.
//!
//! Worker-local state, results collected after the parallel region,
//! `rayon::scope` so the worker count follows the global thread pool set up
//! from `-t` in `main`.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use crossbeam_channel::unbounded;

use crate::config::RunConfig;
use crate::emitter::BlockInstance;
use crate::junction::JunctionStore;
use crate::sweep::Sweeper;

/// Sweeps every chromosome in `store`, spreading the work over
/// `config.threads` workers, and returns the concatenated block list.
///
/// Workers never touch each other's `Sweeper` state except through two
/// shared atomics: `next_chr`, claimed with a fetch-add per chromosome, and
/// `next_block_id`, claimed with a fetch-add per emitted block so ids stay
/// unique across every worker rather than just within one.
pub fn run(store: &JunctionStore, config: &RunConfig) -> Vec<BlockInstance> {
    let next_chr = AtomicUsize::new(0);
    let next_block_id = AtomicI64::new(1);
    let chr_count = store.chr_count();
    let progress_portion = (chr_count / 50).max(1);
    let progress_count = AtomicUsize::new(0);

    let (tx, rx) = unbounded();
    let worker_count = config.threads.min(chr_count.max(1));

    rayon::scope(|scope| {
        for _ in 0..worker_count {
            let tx = tx.clone();
            let next_chr = &next_chr;
            let next_block_id = &next_block_id;
            let progress_count = &progress_count;
            scope.spawn(move |_| {
                let mut sweeper = Sweeper::new(store, config, next_block_id);
                loop {
                    let chr = next_chr.fetch_add(1, Ordering::Relaxed);
                    if chr >= chr_count {
                        break;
                    }
                    let blocks = sweeper.sweep(chr as u32);
                    let _ = tx.send(blocks);

                    let done = progress_count.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % progress_portion == 0 {
                        print!(".");
                        let _ = std::io::Write::flush(&mut std::io::stdout());
                    }
                }
            });
        }
        drop(tx);
    });

    let mut all = Vec::new();
    while let Ok(mut blocks) = rx.recv() {
        all.append(&mut blocks);
    }
    all
}
