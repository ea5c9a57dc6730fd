//! Configuration for block-parallel codec operations

use log::warn;
use rayon::prelude::*;

/// Configuration for Reed-Solomon and BCH block decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Number of threads for decoding (0 = auto-detect)
    pub threads: usize,
    /// Whether to decode blocks in parallel (false = one block after another)
    pub parallel: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            threads: 0, // Auto-detect CPU cores
            parallel: true,
        }
    }
}

impl CodecConfig {
    pub fn new(threads: usize, parallel: bool) -> Self {
        Self { threads, parallel }
    }

    /// Sequential configuration, useful for deterministic logging
    pub fn sequential() -> Self {
        Self::new(1, false)
    }

    pub fn from_args(matches: &clap::ArgMatches) -> Self {
        let threads = matches
            .try_get_one::<String>("threads")
            .ok()
            .flatten()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        let parallel = !matches
            .try_get_one::<bool>("no-parallel")
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false);

        Self::new(threads, parallel)
    }

    /// Get effective thread count (auto-detect if 0)
    pub fn effective_threads(&self) -> usize {
        match (self.parallel, self.threads) {
            (false, _) => 1,
            (true, 0) => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            (true, n) => n,
        }
    }

    /// Apply `f` to every block, preserving order.
    ///
    /// An explicit thread count runs on a dedicated pool so the global rayon pool
    /// is left alone. If that pool cannot be built the blocks run sequentially.
    pub(crate) fn map_blocks<T, R, F>(&self, blocks: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if !self.parallel || blocks.len() < 2 {
            return blocks.iter().map(f).collect();
        }

        if self.threads == 0 {
            return blocks.par_iter().map(f).collect();
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
        {
            Ok(pool) => pool.install(|| blocks.par_iter().map(&f).collect()),
            Err(e) => {
                warn!(
                    "Could not build a {}-thread pool ({}), decoding sequentially",
                    self.threads, e
                );
                blocks.iter().map(f).collect()
            }
        }
    }
}
