//! Configuration for the best-gadget search.
//!
//! This module exposes a small, stable surface for consumers (for example,
//! the `cis_driver` crate) to parameterize which gadget families are tried
//! and how many candidates are evaluated.
//!
//! Quick examples
//!
//! Defaults (10 vertices, degree 3, 3 link pairs, 100 candidates):
//! ```ignore
//! use cis_common::SearchConfig;
//! let cfg = SearchConfig::default();
//! ```
//!
//! A reproducible sweep over sizes 8..=12:
//! ```ignore
//! use cis_common::SearchConfig;
//! let cfg = SearchConfig::builder().sizes(8, 12).seed(7).build();
//! ```

use std::ops::RangeInclusive;

/// Parameters of the randomized best-gadget search.
///
/// - sizes: vertex counts `n` to try. The sweep steps by two, the same way
///   cycle gadgets are grown.
/// - degrees: maximum vertex degree `d` of the random linked cycles.
/// - link_pairs: number `l` of link pairs; a gadget has `2l` link nodes.
///   Cells with `2(l + 1) > n` are skipped.
/// - iterations: candidates evaluated per `(d, n, l)` cell.
/// - notify_interval: progress is logged every this many candidates.
/// - seed: root seed; candidate `i` of a cell uses a seed derived from it.
/// - parallel: evaluate the candidates of a cell concurrently.
/// - chain_check: when greater than one, the best gadget is chained this
///   many times and its #CIS logged as a cross-check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Inclusive range of vertex counts.
    pub sizes: RangeInclusive<usize>,
    /// Inclusive range of maximum degrees.
    pub degrees: RangeInclusive<usize>,
    /// Inclusive range of link pair counts.
    pub link_pairs: RangeInclusive<usize>,
    /// Candidates evaluated per grid cell.
    pub iterations: usize,
    /// Progress logging interval, in candidates.
    pub notify_interval: usize,
    /// Root RNG seed.
    pub seed: u64,
    /// Whether candidates may be evaluated in parallel.
    pub parallel: bool,
    /// Chain length for the post-search cross-check (0 or 1 disables it).
    pub chain_check: usize,
}

impl SearchConfig {
    /// Starts a builder initialized with the defaults.
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder {
            config: Self::default(),
        }
    }

    /// Step between consecutive sizes in the sweep.
    pub const SIZE_STEP: usize = 2;

    /// Vertex counts visited by the sweep, in order.
    pub fn size_steps(&self) -> impl Iterator<Item = usize> + Clone + '_ {
        self.sizes.clone().step_by(Self::SIZE_STEP)
    }

    /// Whether a gadget on `n` vertices can carry `l` link pairs.
    pub const fn admits(n: usize, l: usize) -> bool {
        2 * (l + 1) <= n
    }

    /// Compact `D<d>_N<n>_L<l>_I<i>` tag, used as a report file prefix.
    pub fn tag(&self) -> String {
        format!(
            "D{}_N{}_L{}_I{}",
            range_tag(&self.degrees),
            range_tag(&self.sizes),
            range_tag(&self.link_pairs),
            self.iterations
        )
    }

    /// Compact `D<d>_N<n>_I<i>` tag of a linked-cycle sweep, which has no
    /// link pairs.
    pub fn cycle_tag(&self) -> String {
        format!(
            "D{}_N{}_I{}",
            range_tag(&self.degrees),
            range_tag(&self.sizes),
            self.iterations
        )
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sizes: 10..=10,
            degrees: 3..=3,
            link_pairs: 3..=3,
            iterations: 100,
            notify_interval: 50,
            seed: 0,
            parallel: false,
            chain_check: 0,
        }
    }
}

fn range_tag(range: &RangeInclusive<usize>) -> String {
    if range.start() == range.end() {
        range.start().to_string()
    } else {
        format!("{}-{}", range.start(), range.end())
    }
}

/// Builder for [`SearchConfig`].
#[derive(Clone, Debug)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Sets the inclusive vertex count range.
    pub fn sizes(mut self, min: usize, max: usize) -> Self {
        self.config.sizes = min..=max;
        self
    }

    /// Sets the inclusive maximum degree range.
    pub fn degrees(mut self, min: usize, max: usize) -> Self {
        self.config.degrees = min..=max;
        self
    }

    /// Sets the inclusive link pair range.
    pub fn link_pairs(mut self, min: usize, max: usize) -> Self {
        self.config.link_pairs = min..=max;
        self
    }

    /// Sets the number of candidates per grid cell.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    /// Sets the progress logging interval.
    pub fn notify_interval(mut self, interval: usize) -> Self {
        self.config.notify_interval = interval.max(1);
        self
    }

    /// Sets the root seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Enables or disables parallel candidate evaluation.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Sets the chain length of the post-search cross-check.
    pub fn chain_check(mut self, repeats: usize) -> Self {
        self.config.chain_check = repeats;
        self
    }

    /// Finishes the builder.
    pub fn build(self) -> SearchConfig {
        self.config
    }
}
