use std::sync::atomic::{AtomicUsize, Ordering};

use cis_common::{Graph, SearchConfig};
use cis_generate::random_linked_cycle;
use cis_subsets::count_connected_subsets;
use itertools::iproduct;
use rand::SeedableRng;
use rand::rngs::StdRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::{CycleSample, DriverError, ExtremesCell, ExtremesReport, candidate_seed};

/// Sampling of random linked cycles for the largest and smallest #CIS.
///
/// Every `(degree, size)` cell draws `iterations` cycles with
/// [`random_linked_cycle`]. Sample `i` is seeded with
/// `candidate_seed(seed, degree, size, 0, i)`, so the extremes do not depend
/// on evaluation order. Ties keep the earliest sample.
#[derive(Clone, Debug, Default)]
pub struct CycleExtremes {
    config: SearchConfig,
}

impl CycleExtremes {
    /// Sweep over the degrees, sizes, iterations and seed of `config`.
    /// Link pairs and the chain check are ignored.
    pub const fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// The sweep configuration.
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Samples every cell, in `(degree, size)` order.
    ///
    /// # Errors
    ///
    /// Forwards generation errors.
    pub fn run(&self) -> Result<ExtremesReport, DriverError> {
        let cells = iproduct!(self.config.degrees.clone(), self.config.size_steps())
            .map(|(degree, size)| self.run_cell(degree, size))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ExtremesReport {
            tag: self.config.cycle_tag(),
            cells,
        })
    }

    #[instrument(skip(self))]
    fn run_cell(&self, degree: usize, size: usize) -> Result<ExtremesCell, DriverError> {
        let mut cell = ExtremesCell::empty(degree, size);
        for (graph, cis) in self.sample(degree, size)? {
            if cell.best.as_ref().is_none_or(|best| cis > best.cis) {
                cell.best = Some(CycleSample {
                    cis,
                    adjacency: graph.adjacency_matrix_string(),
                });
            }
            if cell.worst.as_ref().is_none_or(|worst| cis < worst.cis) {
                cell.worst = Some(CycleSample {
                    cis,
                    adjacency: graph.adjacency_matrix_string(),
                });
            }
        }

        if cell.best.is_none() {
            warn!("no cycles sampled");
        }
        info!("{}", cell);
        Ok(cell)
    }

    fn sample(&self, degree: usize, size: usize) -> Result<Vec<(Graph, u64)>, DriverError> {
        let progress = AtomicUsize::new(0);
        let draw = |index: usize| -> Result<(Graph, u64), DriverError> {
            let seed = candidate_seed(self.config.seed, degree, size, 0, index);
            let graph = random_linked_cycle(size, degree, &mut StdRng::seed_from_u64(seed))?;
            let cis = count_connected_subsets(&graph);

            let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
            if done < self.config.iterations && done % self.config.notify_interval.max(1) == 0 {
                info!("{} / {} cycles", done, self.config.iterations);
            }
            Ok((graph, cis))
        };

        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return (0..self.config.iterations)
                .into_par_iter()
                .map(draw)
                .collect();
        }

        (0..self.config.iterations).map(draw).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_iterations_leave_cells_empty() {
        let cfg = SearchConfig::builder().sizes(6, 8).iterations(0).build();
        let report = CycleExtremes::new(cfg).run().unwrap();
        assert_eq!(report.tag, "D3_N6-8_I0");
        assert_eq!(report.cells.len(), 2);
        assert!(report.cells.iter().all(|c| c.best.is_none() && c.worst.is_none()));
    }
}
