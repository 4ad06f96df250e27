use std::sync::atomic::{AtomicUsize, Ordering};

use cis_common::SearchConfig;
use cis_gadget::combine::chain_repeat;
use cis_gadget::{Gadget, GrowthEstimate, GrowthRateEstimator};
use cis_generate::{GenerateError, random_cycle_gadget};
use itertools::iproduct;
use rand::SeedableRng;
use rand::rngs::StdRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, instrument, trace, warn};

use crate::{CellReport, DriverError, SearchReport};

/// Draws per candidate before it is given up as disconnected.
pub const MAX_CONNECT_ATTEMPTS: usize = 1000;

/// Seed of candidate `index` in grid cell `(degree, size, link_pairs)`.
///
/// Depends only on its arguments, so results do not depend on the order in
/// which candidates are evaluated.
pub const fn candidate_seed(
    root: u64,
    degree: usize,
    size: usize,
    link_pairs: usize,
    index: usize,
) -> u64 {
    let cell = ((degree as u64) << 48) ^ ((size as u64) << 32) ^ ((link_pairs as u64) << 16);
    (root ^ cell)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(index as u64)
}

#[derive(Clone, Copy, Debug)]
struct Cell {
    degree: usize,
    size: usize,
    link_pairs: usize,
}

/// Outcome of one candidate draw.
#[derive(Debug)]
enum Candidate {
    /// A connected gadget and its estimate, if it passed the sanity cap.
    Evaluated {
        gadget: Gadget,
        estimate: Option<GrowthEstimate>,
    },
    /// No connected gadget within [`MAX_CONNECT_ATTEMPTS`] draws, counting
    /// draws whose link matching could not be found.
    Disconnected,
}

/// Randomized search for the gadget with the largest chain growth rate.
#[derive(Clone, Debug, Default)]
pub struct GadgetSearch {
    config: SearchConfig,
    estimator: GrowthRateEstimator,
}

impl GadgetSearch {
    /// Search over the grid of `config`.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            estimator: GrowthRateEstimator::new(),
        }
    }

    /// The search configuration.
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs every admitted cell of the grid, in `(degree, size, link_pairs)` order.
    ///
    /// # Errors
    ///
    /// Forwards generation and gadget errors; a disconnected or implausible
    /// candidate is not an error.
    pub fn run(&self) -> Result<SearchReport, DriverError> {
        let mut cells = Vec::new();
        for (degree, size, link_pairs) in iproduct!(
            self.config.degrees.clone(),
            self.config.size_steps(),
            self.config.link_pairs.clone()
        ) {
            if !SearchConfig::admits(size, link_pairs) {
                debug!("skipping n = {}, l = {}: too few vertices", size, link_pairs);
                continue;
            }
            cells.push(self.run_cell(Cell {
                degree,
                size,
                link_pairs,
            })?);
        }

        Ok(SearchReport {
            tag: self.config.tag(),
            cells,
        })
    }

    #[instrument(skip(self), fields(d = cell.degree, n = cell.size, l = cell.link_pairs))]
    fn run_cell(&self, cell: Cell) -> Result<CellReport, DriverError> {
        let candidates = self.evaluate_candidates(cell)?;

        let mut report = CellReport::empty(cell.degree, cell.size, cell.link_pairs);
        let mut best: Option<(Gadget, GrowthEstimate)> = None;
        for candidate in candidates {
            match candidate {
                Candidate::Disconnected => report.disconnected += 1,
                Candidate::Evaluated { estimate: None, .. } => report.rejected += 1,
                Candidate::Evaluated {
                    gadget,
                    estimate: Some(estimate),
                } => {
                    let better = best
                        .as_ref()
                        .is_none_or(|(_, b)| estimate.spectral_radius() > b.spectral_radius());
                    if better {
                        best = Some((gadget, estimate));
                    }
                }
            }
        }

        if let Some((gadget, estimate)) = best {
            report.spectral_radius = Some(estimate.spectral_radius());
            report.lower_bound = Some(estimate.per_vertex_base());
            report.adjacency = Some(gadget.graph().adjacency_matrix_string());
            report.chained_cis = self.chain_check(&gadget)?;
        } else {
            warn!("no plausible gadget among {} candidates", self.config.iterations);
        }

        info!("{}", report);
        Ok(report)
    }

    fn evaluate_candidates(&self, cell: Cell) -> Result<Vec<Candidate>, DriverError> {
        let progress = AtomicUsize::new(0);
        let evaluate = |index: usize| {
            let candidate = self.evaluate_candidate(cell, index);
            let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
            if done < self.config.iterations && done % self.config.notify_interval.max(1) == 0 {
                info!("{} / {} candidates", done, self.config.iterations);
            }
            candidate
        };

        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return (0..self.config.iterations)
                .into_par_iter()
                .map(evaluate)
                .collect();
        }

        (0..self.config.iterations).map(evaluate).collect()
    }

    fn evaluate_candidate(&self, cell: Cell, index: usize) -> Result<Candidate, DriverError> {
        let seed = candidate_seed(
            self.config.seed,
            cell.degree,
            cell.size,
            cell.link_pairs,
            index,
        );
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..MAX_CONNECT_ATTEMPTS {
            let gadget = match random_cycle_gadget(cell.size, cell.degree, cell.link_pairs, &mut rng) {
                Ok(gadget) => gadget,
                // The matcher does not contract odd cycles and may stall; draw again.
                Err(GenerateError::NoMatching { requested, found }) => {
                    trace!("matching stalled at {} of {} edges", found, requested);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if gadget.graph().is_connected() {
                let estimate = self.estimator.estimate_gadget(&gadget)?;
                return Ok(Candidate::Evaluated { gadget, estimate });
            }
        }

        debug!("candidate {} stayed disconnected", index);
        Ok(Candidate::Disconnected)
    }

    /// #CIS of the best gadget chained `chain_check` times, when enabled.
    fn chain_check(&self, gadget: &Gadget) -> Result<Option<u64>, DriverError> {
        if self.config.chain_check <= 1 {
            return Ok(None);
        }

        let chained = chain_repeat(gadget, self.config.chain_check)?;
        let cis = chained.cis();
        info!(
            "chain of {} copies: {} nodes, #CIS = {}",
            self.config.chain_check,
            chained.node_count(),
            cis
        );
        Ok(Some(cis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_seeds_differ_per_cell_and_index() {
        let a = candidate_seed(0, 3, 10, 3, 0);
        assert_ne!(a, candidate_seed(0, 3, 10, 3, 1));
        assert_ne!(a, candidate_seed(0, 3, 12, 3, 0));
        assert_ne!(a, candidate_seed(0, 4, 10, 3, 0));
        assert_ne!(a, candidate_seed(1, 3, 10, 3, 0));
        assert_eq!(a, candidate_seed(0, 3, 10, 3, 0));
    }

    #[test]
    fn test_disconnected_cells_are_counted() {
        // A bare cycle cut twice always falls apart.
        let cfg = SearchConfig::builder()
            .sizes(6, 6)
            .degrees(2, 2)
            .link_pairs(2, 2)
            .iterations(2)
            .build();
        let report = GadgetSearch::new(cfg).run().unwrap();
        assert_eq!(report.cells.len(), 1);
        assert_eq!(report.cells[0].disconnected, 2);
        assert_eq!(report.cells[0].lower_bound, None);
    }
}
