//! Randomized matchings by repeated augmenting-path search.
//!
//! Each round shuffles the free vertices and searches an alternating path
//! from each of them in turn, flipping the first path found. Odd cycles are
//! not contracted, so on non-bipartite graphs the result is maximal but not
//! always maximum. On bipartite graphs it is maximum.

use cis_common::{Graph, NodeIdx};
use contracts::*;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::trace;

use crate::GenerateError;

/// A set of pairwise disjoint edges, as `(u, v)` with `u < v`.
pub type Matching = Vec<(NodeIdx, NodeIdx)>;

struct Matcher<'g> {
    graph: &'g Graph,
    mate: Vec<Option<NodeIdx>>,
    size: usize,
}

impl<'g> Matcher<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            mate: vec![None; graph.node_count()],
            size: 0,
        }
    }

    /// Grows the matching by one edge. Returns false when no augmenting path was found.
    fn augment<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.size >= self.graph.node_count() / 2 {
            return false;
        }

        let mut free: Vec<NodeIdx> = self
            .graph
            .nodes()
            .filter(|u| self.mate[u.as_usize()].is_none())
            .collect();
        free.shuffle(rng);

        for s in free {
            let mut visited = vec![false; self.graph.node_count()];
            visited[s.as_usize()] = true;
            if self.extend(s, &mut visited, rng) {
                self.size += 1;
                trace!("augmented from {} to {} edges", s, self.size);
                return true;
            }
        }
        false
    }

    /// Looks for an alternating path from `u` to a free vertex and flips it.
    fn extend<R: Rng + ?Sized>(&mut self, u: NodeIdx, visited: &mut [bool], rng: &mut R) -> bool {
        let mut neighbors = self.graph.neighbors(u).to_vec();
        neighbors.shuffle(rng);

        for v in neighbors {
            if std::mem::replace(&mut visited[v.as_usize()], true) {
                continue;
            }
            let mate = self.mate[v.as_usize()];
            let found = match mate {
                None => true,
                Some(w) => {
                    !std::mem::replace(&mut visited[w.as_usize()], true) && self.extend(w, visited, rng)
                }
            };
            if found {
                self.mate[u.as_usize()] = Some(v);
                self.mate[v.as_usize()] = Some(u);
                return true;
            }
        }
        false
    }

    fn edges(&self) -> Matching {
        self.graph
            .nodes()
            .filter_map(|u| match self.mate[u.as_usize()] {
                Some(v) if u < v => Some((u, v)),
                _ => None,
            })
            .collect()
    }
}

/// A random matching that no augmenting-path round can grow further.
pub fn random_maximal_matching<R: Rng + ?Sized>(graph: &Graph, rng: &mut R) -> Matching {
    let mut matcher = Matcher::new(graph);
    while matcher.augment(rng) {}
    matcher.edges()
}

/// A random matching of exactly `size` edges.
///
/// # Errors
///
/// Returns [`GenerateError::NoMatching`] when the search stalls below `size`.
#[debug_ensures(ret.as_ref().map_or(size, Vec::len) == size)]
pub fn random_matching<R: Rng + ?Sized>(
    graph: &Graph,
    size: usize,
    rng: &mut R,
) -> Result<Matching, GenerateError> {
    let mut matcher = Matcher::new(graph);
    while matcher.size < size {
        if !matcher.augment(rng) {
            return Err(GenerateError::NoMatching {
                requested: size,
                found: matcher.size,
            });
        }
    }
    Ok(matcher.edges())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{complete, cycle, ladder};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_valid(graph: &Graph, matching: &Matching) {
        let mut used = vec![false; graph.node_count()];
        for &(u, v) in matching {
            assert!(u < v);
            assert!(graph.has_edge(u, v));
            assert!(!std::mem::replace(&mut used[u.as_usize()], true));
            assert!(!std::mem::replace(&mut used[v.as_usize()], true));
        }
    }

    #[test]
    fn test_bipartite_graphs_get_perfect_matchings() {
        let mut rng = StdRng::seed_from_u64(1);
        for graph in [cycle(6).unwrap(), ladder(10).unwrap(), cycle(2).unwrap()] {
            let m = random_maximal_matching(&graph, &mut rng);
            assert_valid(&graph, &m);
            assert_eq!(m.len(), graph.node_count() / 2);
        }
    }

    #[test]
    fn test_matching_of_requested_size() {
        let mut rng = StdRng::seed_from_u64(2);
        let graph = complete(7).unwrap();
        let m = random_matching(&graph, 2, &mut rng).unwrap();
        assert_eq!(m.len(), 2);
        assert_valid(&graph, &m);
        assert!(random_matching(&graph, 0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_star_has_no_two_edge_matching() {
        let mut rng = StdRng::seed_from_u64(3);
        let star = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3)]).unwrap();
        assert_eq!(
            random_matching(&star, 2, &mut rng),
            Err(GenerateError::NoMatching {
                requested: 2,
                found: 1
            })
        );
    }
}
