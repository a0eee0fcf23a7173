//! Degeneracy ordering (core numbers) by bucket sort, in O(V + E)
//!
//! Vertices are kept in an array sorted by current degree, with `bin[d]`
//! marking where the bucket of degree `d` starts. Removing the lowest-degree
//! vertex lowers the degree of its out-neighbours; each such neighbour is
//! swapped to the front of its bucket and the bucket boundary moves past it,
//! which drops it into the bucket below without disturbing the sort.

use tracing::{debug, instrument};

use crate::error::{Result, SparrowError};
use crate::graph::adjacency::Adjacency;
use crate::utils::exclusive_scan_in_place;

/// Core numbers of every vertex together with the removal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreDecomposition {
    /// `core[v]` is the largest `k` such that `v` lies in a `k`-core
    pub core: Vec<usize>,
    /// Vertices in the order they were removed; core numbers never decrease
    /// along it
    pub order: Vec<usize>,
}

impl CoreDecomposition {
    /// The largest core number in the graph, 0 for an empty graph
    pub fn degeneracy(&self) -> usize {
        self.order.last().map_or(0, |&v| self.core[v])
    }
}

/// Computes in-degree core numbers of a directed graph
///
/// The degree of a vertex is the number of edges that end at it, not counting
/// self-loops. Undirected cores are obtained by running this on
/// [`symmetrize`](crate::graph::symmetrize)d input.
///
/// Fails with [`SparrowError::IndexOutOfRange`] if an edge points at a vertex
/// `>= vertex_count()`.
#[instrument(level = "debug", skip_all, fields(vertices = graph.vertex_count()))]
pub fn core_numbers<G: Adjacency>(graph: &G) -> Result<CoreDecomposition> {
    let n = graph.vertex_count();

    let mut degree = vec![0usize; n];
    for v in 0..n {
        for (u, _) in graph.out_edges(v) {
            if u >= n {
                return Err(SparrowError::IndexOutOfRange { index: u, bound: n });
            }
            if u != v {
                degree[u] += 1;
            }
        }
    }

    let max_degree = degree.iter().copied().max().unwrap_or(0);
    let mut bin = vec![0usize; max_degree + 2];
    for &d in &degree {
        bin[d] += 1;
    }
    exclusive_scan_in_place(&mut bin);

    // order: vertices sorted by degree; position: inverse of order
    let mut order = vec![0usize; n];
    let mut position = vec![0usize; n];
    for v in 0..n {
        let p = bin[degree[v]];
        position[v] = p;
        order[p] = v;
        bin[degree[v]] += 1;
    }

    // placing advanced every bin to the next bucket's start; shift back
    bin.copy_within(0..=max_degree, 1);
    bin[0] = 0;

    for i in 0..n {
        let v = order[i];
        for (u, _) in graph.out_edges(v) {
            if degree[u] > degree[v] {
                let du = degree[u];
                let pu = position[u];
                let pw = bin[du];
                let w = order[pw];
                if u != w {
                    position[u] = pw;
                    position[w] = pu;
                    order[pw] = u;
                    order[pu] = w;
                }
                bin[du] += 1;
                degree[u] -= 1;
            }
        }
    }

    let cores = CoreDecomposition {
        core: degree,
        order,
    };
    debug!(degeneracy = cores.degeneracy(), "computed core numbers");
    Ok(cores)
}
