//! Degeneracy ordering over constructed and symmetrized graphs

use sparrow::{build_csr_from_source, core_numbers, symmetrize, Adjacency, CsrMatrix, TripletMatrix};

fn graph(n: usize, edges: &[(usize, usize)]) -> CsrMatrix<u32> {
    let rows = edges.iter().map(|&(s, _)| s).collect();
    let cols = edges.iter().map(|&(_, t)| t).collect();
    let source = TripletMatrix::from_triplets(n, n, rows, cols, vec![1; edges.len()]);
    build_csr_from_source(&source, None).unwrap()
}

#[test]
fn test_directed_cycle() {
    let g = graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
    assert_eq!(core_numbers(&g).unwrap().core, vec![1, 1, 1, 1]);
}

#[test]
fn test_directed_path() {
    let g = graph(4, &[(0, 1), (1, 2), (2, 3)]);
    assert_eq!(core_numbers(&g).unwrap().core, vec![0, 0, 0, 0]);
}

#[test]
fn test_symmetrized_path() {
    let g = symmetrize(&graph(4, &[(0, 1), (1, 2), (2, 3)])).unwrap();
    assert_eq!(core_numbers(&g).unwrap().core, vec![1, 1, 1, 1]);
}

#[test]
fn test_two_cliques_joined_by_a_bridge() {
    // K4 on 0..4, triangle on 4..7, bridge 3-4
    let mut edges = Vec::new();
    for s in 0..4 {
        for t in (s + 1)..4 {
            edges.push((s, t));
        }
    }
    edges.extend([(4, 5), (5, 6), (6, 4), (3, 4)]);
    let g = symmetrize(&graph(7, &edges)).unwrap();

    let cores = core_numbers(&g).unwrap();
    assert_eq!(cores.core, vec![3, 3, 3, 3, 2, 2, 2]);
    assert_eq!(cores.degeneracy(), 3);
}

#[test]
fn test_order_is_a_degeneracy_ordering() {
    let edges = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2), (5, 1), (1, 5)];
    let g = symmetrize(&graph(6, &edges)).unwrap();
    let cores = core_numbers(&g).unwrap();

    let mut seen = vec![false; g.vertex_count()];
    for &v in &cores.order {
        assert!(!seen[v]);
        seen[v] = true;
    }
    assert!(cores.order.windows(2).all(|w| cores.core[w[0]] <= cores.core[w[1]]));

    // vertices of core k or more induce a subgraph of minimum degree k
    for v in 0..g.vertex_count() {
        let k = cores.core[v];
        let supporting = g.out_edges(v).filter(|&(u, _)| u != v && cores.core[u] >= k).count();
        assert!(supporting >= k);
    }
}

#[test]
fn test_self_loops_ignored() {
    let g = graph(3, &[(0, 0), (1, 1), (2, 2)]);
    assert_eq!(core_numbers(&g).unwrap().core, vec![0, 0, 0]);
}
