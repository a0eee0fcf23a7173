use sparrow::{build_csr_from_source, core_numbers, symmetrize, TripletMatrix};
use sparrow::{Transpose, NonzeroSource};
use tracing::Level;

fn main() -> sparrow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    println!("sparrow {}: sparse row storage and degeneracy ordering", sparrow::VERSION);

    // A small directed graph, listed out of order and with one repeated edge:
    // a triangle 0-1-2, a tail 2 -> 3 -> 4 and a self-loop on 4
    let edges = TripletMatrix::with_inferred_dimensions(vec![
        (2, 3, 1.0),
        (0, 1, 1.0),
        (1, 2, 1.0),
        (3, 4, 1.0),
        (2, 0, 1.0),
        (0, 1, 1.0),
        (4, 4, 1.0),
    ]);

    let mut directed = build_csr_from_source(&edges, None)?;
    println!("\nDirected graph as loaded:");
    println!("{:?}", directed);

    directed.pack();
    directed.sort();
    println!("\nAfter pack and sort:");
    println!("{:?}", directed);

    let transpose = Transpose::new(&directed);
    println!("\nTranspose has dimensions {:?}", transpose.dimensions());

    let undirected = symmetrize(&directed)?;
    println!("\nSymmetrized:");
    println!("{:?}", undirected);

    let cores = core_numbers(&undirected)?;
    println!("\nCore numbers:");
    for (v, core) in cores.core.iter().enumerate() {
        println!("  vertex {}: {}", v, core);
    }
    println!("  removal order: {:?}", cores.order);
    println!("  degeneracy: {}", cores.degeneracy());

    Ok(())
}
