//! Graph views of sparse matrices
//!
//! A square matrix is read as a directed graph: row `v` lists the out-edges
//! of vertex `v` and the stored value is the edge weight.

pub mod adjacency;
pub mod core_numbers;

pub use adjacency::{symmetrize, Adjacency};
pub use core_numbers::{core_numbers, CoreDecomposition};
