//! # Sparrow: sparse row storage for matrix-shaped graphs
//!
//! Sparrow turns an unordered stream of `(row, column, value)` entries into a
//! compressed sparse row (CSR) store, keeps that store canonical, and reads it
//! back as a graph.
//!
//! ## Overview
//!
//! - **Sources**: anything implementing [`NonzeroSource`] can be loaded: a
//!   [`TripletMatrix`], a [`CsrMatrix`], a view over either, or a
//!   `sprs::CsMat`.
//! - **Construction**: [`build_csr_from_source`] places entries by counting
//!   sort in two passes, or one pass when row degrees are already known.
//! - **Storage maintenance**: [`CsrMatrix::pack`] merges duplicate entries and
//!   [`CsrMatrix::sort`] orders each row by column.
//! - **Views**: [`Transpose`] and [`Union`] derive a new entry stream without
//!   copying storage.
//! - **Degeneracy ordering**: [`core_numbers`] runs over any [`Adjacency`].
//!
//! ## Usage
//!
//! Symmetrize a directed graph and compute its cores:
//!
//! ```
//! use sparrow::{build_csr_from_source, core_numbers, symmetrize, TripletMatrix};
//!
//! // 0 -> 1 -> 2 -> 0
//! let edges = TripletMatrix::from_triplets(3, 3, vec![0, 1, 2], vec![1, 2, 0], vec![1u32; 3]);
//! let directed = build_csr_from_source(&edges, None)?;
//! let undirected = symmetrize(&directed)?;
//!
//! let cores = core_numbers(&undirected)?;
//! assert_eq!(cores.core, vec![2, 2, 2]);
//! # Ok::<(), sparrow::SparrowError>(())
//! ```

pub mod error;
pub mod graph;
pub mod matrix;
pub mod utils;

// Re-export primary components
pub use error::{Result, SparrowError};
pub use graph::{core_numbers, symmetrize, Adjacency, CoreDecomposition};
pub use matrix::{build_csr_from_source, build_csr_with_side_channel};
pub use matrix::{mul_vec, to_dense};
pub use matrix::{CsrMatrix, Nonzero, NonzeroSource, RowAccess, TripletMatrix};
pub use matrix::{DegreeEncoding, IndexWidth, LoadConfig};
pub use matrix::{Transpose, Union};
pub use utils::{from_sprs_csr, to_sprs_csr};

/// Version information for the sparrow library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
