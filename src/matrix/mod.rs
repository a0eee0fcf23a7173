// Matrix data structures and operations

pub mod config;
pub mod conversion;
pub mod csr;
pub mod nonzero;
pub mod reference;
pub mod sort;
pub mod storage;
pub mod triplet;
pub mod views;

pub use config::{DegreeEncoding, IndexWidth, LoadConfig};
pub use conversion::{build_csr_from_source, build_csr_with_side_channel};
pub use csr::{CsrMatrix, CsrNonzeros};
pub use nonzero::{Nonzero, NonzeroSource, RowAccess};
pub use reference::{mul_vec, to_dense};
pub use triplet::TripletMatrix;
pub use views::{Transpose, Union};
