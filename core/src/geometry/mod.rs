pub mod basis;
pub mod polygon;

pub use basis::{heading_basis, HeadingBasis};
