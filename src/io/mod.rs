//! Output of class labeled vectors.

/// text dump of vectors and classes
pub mod output;
