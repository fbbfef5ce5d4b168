//! To ease access to most frequently items
//!


pub use crate::corpus::graph::*;
pub use crate::corpus::standard::*;
pub use crate::corpus::lineformat::*;
pub use crate::corpus::pgraph::*;

pub use crate::vectorize::vocabulary::*;
pub use crate::vectorize::wl::*;

pub use crate::io::output::*;
