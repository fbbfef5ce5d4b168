//! The graph corpus model and its loaders.
//!
//! A corpus is an ordered sequence of labeled graphs with a parallel sequence of class
//! labels. Every later stage relies on this shared ordering : graph i, class i and
//! feature map i all describe the same graph.
//!
//! Two on disk conventions are supported :
//! - the standard columnar format of the graph kernel dataset collection
//!   <https://ls11-www.cs.tu-dortmund.de/staff/morris/graphkerneldatasets>, see [standard]
//! - a one file per graph line format with inline node labels, plain or with class
//!   balanced subsampling, see [lineformat]
//!
//! Loaded graphs convert to petgraph structures for the feature extraction stage, see [pgraph].


/// the in memory model : labeled graphs and corpora.
pub mod graph;

/// loader for the standard 4 file columnar format.
pub mod standard;

/// loader for the one file per graph line format, plain or stratified.
pub mod lineformat;

/// conversion to petgraph.
pub mod pgraph;
