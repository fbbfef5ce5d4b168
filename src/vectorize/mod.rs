//! Vectorization of corpus feature maps.
//!
//! The label propagation producing the maps runs upstream, here we only turn the
//! per graph occurrence counts into vectors sharing one coordinate system and dump
//! them for a classifier.

/// the label to coordinate mapping
pub mod vocabulary;
/// encoding, iteration and padding
pub mod wl;
