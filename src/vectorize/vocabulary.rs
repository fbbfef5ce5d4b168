//! The label vocabulary : a monotonically growing mapping from feature label to vector
//! coordinate, coordinates assigned in first seen order.
//! One vocabulary lives for one vectorization run and is threaded by mutable reference
//! through every encoding call. Runs over independent corpora use independent instances,
//! nothing here is process wide.


use indexmap::IndexMap;


/// Maps each feature label to its vector coordinate. The map only grows by appending :
/// a coordinate once assigned never changes, so vectors encoded at different vocabulary
/// sizes agree on their common prefix.
#[derive(Clone, Debug, Default)]
pub struct LabelVocabulary {
    /// label to coordinate, in first seen order
    labels : IndexMap<String, usize>,
} // end of LabelVocabulary


impl LabelVocabulary {

    pub fn new() -> Self {
        LabelVocabulary{labels : IndexMap::new()}
    }

    /// number of coordinates assigned so far
    pub fn nb_labels(&self) -> usize {
        self.labels.len()
    }

    /// the coordinate of a label if it has one
    pub fn get_index(&self, label : &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    /// the label owning a coordinate, to decode vectors back
    pub fn get_label(&self, idx : usize) -> Option<&str> {
        self.labels.get_index(idx).map(|(l, _)| l.as_str())
    }

    /// inserts a label, assigning it the next free coordinate, and returns its coordinate.
    /// A label already known keeps the coordinate it got first, the call is idempotent.
    pub fn insert(&mut self, label : &str) -> usize {
        let next = self.labels.len();
        *self.labels.entry(label.to_string()).or_insert(next)
    } // end of insert

}  // end of impl LabelVocabulary


//==================================================================================================


#[cfg(test)]
mod tests {

use super::*;

fn log_init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}


#[test]
fn test_first_seen_order() {
    log_init_test();
    //
    let mut vocabulary = LabelVocabulary::new();
    assert_eq!(vocabulary.insert("a"), 0);
    assert_eq!(vocabulary.insert("b"), 1);
    assert_eq!(vocabulary.insert("c"), 2);
    assert_eq!(vocabulary.get_index("b"), Some(1));
    assert_eq!(vocabulary.get_label(2), Some("c"));
    assert_eq!(vocabulary.nb_labels(), 3);
} // end of test_first_seen_order


#[test]
fn test_insert_is_idempotent() {
    log_init_test();
    //
    let mut vocabulary = LabelVocabulary::new();
    let first = vocabulary.insert("a");
    let again = vocabulary.insert("a");
    assert_eq!(first, again);
    assert_eq!(vocabulary.nb_labels(), 1);
} // end of test_insert_is_idempotent


#[test]
fn test_size_never_decreases() {
    log_init_test();
    //
    let mut vocabulary = LabelVocabulary::new();
    let mut previous = 0;
    for label in ["x", "y", "x", "z", "y", "w"] {
        vocabulary.insert(label);
        assert!(vocabulary.nb_labels() >= previous);
        previous = vocabulary.nb_labels();
    }
    assert_eq!(vocabulary.nb_labels(), 4);
} // end of test_size_never_decreases

}  // end of mod tests
