//! Turns the feature maps produced by an iterated label propagation over a corpus into
//! aligned numeric vectors, one per graph, and dumps them with their classes.
//! The module follows the vectorization scheme of the paper
//! Weisfeiler-Lehman Graph Kernels, Shervashidze-Borgwardt 2011 :
//! each graph is represented by the occurrence counts of its node labels, concatenated
//! over the successive relabelling iterations.


use anyhow::{anyhow};

use indexmap::IndexMap;
use ndarray::{Array1, Array2};

use std::path::{Path};

use super::vocabulary::LabelVocabulary;
use crate::io::output::write_vectors_to_file;


/// The occurrence count of each feature label in one graph at one iteration.
/// Insertion ordered, the arrival order of labels drives coordinate assignment.
pub type FeatureMap = IndexMap<String, usize>;


/// How running vectors are realigned after each iteration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PadPolicy {
    /// pad up to the length of the last graph's running vector, in corpus order.
    /// When an iteration covers the whole corpus the last vector is the longest and
    /// vectors come out aligned. When an iteration covers only a prefix of the corpus
    /// the reference vector can be shorter than earlier ones, those are left as they
    /// are and the result is ragged.
    LastGraph,
    /// pad up to the longest running vector, vectors always come out aligned
    Longest,
} // end of PadPolicy

impl Default for PadPolicy {
    fn default() -> Self { PadPolicy::LastGraph }
}


/// Encodes one feature map against the vocabulary.
/// The vector returned has one coordinate per vocabulary entry at return time : a label
/// already known sets its coordinate to its count, a label never seen before is appended
/// to the vocabulary and its count pushed at the end.
/// Vectors encoded earlier are not widened by this call, realignment across a corpus is
/// the business of [wl_vectors].
pub fn map_to_vector(feature_map : &FeatureMap, vocabulary : &mut LabelVocabulary) -> Vec<usize> {
    let mut vector = vec![0usize; vocabulary.nb_labels()];
    for (label, count) in feature_map {
        let nb_labels = vocabulary.nb_labels();
        let label_idx = vocabulary.insert(label);
        if label_idx < nb_labels {
            vector[label_idx] = *count;
        }
        else {
            vector.push(*count);
        }
    }
    vector
} // end of map_to_vector


/// Encodes nb_iter iterations of feature maps into one running vector per graph.
/// feature_maps\[i\]\[g\] is the map of graph g at iteration i, maps come in corpus order.
/// An iteration carrying more maps than graphs is an error, one carrying fewer covers
/// the corresponding prefix of the corpus and leaves the other vectors untouched.
/// One vocabulary is shared across graphs and iterations, so coordinates are assigned
/// first seen over the whole traversal, iteration major.
/// After each iteration every running vector is padded with trailing zeros up to the
/// reference length given by the pad policy. Padding never truncates.
pub fn wl_vectors(feature_maps : &[Vec<FeatureMap>], nb_iter : usize, nb_graphs : usize, pad : PadPolicy)
            -> anyhow::Result<(Vec<Vec<usize>>, LabelVocabulary)> {
    //
    if feature_maps.len() < nb_iter {
        log::error!("wl_vectors : asked {} iterations but got feature maps for {}", nb_iter, feature_maps.len());
        return Err(anyhow!("wl_vectors : asked {} iterations but got feature maps for {}", nb_iter, feature_maps.len()));
    }
    let mut vocabulary = LabelVocabulary::new();
    let mut vectors : Vec<Vec<usize>> = (0..nb_graphs).map(|_| Vec::<usize>::new()).collect();
    //
    for (i, iter_maps) in feature_maps.iter().enumerate().take(nb_iter) {
        if iter_maps.len() > nb_graphs {
            log::error!("wl_vectors : iteration {} has {} feature maps for {} graphs", i, iter_maps.len(), nb_graphs);
            return Err(anyhow!("wl_vectors : iteration {} has {} feature maps for {} graphs", i, iter_maps.len(), nb_graphs));
        }
        if iter_maps.len() < nb_graphs {
            log::warn!("wl_vectors : iteration {} covers only {} of {} graphs, vectors can come out ragged", i, iter_maps.len(), nb_graphs);
        }
        for (vector, feature_map) in vectors.iter_mut().zip(iter_maps.iter()) {
            let encoded = map_to_vector(feature_map, &mut vocabulary);
            vector.extend(encoded);
        }
        let target = match pad {
            PadPolicy::LastGraph => vectors.last().map(|v| v.len()).unwrap_or(0),
            PadPolicy::Longest   => vectors.iter().map(|v| v.len()).max().unwrap_or(0),
        };
        for vector in vectors.iter_mut() {
            if vector.len() < target {
                vector.resize(target, 0);
            }
        }
    }
    log::info!("wl_vectors : {} iterations over {} graphs, vocabulary size {}", nb_iter, nb_graphs, vocabulary.nb_labels());
    //
    Ok((vectors, vocabulary))
} // end of wl_vectors


/// Encodes nb_iter iterations of feature maps and dumps the vectors with their classes
/// to filepath, see [write_vectors_to_file] for the format.
/// classes must have one entry per graph of the corpus, it fixes the number of vectors.
pub fn write_wl_vectors_to_file<C>(feature_maps : &[Vec<FeatureMap>], nb_iter : usize, classes : &[C],
            filepath : &Path, pad : PadPolicy) -> anyhow::Result<()>
        where C : std::fmt::Display {
    //
    let (vectors, vocabulary) = wl_vectors(feature_maps, nb_iter, classes.len(), pad)?;
    log::info!("write_wl_vectors_to_file : dumping to {}, vector dimension {}", filepath.display(), vocabulary.nb_labels());
    write_vectors_to_file(&vectors, classes, filepath)
} // end of write_wl_vectors_to_file


/// Packs aligned vectors into an Array2, one row per graph, the layout a classifier
/// consumes. Rows of unequal length, which [PadPolicy::LastGraph] can leave behind,
/// are an error.
pub fn vectors_to_array2(vectors : &[Vec<usize>]) -> anyhow::Result<Array2<usize>> {
    let dim = vectors.first().map(|v| v.len()).unwrap_or(0);
    for (i, vector) in vectors.iter().enumerate() {
        if vector.len() != dim {
            log::error!("vectors_to_array2 : vector {} has dimension {} instead of {}", i, vector.len(), dim);
            return Err(anyhow!("vectors_to_array2 : vector {} has dimension {} instead of {}", i, vector.len(), dim));
        }
    }
    let mut array = Array2::<usize>::zeros((vectors.len(), dim));
    for (i, vector) in vectors.iter().enumerate() {
        Array1::from_vec(vector.clone()).move_into(array.row_mut(i));
    }
    Ok(array)
} // end of vectors_to_array2


//==================================================================================================


#[cfg(test)]
mod tests {

use super::*;

fn log_init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn feature_map(pairs : &[(&str, usize)]) -> FeatureMap {
    pairs.iter().map(|(l, c)| (l.to_string(), *c)).collect()
}


#[test]
fn test_map_to_vector_roundtrip() {
    log_init_test();
    //
    let mut vocabulary = LabelVocabulary::new();
    let fmap = feature_map(&[("a", 2), ("b", 5), ("c", 1)]);
    let vector = map_to_vector(&fmap, &mut vocabulary);
    assert_eq!(vector.len(), vocabulary.nb_labels());
    for (label, count) in &fmap {
        let idx = vocabulary.get_index(label).unwrap();
        assert_eq!(vector[idx], *count);
    }
} // end of test_map_to_vector_roundtrip


#[test]
fn test_earlier_vectors_not_widened() {
    log_init_test();
    //
    let mut vocabulary = LabelVocabulary::new();
    let first = map_to_vector(&feature_map(&[("a", 2)]), &mut vocabulary);
    let second = map_to_vector(&feature_map(&[("a", 7), ("b", 1)]), &mut vocabulary);
    // a keeps its coordinate, the first vector keeps its width
    assert_eq!(first, vec![2]);
    assert_eq!(second, vec![7, 1]);
    assert_eq!(vocabulary.get_index("a"), Some(0));
    assert_eq!(vocabulary.nb_labels(), 2);
} // end of test_earlier_vectors_not_widened


#[test]
fn test_two_graphs_one_iteration() {
    log_init_test();
    //
    let maps = vec![vec![feature_map(&[("a", 2)]), feature_map(&[("a", 1), ("b", 3)])]];
    let (vectors, vocabulary) = wl_vectors(&maps, 1, 2, PadPolicy::LastGraph).unwrap();
    assert_eq!(vectors, vec![vec![2, 0], vec![1, 3]]);
    assert_eq!(vocabulary.nb_labels(), 2);
} // end of test_two_graphs_one_iteration


#[test]
fn test_vocabulary_shared_across_iterations() {
    log_init_test();
    //
    let maps = vec![
        vec![feature_map(&[("a", 1)]), feature_map(&[("a", 2)])],
        vec![feature_map(&[("a", 1), ("b", 1)]), feature_map(&[("b", 2)])],
    ];
    let (vectors, vocabulary) = wl_vectors(&maps, 2, 2, PadPolicy::LastGraph).unwrap();
    // coordinates assigned first seen over the whole traversal : a then b
    assert_eq!(vocabulary.get_index("a"), Some(0));
    assert_eq!(vocabulary.get_index("b"), Some(1));
    assert_eq!(vectors, vec![vec![1, 1, 1], vec![2, 0, 2]]);
} // end of test_vocabulary_shared_across_iterations


#[test]
fn test_partial_iteration_leaves_ragged() {
    log_init_test();
    //
    // the third graph gets no feature map, the pad reference is its empty vector
    let maps = vec![vec![feature_map(&[("a", 1)]), feature_map(&[("b", 1)])]];
    let (vectors, _) = wl_vectors(&maps, 1, 3, PadPolicy::LastGraph).unwrap();
    assert_eq!(vectors[0], vec![1]);
    assert_eq!(vectors[1], vec![0, 1]);
    assert!(vectors[2].is_empty());
    // never truncated down to the reference length
    assert!(vectors[1].len() > vectors[2].len());
    assert!(vectors_to_array2(&vectors).is_err());
} // end of test_partial_iteration_leaves_ragged


#[test]
fn test_longest_policy_realigns() {
    log_init_test();
    //
    let maps = vec![vec![feature_map(&[("a", 1)]), feature_map(&[("b", 1)])]];
    let (vectors, _) = wl_vectors(&maps, 1, 3, PadPolicy::Longest).unwrap();
    assert_eq!(vectors, vec![vec![1, 0], vec![0, 1], vec![0, 0]]);
    let array = vectors_to_array2(&vectors).unwrap();
    assert_eq!(array.dim(), (3, 2));
    assert_eq!(array[[1, 1]], 1);
} // end of test_longest_policy_realigns


#[test]
fn test_not_enough_iterations() {
    log_init_test();
    //
    let maps = vec![vec![feature_map(&[("a", 1)])]];
    let res = wl_vectors(&maps, 2, 1, PadPolicy::LastGraph);
    assert!(res.is_err());
} // end of test_not_enough_iterations


#[test]
fn test_too_many_maps_in_iteration() {
    log_init_test();
    //
    let maps = vec![vec![feature_map(&[("a", 1)]), feature_map(&[("b", 1)]), feature_map(&[("c", 1)])]];
    let res = wl_vectors(&maps, 1, 2, PadPolicy::LastGraph);
    assert!(res.is_err());
} // end of test_too_many_maps_in_iteration


#[test]
fn test_write_wl_vectors_file_content() {
    log_init_test();
    //
    let dir = tempfile::tempdir().unwrap();
    let filepath = dir.path().join("wl_vectors.txt");
    let maps = vec![vec![feature_map(&[("a", 2)]), feature_map(&[("a", 1), ("b", 3)])]];
    let classes = vec![0i64, 1];
    write_wl_vectors_to_file(&maps, 1, &classes, &filepath, PadPolicy::LastGraph).unwrap();
    let content = std::fs::read_to_string(&filepath).unwrap();
    assert_eq!(content, "2 0\n0\n1 3\n1\n");
} // end of test_write_wl_vectors_file_content


#[test]
fn test_vectors_to_array2_values() {
    log_init_test();
    //
    let vectors = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
    let array = vectors_to_array2(&vectors).unwrap();
    assert_eq!(array.dim(), (3, 2));
    assert_eq!(array[[0, 0]], 1);
    assert_eq!(array[[2, 1]], 6);
} // end of test_vectors_to_array2_values

}  // end of mod tests
