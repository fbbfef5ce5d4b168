//! Loader for labeled graph datasets in the standard format of the graph kernel dataset
//! collection <https://ls11-www.cs.tu-dortmund.de/staff/morris/graphkerneldatasets>.
//!
//! A dataset DS lives in a directory DS holding 4 files :
//! - DS_A.txt : one comma separated edge per line, endpoints are 1-based node ids
//! - DS_graph_indicator.txt : line i gives the graph id owning node i+1
//! - DS_node_labels.txt : line i gives the label of node i+1
//! - DS_graph_labels.txt : one class label per graph
//!
//! Graph ids are 1-based so the corpus reserves the unused slot 0. Adjacency is kept
//! directed exactly as the edge file gives it, an edge u,v augments only u's successor list.


use anyhow::{anyhow};

use std::fs::{OpenOptions};
use std::io::{BufRead, BufReader};
use std::path::{Path};
use std::collections::HashMap;

use csv::ReaderBuilder;
use indexmap::IndexSet;

use super::graph::*;


/// What the two node files of a dataset provide : per graph labeled nodes, the global
/// node to graph and node to label maps and the set of distinct labels in first seen order.
pub struct StandardNodes {
    /// per graph node labels, slot 0 unused
    pub graphs : Vec<LabeledGraph>,
    /// node id to owning graph id
    pub nodes_to_graph : HashMap<usize, usize>,
    /// node id to label
    pub node_labels : HashMap<usize, String>,
    /// distinct labels observed
    pub set_labels : IndexSet<String>,
} // end of StandardNodes


// read a whole file as its lines
fn read_lines(filepath : &Path) -> anyhow::Result<Vec<String>> {
    let fileres = OpenOptions::new().read(true).open(&filepath);
    if fileres.is_err() {
        log::error!("read_lines : could not open file {:?}", filepath.as_os_str());
        return Err(anyhow!("read_lines : could not open file {}", filepath.display()));
    }
    let bufreader = BufReader::new(fileres?);
    let lines = bufreader.lines().collect::<Result<Vec<String>, _>>()?;
    Ok(lines)
} // end of read_lines


/// Reads the node to graph indicator file and the node label file in lockstep,
/// line i of each describing node id i+1. The two files must have the same number
/// of lines. nr_graphs bounds the admissible graph ids (a graph id beyond the
/// class file is a format error).
pub fn read_node_labels(filename_nodes_to_graph : &Path, filename_node_labels : &Path, nr_graphs : usize) -> anyhow::Result<StandardNodes> {
    //
    let nodes = read_lines(filename_nodes_to_graph)?;
    let labels = read_lines(filename_node_labels)?;
    if nodes.len() != labels.len() {
        log::error!("read_node_labels : indicator file has {} lines, label file has {}", nodes.len(), labels.len());
        return Err(anyhow!("read_node_labels : node lists of different length"));
    }
    //
    let mut graphs : Vec<LabeledGraph> = (0..nr_graphs).into_iter().map(|_| LabeledGraph::new()).collect();
    let mut nodes_to_graph = HashMap::<usize, usize>::with_capacity(nodes.len());
    let mut node_labels = HashMap::<usize, String>::with_capacity(nodes.len());
    let mut set_labels = IndexSet::<String>::new();
    //
    for i in 0..nodes.len() {
        let node_id = i + 1;
        let graph_id = match nodes[i].trim().parse::<usize>() {
            Ok(g) => g,
            Err(_) => {
                log::error!("read_node_labels : error decoding graph id at line {}", i + 1);
                return Err(anyhow!("read_node_labels : error decoding graph id at line {}", i + 1));
            }
        };
        if graph_id >= nr_graphs {
            log::error!("read_node_labels : node {} claims graph {} but corpus has {} slots", node_id, graph_id, nr_graphs);
            return Err(anyhow!("read_node_labels : graph id {} out of range at line {}", graph_id, i + 1));
        }
        let label = &labels[i];
        set_labels.insert(label.clone());
        node_labels.insert(node_id, label.clone());
        nodes_to_graph.insert(node_id, graph_id);
        graphs[graph_id].insert_node_label(node_id, label);
    }
    log::info!("read_node_labels : {} nodes, {} distinct labels", nodes.len(), set_labels.len());
    //
    Ok(StandardNodes{graphs, nodes_to_graph, node_labels, set_labels})
} // end of read_node_labels


/// Reads the edge file. Each record is a comma separated pair of 1-based node ids.
/// An edge whose endpoints belong to different graphs is reported but still recorded
/// under the first endpoint's graph. Adjacency stays directed : only u's successor
/// list gains v. Returns the number of edges read.
pub fn read_edges(filename_edges : &Path, graphs : &mut [LabeledGraph], nodes_to_graph : &HashMap<usize, usize>) -> anyhow::Result<usize> {
    //
    let nb_fields = 2;
    let fileres = OpenOptions::new().read(true).open(&filename_edges);
    if fileres.is_err() {
        log::error!("read_edges : could not open file {:?}", filename_edges.as_os_str());
        return Err(anyhow!("read_edges : could not open file {}", filename_edges.display()));
    }
    let bufreader = BufReader::new(fileres?);
    let mut rdr = ReaderBuilder::new().delimiter(b',').flexible(false).has_headers(false).trim(csv::Trim::All).from_reader(bufreader);
    //
    let mut nb_record = 0;
    let mut nb_cross = 0;
    for result in rdr.records() {
        let record = result?;
        if record.len() != nb_fields {
            log::error!("read_edges : record {} has {} fields instead of {}", nb_record + 1, record.len(), nb_fields);
            return Err(anyhow!("read_edges : record {} has {} fields instead of {}", nb_record + 1, record.len(), nb_fields));
        }
        let e1 = match record.get(0).unwrap().parse::<usize>() {
            Ok(e) => e,
            Err(_) => { return Err(anyhow!("read_edges : error decoding field 1 of record {}", nb_record + 1)); }
        };
        let e2 = match record.get(1).unwrap().parse::<usize>() {
            Ok(e) => e,
            Err(_) => { return Err(anyhow!("read_edges : error decoding field 2 of record {}", nb_record + 1)); }
        };
        let g1 = match nodes_to_graph.get(&e1) {
            Some(g) => *g,
            None => { return Err(anyhow!("read_edges : node {} in record {} not in indicator file", e1, nb_record + 1)); }
        };
        let g2 = match nodes_to_graph.get(&e2) {
            Some(g) => *g,
            None => { return Err(anyhow!("read_edges : node {} in record {} not in indicator file", e2, nb_record + 1)); }
        };
        if g1 != g2 {
            // intra graph edges expected, report and keep the edge under g1
            log::warn!("read_edges : edge ({}, {}) connects different graphs {} and {}", e1, e2, g1, g2);
            nb_cross += 1;
        }
        graphs[g1].add_directed_edge(e1, e2);
        nb_record += 1;
    } // end of reading records
    //
    log::info!("read_edges : {} edges read, {} crossing graphs", nb_record, nb_cross);
    Ok(nb_record)
} // end of read_edges


/// Reads a whole dataset in the standard format. folderpath is the directory holding
/// the dataset directory named after dataset.
/// The class file line count + 1 gives the number of graph slots (graph id 0 stays unused),
/// class lines are kept as read.
/// Returns the corpus and the set of distinct node labels.
pub fn read_standard_corpus(folderpath : &Path, dataset : &str) -> anyhow::Result<(Corpus<String>, IndexSet<String>)> {
    //
    let dataset_dir = folderpath.join(dataset);
    let filename_edges = dataset_dir.join(format!("{}_A.txt", dataset));
    let filename_nodes_to_graph = dataset_dir.join(format!("{}_graph_indicator.txt", dataset));
    let filename_node_labels = dataset_dir.join(format!("{}_node_labels.txt", dataset));
    let filename_classes = dataset_dir.join(format!("{}_graph_labels.txt", dataset));
    log::info!("read_standard_corpus : reading dataset {} in {:?}", dataset, dataset_dir);
    //
    let classes = read_lines(&filename_classes)?;
    let nr_graphs = classes.len() + 1;
    //
    let standard_nodes = read_node_labels(&filename_nodes_to_graph, &filename_node_labels, nr_graphs)?;
    let StandardNodes{mut graphs, nodes_to_graph, node_labels : _, set_labels} = standard_nodes;
    let nb_edges = read_edges(&filename_edges, &mut graphs, &nodes_to_graph)?;
    //
    log::info!("read_standard_corpus : {} graphs, {} edges, {} classes", nr_graphs, nb_edges, classes.len());
    //
    Ok((Corpus{graphs, classes}, set_labels))
} // end of read_standard_corpus


//==================================================================================================


#[cfg(test)]
mod tests {

use super::*;

use std::io::Write;

fn log_init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// a 2 graph dataset : nodes 1,2 in graph 1, nodes 3,4,5 in graph 2
fn write_fixture(dir : &Path, name : &str, edges : &str) {
    let dataset_dir = dir.join(name);
    std::fs::create_dir(&dataset_dir).unwrap();
    let mut f = std::fs::File::create(dataset_dir.join(format!("{}_graph_labels.txt", name))).unwrap();
    f.write_all(b"1\n-1\n").unwrap();
    let mut f = std::fs::File::create(dataset_dir.join(format!("{}_graph_indicator.txt", name))).unwrap();
    f.write_all(b"1\n1\n2\n2\n2\n").unwrap();
    let mut f = std::fs::File::create(dataset_dir.join(format!("{}_node_labels.txt", name))).unwrap();
    f.write_all(b"a\nb\na\nc\nb\n").unwrap();
    let mut f = std::fs::File::create(dataset_dir.join(format!("{}_A.txt", name))).unwrap();
    f.write_all(edges.as_bytes()).unwrap();
} // end of write_fixture


#[test]
fn test_read_standard_corpus() {
    log_init_test();
    //
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path(), "TEST", "1, 2\n2, 1\n3, 4\n4, 5\n5, 3\n");
    //
    let res = read_standard_corpus(tmp.path(), "TEST");
    assert!(res.is_ok());
    let (corpus, set_labels) = res.unwrap();
    // the class file has 2 lines so 3 slots, slot 0 unused
    assert_eq!(corpus.classes.len() + 1, corpus.nb_graphs());
    assert_eq!(corpus.classes, vec![String::from("1"), String::from("-1")]);
    assert!(corpus.get_graph(0).unwrap().is_empty());
    // graph 1 holds nodes 1,2
    let g1 = corpus.get_graph(1).unwrap();
    assert_eq!(g1.nb_nodes(), 2);
    assert_eq!(g1.get_label(1), Some("a"));
    assert_eq!(g1.get_label(2), Some("b"));
    // adjacency is directed, every arc of the file present once
    assert_eq!(g1.get_neighbours(1).unwrap(), &vec![2]);
    assert_eq!(g1.get_neighbours(2).unwrap(), &vec![1]);
    let g2 = corpus.get_graph(2).unwrap();
    assert_eq!(g2.get_neighbours(3).unwrap(), &vec![4]);
    assert_eq!(g2.get_neighbours(5).unwrap(), &vec![3]);
    // distinct labels in first seen order
    let labels : Vec<&String> = set_labels.iter().collect();
    assert_eq!(labels, vec!["a", "b", "c"]);
} // end of test_read_standard_corpus


#[test]
fn test_directed_pair_example() {
    log_init_test();
    //
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path(), "PAIR", "1, 2\n");
    let (corpus, _) = read_standard_corpus(tmp.path(), "PAIR").unwrap();
    // only node 1 gained a successor
    let g1 = corpus.get_graph(1).unwrap();
    assert_eq!(g1.get_neighbours(1).unwrap(), &vec![2]);
    assert!(g1.get_neighbours(2).is_none());
} // end of test_directed_pair_example


#[test]
fn test_cross_graph_edge_is_reported_but_recorded() {
    log_init_test();
    //
    let tmp = tempfile::tempdir().unwrap();
    // node 2 is in graph 1, node 5 in graph 2
    write_fixture(tmp.path(), "CROSS", "2, 5\n");
    let res = read_standard_corpus(tmp.path(), "CROSS");
    assert!(res.is_ok());
    let (corpus, _) = res.unwrap();
    // the edge landed under graph 1, the graph owning the first endpoint
    assert_eq!(corpus.get_graph(1).unwrap().get_neighbours(2).unwrap(), &vec![5]);
    assert!(corpus.get_graph(2).unwrap().get_neighbours(2).is_none());
} // end of test_cross_graph_edge_is_reported_but_recorded


#[test]
fn test_node_files_length_mismatch() {
    log_init_test();
    //
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path(), "BAD", "1, 2\n");
    // truncate the label file to 4 lines
    let labels = tmp.path().join("BAD").join("BAD_node_labels.txt");
    std::fs::write(&labels, b"a\nb\na\nc\n").unwrap();
    let res = read_standard_corpus(tmp.path(), "BAD");
    assert!(res.is_err());
} // end of test_node_files_length_mismatch


#[test]
fn test_missing_file_fails() {
    log_init_test();
    //
    let tmp = tempfile::tempdir().unwrap();
    let res = read_standard_corpus(tmp.path(), "NOSUCH");
    assert!(res.is_err());
} // end of test_missing_file_fails


#[test]
fn test_graph_id_out_of_range() {
    log_init_test();
    //
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path(), "RANGE", "1, 2\n");
    // graph id 7 but only 3 slots
    let indicator = tmp.path().join("RANGE").join("RANGE_graph_indicator.txt");
    std::fs::write(&indicator, b"1\n1\n2\n7\n2\n").unwrap();
    let res = read_standard_corpus(tmp.path(), "RANGE");
    assert!(res.is_err());
} // end of test_graph_id_out_of_range


#[test]
fn test_edge_to_unknown_node() {
    log_init_test();
    //
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path(), "UNK", "1, 9\n");
    let res = read_standard_corpus(tmp.path(), "UNK");
    assert!(res.is_err());
} // end of test_edge_to_unknown_node

}  // end of mod tests
