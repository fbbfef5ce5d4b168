//! In memory model of a labeled graph corpus.
//!
//! A graph is a mapping from node id to label together with a mapping from node id to
//! neighbour list.
//! A corpus is an ordered sequence of such graphs with a parallel sequence of class labels,
//! classes\[i\] labeling graphs\[i\]. The maps are insertion ordered so a loaded corpus
//! traverses identically from one run to the next.


use std::hash::Hash;

use indexmap::IndexMap;


/// A graph whose nodes carry one discrete label, kept as the raw `String` read from the datafile.
/// Adjacency is a successor list per node, filled in edge arrival order.
/// Whether the lists are directed or symetric depends on the loader : the standard columnar format
/// records only the arc from u to v, the line formats record both directions. See [super::standard] and [super::lineformat].
#[derive(Clone, Debug, Default)]
pub struct LabeledGraph {
    /// node id to label, in first seen order
    pub(crate) nodes : IndexMap<usize, String>,
    /// node id to successor list, each list in append order
    pub(crate) adjacency : IndexMap<usize, Vec<usize>>,
} // end of LabeledGraph


impl LabeledGraph {

    pub fn new() -> Self {
        LabeledGraph{nodes : IndexMap::new(), adjacency : IndexMap::new()}
    }

    /// number of labeled nodes
    pub fn nb_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// number of stored arcs. A symetric edge contributes 2, a symetric self loop also 2.
    pub fn nb_arcs(&self) -> usize {
        self.adjacency.values().map(|l| l.len()).sum()
    }

    /// true if the graph has no node at all (an unfilled corpus slot)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.adjacency.is_empty()
    }

    /// register a label for a node. The first label seen wins, a later insertion
    /// for the same node keeps the label already stored.
    pub fn insert_node_label(&mut self, node : usize, label : &str) {
        self.nodes.entry(node).or_insert_with(|| label.to_string());
    } // end of insert_node_label

    /// get the label of a node
    pub fn get_label(&self, node : usize) -> Option<&str> {
        self.nodes.get(&node).map(|l| l.as_str())
    }

    /// get the successor list of a node
    pub fn get_neighbours(&self, node : usize) -> Option<&Vec<usize>> {
        self.adjacency.get(&node)
    }

    /// append v to the successor list of u. Only u's list is touched.
    pub fn add_directed_edge(&mut self, u : usize, v : usize) {
        self.adjacency.entry(u).or_insert_with(Vec::new).push(v);
    } // end of add_directed_edge

    /// append v to u's successor list and u to v's. For a self loop the
    /// single list gets its node appended twice.
    pub fn add_symetric_edge(&mut self, u : usize, v : usize) {
        self.add_directed_edge(u, v);
        self.add_directed_edge(v, u);
    } // end of add_symetric_edge

    /// node id to label map in first seen order
    pub fn get_nodes(&self) -> &IndexMap<usize, String> {
        &self.nodes
    }

    /// node id to successor list map
    pub fn get_adjacency(&self) -> &IndexMap<usize, Vec<usize>> {
        &self.adjacency
    }

}  // end of impl LabeledGraph


//==================================================================================================


/// An ordered collection of graphs with the parallel class labels.
/// C is the class label type : the standard format keeps class lines unparsed (`String`),
/// the line formats parse them (`i64`).
/// classes can be shorter than graphs : stratified sampling leaves unreached slots as
/// empty graphs with no class entry.
#[derive(Clone, Debug)]
pub struct Corpus<C> {
    /// graphs in corpus order
    pub graphs : Vec<LabeledGraph>,
    /// classes\[i\] labels graphs\[i\]
    pub classes : Vec<C>,
} // end of Corpus


impl<C> Corpus<C> {

    /// allocate a corpus of nr_graphs empty graphs and no classes yet
    pub fn new(nr_graphs : usize) -> Self {
        let graphs = (0..nr_graphs).into_iter().map(|_| LabeledGraph::new()).collect();
        Corpus{graphs, classes : Vec::<C>::new()}
    } // end of new

    /// number of graph slots (filled or not)
    pub fn nb_graphs(&self) -> usize {
        self.graphs.len()
    }

    ///
    pub fn get_graph(&self, i : usize) -> Option<&LabeledGraph> {
        self.graphs.get(i)
    }

    ///
    pub fn get_class(&self, i : usize) -> Option<&C> {
        self.classes.get(i)
    }

    /// total number of nodes over all graphs
    pub fn nb_nodes(&self) -> usize {
        self.graphs.iter().map(|g| g.nb_nodes()).sum()
    }

    /// total number of stored arcs over all graphs
    pub fn nb_arcs(&self) -> usize {
        self.graphs.iter().map(|g| g.nb_arcs()).sum()
    }

}  // end of impl Corpus



impl<C> Corpus<C>
    where C : Eq + Hash + Clone {

    /// histogram of class labels in arrival order
    pub fn class_counts(&self) -> IndexMap<C, usize> {
        let mut counts = IndexMap::<C, usize>::new();
        for c in &self.classes {
            *counts.entry(c.clone()).or_insert(0) += 1;
        }
        counts
    } // end of class_counts

}  // end of impl Corpus


//==================================================================================================


#[cfg(test)]
mod tests {

use super::*;

fn log_init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_first_label_wins() {
    log_init_test();
    //
    let mut graph = LabeledGraph::new();
    graph.insert_node_label(3, "cat");
    graph.insert_node_label(3, "dog");
    assert_eq!(graph.get_label(3), Some("cat"));
    assert_eq!(graph.nb_nodes(), 1);
} // end of test_first_label_wins


#[test]
fn test_symetric_edge() {
    log_init_test();
    //
    let mut graph = LabeledGraph::new();
    graph.add_symetric_edge(3, 7);
    assert_eq!(graph.get_neighbours(3).unwrap(), &vec![7]);
    assert_eq!(graph.get_neighbours(7).unwrap(), &vec![3]);
    assert_eq!(graph.nb_arcs(), 2);
    // a self loop is appended twice in the same list
    graph.add_symetric_edge(5, 5);
    assert_eq!(graph.get_neighbours(5).unwrap(), &vec![5, 5]);
    assert_eq!(graph.nb_arcs(), 4);
} // end of test_symetric_edge


#[test]
fn test_directed_edge_is_one_sided() {
    log_init_test();
    //
    let mut graph = LabeledGraph::new();
    graph.add_directed_edge(2, 5);
    assert_eq!(graph.get_neighbours(2).unwrap(), &vec![5]);
    assert!(graph.get_neighbours(5).is_none());
    assert_eq!(graph.nb_arcs(), 1);
} // end of test_directed_edge_is_one_sided


#[test]
fn test_class_counts() {
    log_init_test();
    //
    let mut corpus = Corpus::<i64>::new(4);
    corpus.classes = vec![0, 1, 1, 0];
    let counts = corpus.class_counts();
    assert_eq!(counts.get(&0), Some(&2));
    assert_eq!(counts.get(&1), Some(&2));
    assert_eq!(corpus.nb_graphs(), 4);
    assert_eq!(corpus.get_class(1), Some(&1));
    assert!(corpus.get_graph(0).unwrap().is_empty());
} // end of test_class_counts

}  // end of mod tests
