//! Conversion of a [LabeledGraph] into a petgraph graph, the interchange structure the
//! feature extraction stage works on.
//! Node weights keep the original datafile id and the discrete label.


use petgraph::graph::{Graph, NodeIndex};
use petgraph::stable_graph::{DefaultIx};

use indexmap::IndexMap;

use super::graph::*;


/// A node as handed to the feature extraction stage : the id given in the datafile and its label.
pub struct CorpusNode {
    /// num of node as given in original data file.
    num : usize,
    /// the discrete label
    label : String,
} // end of CorpusNode


impl CorpusNode {

    pub fn new(num : usize, label : String) -> Self {
        CorpusNode{num, label}
    }

    /// retrieve original node num (given in datafile)
    pub fn get_num(&self) -> usize { self.num }

    ///
    pub fn get_label(&self) -> &str { &self.label }

} // end of impl CorpusNode


impl LabeledGraph {

    /// Builds a petgraph graph with one directed edge per stored arc. The line formats store
    /// both directions of an edge so their conversion keeps the symetry. An arc touching a
    /// node with no label, as a cross graph edge kept by the standard loader can leave behind,
    /// is skipped and counted.
    pub fn to_petgraph(&self) -> Graph<CorpusNode, (), petgraph::Directed, DefaultIx> {
        //
        let mut graph = Graph::<CorpusNode, (), petgraph::Directed>::with_capacity(self.nb_nodes(), self.nb_arcs());
        // retrieve NodeIndex from the num given in the datafile
        let mut nodeset = IndexMap::<usize, NodeIndex>::new();
        for (num, label) in self.get_nodes() {
            let gnode = graph.add_node(CorpusNode::new(*num, label.clone()));
            nodeset.insert(*num, gnode);
        }
        //
        let mut nb_skipped = 0;
        for (u, neighbours) in self.get_adjacency() {
            let gu = match nodeset.get(u) {
                Some(g) => *g,
                None => {
                    nb_skipped += neighbours.len();
                    continue;
                }
            };
            for v in neighbours {
                match nodeset.get(v) {
                    Some(gv) => { graph.add_edge(gu, *gv, ()); }
                    None => { nb_skipped += 1; }
                }
            }
        }
        if nb_skipped > 0 {
            log::warn!("to_petgraph : skipped {} arcs touching an unlabeled node", nb_skipped);
        }
        log::debug!("to_petgraph : {} nodes, {} edges", graph.node_count(), graph.edge_count());
        //
        graph
    } // end of to_petgraph

}  // end of impl LabeledGraph


//==================================================================================================


#[cfg(test)]
mod tests {

use super::*;

fn log_init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}


#[test]
fn test_to_petgraph() {
    log_init_test();
    //
    let mut labeled = LabeledGraph::new();
    labeled.insert_node_label(3, "cat");
    labeled.insert_node_label(7, "dog");
    labeled.add_symetric_edge(3, 7);
    //
    let graph = labeled.to_petgraph();
    assert_eq!(graph.node_count(), 2);
    // both stored arcs became a directed edge
    assert_eq!(graph.edge_count(), 2);
    let first = graph.node_weight(NodeIndex::new(0)).unwrap();
    assert_eq!(first.get_num(), 3);
    assert_eq!(first.get_label(), "cat");
} // end of test_to_petgraph


#[test]
fn test_arc_to_unlabeled_node_is_skipped() {
    log_init_test();
    //
    let mut labeled = LabeledGraph::new();
    labeled.insert_node_label(2, "b");
    // node 3 has no label here, as for a cross graph edge of the standard format
    labeled.add_directed_edge(2, 3);
    //
    let graph = labeled.to_petgraph();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
} // end of test_arc_to_unlabeled_node_is_skipped

}  // end of mod tests
