//! Loader for graphs given one file per graph in the line format
//! `node1,node2|label1::label2`, one edge per line with its two endpoint labels,
//! plus one bare integer line, the graph class, expected as the last line.
//! Files are named by a numeric index with extension .txt. Graphs in this convention
//! can be assembled from different sources so adjacency is built symetrically, each
//! edge augmenting both successor lists.
//!
//! Three entry points share the same per file parser :
//! - [read_graphs] reads one file per corpus slot, in file index order
//! - [read_graphs_stratified] subsamples a class balanced corpus from an unbalanced
//!   stream of candidate files
//! - [read_graphs_unsampled] same as [read_graphs], a separate name for callers
//!   loading full dumps where no balancing is wanted


use anyhow::{anyhow};

use std::fs::{OpenOptions};
use std::io::{BufRead, BufReader};
use std::path::{Path};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::graph::*;


/// Tuning of the line format parser, common to the three entry points.
#[derive(Debug, Copy, Clone)]
pub struct LineFormatParams {
    /// candidate i of a scan is the file named stride * i. Default 1.
    pub stride : usize,
    /// an edge line is dropped whole when an endpoint id exceeds this threshold and the
    /// endpoint's label itself contains a comma. Heuristic guard against malformed records.
    pub endpoint_filter_threshold : usize,
    /// permute every successor list with a per node deterministic seed once a file is parsed.
    /// Off by default.
    pub shuffle_neighbours : bool,
} // end of LineFormatParams


impl LineFormatParams {

    pub fn new(stride : usize, endpoint_filter_threshold : usize, shuffle_neighbours : bool) -> Self {
        LineFormatParams{stride, endpoint_filter_threshold, shuffle_neighbours}
    }

    ///
    pub fn get_stride(&self) -> usize { self.stride }

    ///
    pub fn get_filter_threshold(&self) -> usize { self.endpoint_filter_threshold }

    ///
    pub fn get_shuffle(&self) -> bool { self.shuffle_neighbours }

}  // end of impl LineFormatParams


impl Default for LineFormatParams {
    fn default() -> Self {
        LineFormatParams{stride : 1, endpoint_filter_threshold : 100_000, shuffle_neighbours : false}
    }
}


// what one candidate file yields : the graph built from its edge lines and its class
// line if one was found
struct ParsedFile {
    graph : LabeledGraph,
    class : Option<i64>,
} // end of ParsedFile


// deterministic permutation of every successor list. The seed depends on the node id and
// on the candidate rank so a rerun of the same scan gives the same corpus.
fn shuffle_neighbours(graph : &mut LabeledGraph, candidate_rank : usize) {
    for (node, neighbours) in graph.adjacency.iter_mut() {
        let seed = (*node as u64).wrapping_mul(candidate_rank as u64);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        neighbours.shuffle(&mut rng);
    }
} // end of shuffle_neighbours


// parse one graph file. Edge lines fill a fresh graph with first seen node labels and
// symetric adjacency. The first line with no '|' is the class line and ends the scan of
// the file. The graph is built aside and committed (or not) by the caller.
fn parse_graph_file(filepath : &Path, params : &LineFormatParams, candidate_rank : usize) -> anyhow::Result<ParsedFile> {
    //
    let fileres = OpenOptions::new().read(true).open(&filepath);
    if fileres.is_err() {
        log::error!("parse_graph_file : could not open file {:?}", filepath.as_os_str());
        return Err(anyhow!("parse_graph_file : could not open file {}", filepath.display()));
    }
    let bufreader = BufReader::new(fileres?);
    //
    let mut graph = LabeledGraph::new();
    let mut class : Option<i64> = None;
    let mut nb_line = 0;
    for line_res in bufreader.lines() {
        let line = line_res?;
        nb_line += 1;
        let parts : Vec<&str> = line.split('|').collect();
        if parts.len() < 2 {
            // the bare integer class line, it terminates the edge stream
            match parts[0].trim().parse::<i64>() {
                Ok(c) => { class = Some(c); }
                Err(_) => {
                    log::error!("parse_graph_file : error decoding class at line {} of file {:?}", nb_line, filepath.as_os_str());
                    return Err(anyhow!("parse_graph_file : error decoding class at line {} of file {}", nb_line, filepath.display()));
                }
            }
            break;
        }
        let edges_split : Vec<&str> = parts[0].split(',').collect();
        let labels_split : Vec<&str> = parts[1].split("::").collect();
        if edges_split.len() < 2 {
            return Err(anyhow!("parse_graph_file : edge without second endpoint at line {} of file {}", nb_line, filepath.display()));
        }
        if labels_split.len() < 2 {
            return Err(anyhow!("parse_graph_file : edge without second label at line {} of file {}", nb_line, filepath.display()));
        }
        let u = match edges_split[0].trim().parse::<usize>() {
            Ok(u) => u,
            Err(_) => { return Err(anyhow!("parse_graph_file : error decoding endpoint 1 at line {} of file {}", nb_line, filepath.display())); }
        };
        let v = match edges_split[1].trim().parse::<usize>() {
            Ok(v) => v,
            Err(_) => { return Err(anyhow!("parse_graph_file : error decoding endpoint 2 at line {} of file {}", nb_line, filepath.display())); }
        };
        // a huge endpoint id whose label itself contains a comma is a malformed record,
        // the whole line is dropped
        if u > params.endpoint_filter_threshold && labels_split[0].contains(',') {
            log::debug!("parse_graph_file : dropping line {} of file {:?}, endpoint {}", nb_line, filepath.as_os_str(), u);
            continue;
        }
        if v > params.endpoint_filter_threshold && labels_split[1].contains(',') {
            log::debug!("parse_graph_file : dropping line {} of file {:?}, endpoint {}", nb_line, filepath.as_os_str(), v);
            continue;
        }
        graph.insert_node_label(u, labels_split[0].trim());
        graph.insert_node_label(v, labels_split[1].trim());
        graph.add_symetric_edge(u, v);
    } // end of reading lines
    //
    if params.shuffle_neighbours {
        shuffle_neighbours(&mut graph, candidate_rank);
    }
    log::debug!("parse_graph_file : file {:?}, {} nodes, {} arcs, class {:?}", filepath.as_os_str(), graph.nb_nodes(), graph.nb_arcs(), class);
    Ok(ParsedFile{graph, class})
} // end of parse_graph_file


/// Reads exactly nr_graphs files at file indices stride * 0, stride * 1, ... under
/// folderpath, corpus slot i receiving the graph of file stride * i. Every file must
/// carry its class line. Mostly useful for small handmade corpora and tests.
pub fn read_graphs(folderpath : &Path, nr_graphs : usize, params : &LineFormatParams) -> anyhow::Result<Corpus<i64>> {
    //
    let mut corpus = Corpus::<i64>::new(nr_graphs);
    for i in 0..nr_graphs {
        let idx = params.stride * i;
        let filepath = folderpath.join(format!("{}.txt", idx));
        let parsed = parse_graph_file(&filepath, params, i)?;
        match parsed.class {
            Some(c) => { corpus.classes.push(c); }
            None => {
                log::error!("read_graphs : file {:?} has no class line", filepath.as_os_str());
                return Err(anyhow!("read_graphs : file {} has no class line", filepath.display()));
            }
        }
        corpus.graphs[i] = parsed.graph;
    }
    log::info!("read_graphs : {} graphs, {} nodes, {} arcs", corpus.nb_graphs(), corpus.nb_nodes(), corpus.nb_arcs());
    //
    Ok(corpus)
} // end of read_graphs


/// Class balanced subsampling over a stream of candidate files. The two class quotas are
/// female_nr = floor(ratio * nr_graphs) for class 1 and male_nr = floor((1-ratio) * nr_graphs)
/// for class 0. Candidate files are scanned in increasing index order until both quotas are
/// filled or the scan bound 2 * stride * floor(nr_graphs / ratio) is reached.
/// A candidate is parsed aside and committed to the next free corpus slot only if its class
/// quota is still open, otherwise it is discarded whole : an accepted slot is never touched
/// again. Classes other than 0 and 1 are always discarded.
/// Slots not reached when the scan ends stay empty graphs with no class entry.
pub fn read_graphs_stratified(folderpath : &Path, nr_graphs : usize, ratio : f64, params : &LineFormatParams) -> anyhow::Result<Corpus<i64>> {
    //
    if !(ratio > 0. && ratio <= 1.) {
        log::error!("read_graphs_stratified : ratio must be in (0., 1.], got {}", ratio);
        return Err(anyhow!("read_graphs_stratified : ratio must be in (0., 1.], got {}", ratio));
    }
    let female_nr = (ratio * nr_graphs as f64) as usize;
    let male_nr = ((1. - ratio) * nr_graphs as f64) as usize;
    // a tiny ratio can push the bound past usize::MAX, so the products saturate
    let scan_bound = 2usize.saturating_mul(params.stride).saturating_mul((nr_graphs as f64 / ratio) as usize);
    log::info!("read_graphs_stratified : {} of class 0 and {} of class 1 wanted, scanning at most {} candidates", male_nr, female_nr, scan_bound);
    //
    let mut corpus = Corpus::<i64>::new(nr_graphs);
    let mut cnt_m = 0;
    let mut cnt_f = 0;
    let mut cnt_i = 0;
    for i in 0..scan_bound {
        if cnt_m == male_nr && cnt_f == female_nr {
            break;
        }
        let idx = params.stride * i;
        let filepath = folderpath.join(format!("{}.txt", idx));
        let parsed = parse_graph_file(&filepath, params, i)?;
        let class = match parsed.class {
            Some(c) => c,
            None => {
                log::warn!("read_graphs_stratified : file {:?} has no class line, discarded", filepath.as_os_str());
                continue;
            }
        };
        // commit or discard, quota decides
        if class == 0 && cnt_m < male_nr {
            corpus.graphs[cnt_i] = parsed.graph;
            corpus.classes.push(class);
            cnt_m += 1;
            cnt_i += 1;
        }
        else if class == 1 && cnt_f < female_nr {
            corpus.graphs[cnt_i] = parsed.graph;
            corpus.classes.push(class);
            cnt_f += 1;
            cnt_i += 1;
        }
        else {
            log::debug!("read_graphs_stratified : discarding file {}, class {} quota full", idx, class);
        }
    } // end of scanning candidates
    //
    if cnt_m < male_nr || cnt_f < female_nr {
        log::warn!("read_graphs_stratified : quotas not filled, got {} of class 0 ({} wanted) and {} of class 1 ({} wanted)",
                cnt_m, male_nr, cnt_f, female_nr);
    }
    log::info!("read_graphs_stratified : {} graphs accepted, {} nodes, {} arcs", corpus.classes.len(), corpus.nb_nodes(), corpus.nb_arcs());
    //
    Ok(corpus)
} // end of read_graphs_stratified


/// Same as [read_graphs] : a separately named entry point for callers loading a full
/// dump where no class balancing is wanted.
pub fn read_graphs_unsampled(folderpath : &Path, nr_graphs : usize, params : &LineFormatParams) -> anyhow::Result<Corpus<i64>> {
    read_graphs(folderpath, nr_graphs, params)
} // end of read_graphs_unsampled


//==================================================================================================


// end of mod tests
