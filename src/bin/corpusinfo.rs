//! an executable to load a graph classification corpus and log its characteristics
//! example usage:
//! corpusinfo standard --dir /Data/Graphs --name MUTAG
//! corpusinfo line --dir /Data/Graphs/generated --nbgraphs 600
//! corpusinfo line --dir /Data/Graphs/generated --nbgraphs 600 --ratio 0.3 --stride 2
//!
//! standard expects the 4 file columnar layout DS_A.txt, DS_graph_indicator.txt,
//! DS_node_labels.txt, DS_graph_labels.txt under dir/name.
//! line expects one file per graph named 0.txt, 1.txt, ... (times stride) under dir.
//! Giving --ratio switches the line mode to class balanced subsampling of the files.




use anyhow::{anyhow};
use clap::{Arg, ArgMatches, Command, arg};

use cpu_time::ProcessTime;
use std::time::SystemTime;

use indexmap::IndexSet;

use graphcorpus::prelude::*;


// what the line subcommand needs : directory, corpus size, optional sampling ratio
// and the parser tuning
struct LineArgs {
    dir : String,
    nb_graphs : usize,
    ratio : Option<f64>,
    params : LineFormatParams,
}


fn parse_standard_args(matches : &ArgMatches) -> Result<(String, String), anyhow::Error> {
    log::debug!("in parse_standard_args");
    // get corpus directory
    let dir = match matches.value_of("dir") {
        Some(str) => String::from(str),
        _   => { return Err(anyhow!("error parsing dir")); },
    }; // end match
    // get dataset name
    let name = match matches.value_of("name") {
        Some(str) => String::from(str),
        _   => { return Err(anyhow!("error parsing name")); },
    }; // end match
    //
    return Ok((dir, name));
} // end of parse_standard_args


fn parse_line_args(matches : &ArgMatches) -> Result<LineArgs, anyhow::Error> {
    log::debug!("in parse_line_args");
    // get corpus directory
    let dir = match matches.value_of("dir") {
        Some(str) => String::from(str),
        _   => { return Err(anyhow!("error parsing dir")); },
    }; // end match
    // get number of corpus slots
    let nb_graphs = match matches.value_of("nbgraphs") {
        Some(str) => {
            let res = str.parse::<usize>();
            if res.is_ok() {
                res.unwrap()
            }
            else {
                return Err(anyhow!("error parsing nbgraphs"));
            }
        },
        _   => { return Err(anyhow!("error parsing nbgraphs")); },
    }; // end match
    // the sampling ratio is optional, its presence selects stratified sampling
    let ratio = match matches.value_of("ratio") {
        Some(str) => {
            let res = str.parse::<f64>();
            if res.is_ok() {
                Some(res.unwrap())
            }
            else {
                return Err(anyhow!("error parsing ratio"));
            }
        },
        _   => None,
    }; // end match
    // get stride
    let stride = match matches.value_of("stride") {
        Some(str) => {
            let res = str.parse::<usize>();
            if res.is_ok() {
                res.unwrap()
            }
            else {
                return Err(anyhow!("error parsing stride"));
            }
        },
        _   => 1,
    }; // end match
    //
    let mut params = LineFormatParams::default();
    params.stride = stride;
    params.shuffle_neighbours = matches.is_present("shuffle");
    return Ok(LineArgs{dir, nb_graphs, ratio, params});
} // end of parse_line_args


// petgraph view of the largest graph, gives a degree check on top of the raw counts
fn dump_largest_graph<C>(corpus : &Corpus<C>) {
    let largest = corpus.graphs.iter().max_by_key(|g| g.nb_nodes());
    if let Some(graph) = largest {
        if graph.is_empty() {
            return;
        }
        let pgraph = graph.to_petgraph();
        let max_degree = pgraph.node_indices().map(|n| pgraph.neighbors(n).count()).max().unwrap_or(0);
        println!(" largest graph : {} nodes, {} arcs, max out degree {}", pgraph.node_count(), pgraph.edge_count(), max_degree);
    }
} // end of dump_largest_graph


fn dump_corpus_stats<C>(corpus : &Corpus<C>, set_labels : &IndexSet<String>)
        where C : std::fmt::Display + std::hash::Hash + Eq + Clone {
    println!(" nb graph slots : {}", corpus.nb_graphs());
    println!(" nb nodes : {}, nb arcs : {}", corpus.nb_nodes(), corpus.nb_arcs());
    println!(" distinct node labels : {}", set_labels.len());
    for (class, count) in corpus.class_counts().iter() {
        println!(" class {} : {} graphs", class, count);
    }
    dump_largest_graph(corpus);
} // end of dump_corpus_stats


pub fn main() {
    //
    let _ = env_logger::builder().is_test(true).try_init();
    log::info!("logger initialized");
    //
    let matches = Command::new("corpusinfo")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("standard")
            .arg_required_else_help(true)
            .arg(Arg::new("dir")
                .long("dir")
                .takes_value(true)
                .required(true)
                .help("directory holding the dataset directory"))
            .arg(Arg::new("name")
                .long("name")
                .takes_value(true)
                .required(true)
                .help("dataset name, e.g MUTAG"))
        )
        .subcommand(Command::new("line")
            .arg_required_else_help(true)
            .arg(Arg::new("dir")
                .long("dir")
                .takes_value(true)
                .required(true)
                .help("directory holding the graph files"))
            .args(&[
                arg!(--nbgraphs <nbgraphs> "number of corpus slots"),
            ])
            .arg(Arg::new("ratio")
                .long("ratio")
                .takes_value(true)
                .required(false)
                .help("fraction of class 1 wanted, selects stratified sampling"))
            .arg(Arg::new("stride")
                .long("stride")
                .takes_value(true)
                .required(false)
                .help("file index step, default 1"))
            .arg(Arg::new("shuffle")
                .long("shuffle")
                .help("permute successor lists with per node deterministic seeds"))
        )
    .get_matches();

    // decode args

    match matches.subcommand() {
        Some(("standard", sub_m)) => {
            log::debug!("got standard format mode");
            let res = parse_standard_args(sub_m);
            if res.is_err() {
                log::error!("error : {:?}", res.as_ref().err());
                std::process::exit(1);
            }
            let (dir, name) = res.unwrap();
            log::info!("loading dataset {} under {}", name, dir);
            let cpu_start = ProcessTime::now();
            let sys_start = SystemTime::now();
            let res = read_standard_corpus(std::path::Path::new(&dir), &name);
            if res.is_err() {
                log::error!("error : {:?}", res.as_ref().err());
                log::error!("corpusinfo failed in read_standard_corpus, dataset {}", name);
                std::process::exit(1);
            }
            let (corpus, set_labels) = res.unwrap();
            let sys_t : f64 = sys_start.elapsed().unwrap().as_millis() as f64 / 1000.;
            println!(" corpus loading sys time(s) {:.2e} cpu time(s) {:.2e}", sys_t, cpu_start.elapsed().as_secs());
            dump_corpus_stats(&corpus, &set_labels);
        },

        Some(("line", sub_m)) => {
            log::debug!("got line format mode");
            let res = parse_line_args(sub_m);
            if res.is_err() {
                log::error!("error : {:?}", res.as_ref().err());
                std::process::exit(1);
            }
            let args = res.unwrap();
            let folderpath = std::path::Path::new(&args.dir);
            let cpu_start = ProcessTime::now();
            let sys_start = SystemTime::now();
            let res = match args.ratio {
                Some(ratio) => {
                    log::info!("stratified sampling of {} graphs with ratio {} under {}", args.nb_graphs, ratio, args.dir);
                    read_graphs_stratified(folderpath, args.nb_graphs, ratio, &args.params)
                },
                None => {
                    log::info!("loading {} graphs under {}", args.nb_graphs, args.dir);
                    read_graphs(folderpath, args.nb_graphs, &args.params)
                },
            };
            if res.is_err() {
                log::error!("error : {:?}", res.as_ref().err());
                log::error!("corpusinfo failed reading line format graphs in {}", args.dir);
                std::process::exit(1);
            }
            let corpus = res.unwrap();
            let sys_t : f64 = sys_start.elapsed().unwrap().as_millis() as f64 / 1000.;
            println!(" corpus loading sys time(s) {:.2e} cpu time(s) {:.2e}", sys_t, cpu_start.elapsed().as_secs());
            // collect distinct labels over the whole corpus
            let mut set_labels = IndexSet::<String>::new();
            for graph in &corpus.graphs {
                for label in graph.get_nodes().values() {
                    set_labels.insert(label.clone());
                }
            }
            dump_corpus_stats(&corpus, &set_labels);
        },

        _  => {
            log::error!("expected subcommand standard or line");
            std::process::exit(1);
        }
    }  // end match subcommand
    //
}  // end of main
