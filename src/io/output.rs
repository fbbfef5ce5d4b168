//! Writing class labeled vectors to their text sink.
//! The format is the one downstream classifiers consume : for each graph one line of
//! space separated counts, then one line carrying the class of the graph.


use anyhow::{anyhow};

use std::fs::{OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path};


/// Dumps vectors and their classes to filepath, in corpus order. vectors\[i\] and
/// classes\[i\] must be parallel, a length mismatch is an error.
/// The file is created or truncated. An empty vector gives an empty counts line.
pub fn write_vectors_to_file<C>(vectors : &[Vec<usize>], classes : &[C], filepath : &Path) -> anyhow::Result<()>
        where C : std::fmt::Display {
    //
    if vectors.len() != classes.len() {
        log::error!("write_vectors_to_file : got {} vectors for {} classes", vectors.len(), classes.len());
        return Err(anyhow!("write_vectors_to_file : got {} vectors for {} classes", vectors.len(), classes.len()));
    }
    let fileres = OpenOptions::new().write(true).create(true).truncate(true).open(&filepath);
    if fileres.is_err() {
        log::error!("write_vectors_to_file : could not open file {:?}", filepath.as_os_str());
        return Err(anyhow!("write_vectors_to_file : could not open file {}", filepath.display()));
    }
    let mut bufwriter = BufWriter::new(fileres?);
    for i in 0..vectors.len() {
        let counts = vectors[i].iter().map(|c| c.to_string()).collect::<Vec<String>>().join(" ");
        writeln!(bufwriter, "{}", counts)?;
        writeln!(bufwriter, "{}", classes[i])?;
    }
    bufwriter.flush()?;
    log::info!("write_vectors_to_file : dumped {} vectors in file {}", vectors.len(), filepath.display());
    //
    Ok(())
} // end of write_vectors_to_file


//==================================================================================================


// end of mod tests
