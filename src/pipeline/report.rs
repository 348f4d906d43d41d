//! Operator-facing output: stage timings and one `File i: <hex>` line per document.

use std::io::{self, Write};

use crate::{CorpusFingerprints, StageTimings};

pub fn write_timings<W: Write>(out: &mut W, timings: &StageTimings) -> io::Result<()> {
    for (label, elapsed) in timings.stages() {
        writeln!(out, "{} execution time: {:.4}s", label, elapsed.as_secs_f64())?;
    }
    writeln!(out, "Total execution time: {:.4}s", timings.total.as_secs_f64())?;
    writeln!(out)
}

pub fn write_fingerprints<W: Write>(
    out: &mut W,
    corpus: &CorpusFingerprints,
    show_paths: bool,
) -> io::Result<()> {
    for (i, id, fp) in corpus.iter() {
        if show_paths {
            writeln!(out, "File {}: {:x}  {}", i, fp, id)?;
        } else {
            writeln!(out, "File {}: {:x}", i, fp)?;
        }
    }
    Ok(())
}

pub fn print_timings(timings: &StageTimings) -> io::Result<()> {
    write_timings(&mut io::stdout().lock(), timings)
}

pub fn print_fingerprints(corpus: &CorpusFingerprints, show_paths: bool) -> io::Result<()> {
    let mut out = io::BufWriter::new(io::stdout().lock());
    write_fingerprints(&mut out, corpus, show_paths)?;
    out.flush()
}
