use crate::error::Error;
use crate::graph::{Graph, Step, topological_ordering};
use crate::parse::parse_into;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// How a sort that produced output ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every item was ordered without breaking a cycle.
    Ordered,
    /// The full order was written, but this many cycles had to be broken.
    CyclesReported(usize),
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ordered => 0,
            Self::CyclesReported(_) => 1,
        }
    }
}

/// Handle the sort command: read `file` (or standard input) and write the
/// ordering to standard output, cycle warnings to standard error.
pub fn handle_sort(file: Option<&Path>) -> Result<Outcome> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = BufWriter::new(stdout.lock());
    let mut err = stderr.lock();

    let outcome = match file {
        Some(path) => {
            let input =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            run(input, &mut out, &mut err)
        }
        None => run(io::stdin().lock(), &mut out, &mut err),
    }?;

    out.flush().context("failed to write output")?;
    Ok(outcome)
}

/// Read the whole of `input`, order it, and write the result.
///
/// Nothing reaches `stdout` when the input cannot be read, is not UTF-8 or
/// has an odd number of tokens.
pub fn run<R, W, E>(mut input: R, stdout: &mut W, stderr: &mut E) -> Result<Outcome>
where
    R: Read,
    W: Write,
    E: Write,
{
    let mut buf = Vec::new();
    input
        .read_to_end(&mut buf)
        .context("failed to read input")?;
    let text = String::from_utf8(buf).map_err(|e| Error::InvalidUtf8 {
        offset: e.utf8_error().valid_up_to(),
    })?;

    let mut graph = Graph::new();
    parse_into(&text, &mut graph)?;

    let mut cycles = 0usize;
    for step in topological_ordering(&mut graph) {
        match step? {
            Step::Batch(nodes) => {
                for node in nodes {
                    writeln!(stdout, "{node}")?;
                }
            }
            Step::Cycle(cycle) => {
                writeln!(stderr, "tsort: cycle in data")?;
                for node in cycle.nodes() {
                    writeln!(stderr, "tsort: {node}")?;
                }
                cycles += 1;
            }
        }
    }

    if cycles > 0 {
        info!(cycles, "input contained cycles");
        return Ok(Outcome::CyclesReported(cycles));
    }
    Ok(Outcome::Ordered)
}
