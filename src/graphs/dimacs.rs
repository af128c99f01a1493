//! Reader for the DIMACS shortest path challenge format (`.gr` files).
//!
//! ```text
//! c comment
//! p sp <vertices> <arcs>
//! a <tail> <head> <weight>
//! ```
//!
//! Vertices are numbered from 1 in the file and from 0 in the [`Graph`].

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::SplitWhitespace,
};

use indicatif::ProgressBar;

use super::{Distance, Graph, Vertex};
use crate::{error::GraphReadError, utility::get_progressbar};

pub fn read_graph_from_dimacs_file(path: &Path) -> Result<Graph, GraphReadError> {
    let reader = BufReader::new(File::open(path)?);
    read_graph_from_dimacs(reader)
}

pub fn read_graph_from_dimacs<R: BufRead>(reader: R) -> Result<Graph, GraphReadError> {
    let mut graph: Option<Graph> = None;
    let mut expected_arcs = 0;
    let mut bar = ProgressBar::hidden();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let mut values = line.split_whitespace();

        match values.next() {
            None | Some("c") => continue,
            Some("p") => {
                if graph.is_some() {
                    return Err(parse_error(line_number, "duplicate problem line"));
                }
                if values.next() != Some("sp") {
                    return Err(parse_error(line_number, "expected problem type 'sp'"));
                }
                let vertices: u32 = next_number(&mut values, line_number, "vertex count")?;
                expected_arcs = next_number(&mut values, line_number, "arc count")?;
                graph = Some(Graph::new(vertices));
                bar = get_progressbar("Reading arcs", expected_arcs);
            }
            Some("a") => {
                let Some(graph) = graph.as_mut() else {
                    return Err(parse_error(line_number, "arc before problem line"));
                };
                let tail = to_zero_based(next_number(&mut values, line_number, "tail")?, line_number)?;
                let head = to_zero_based(next_number(&mut values, line_number, "head")?, line_number)?;
                let weight: Distance = next_number(&mut values, line_number, "weight")?;
                graph
                    .add_edge(tail, head, weight)
                    .map_err(|error| parse_error(line_number, &error.to_string()))?;
                bar.inc(1);
            }
            Some(other) => {
                return Err(parse_error(
                    line_number,
                    &format!("unknown line type '{}'", other),
                ))
            }
        }
    }
    bar.finish_and_clear();

    let graph = graph.ok_or_else(|| parse_error(0, "missing problem line"))?;
    if graph.number_of_edges() as u64 != expected_arcs {
        return Err(parse_error(
            0,
            &format!(
                "expected {} arcs, found {}",
                expected_arcs,
                graph.number_of_edges()
            ),
        ));
    }

    Ok(graph)
}

fn next_number<T: std::str::FromStr>(
    values: &mut SplitWhitespace,
    line: usize,
    what: &str,
) -> Result<T, GraphReadError> {
    let value = values
        .next()
        .ok_or_else(|| parse_error(line, &format!("missing {}", what)))?;
    value
        .parse()
        .map_err(|_| parse_error(line, &format!("unable to parse {} '{}'", what, value)))
}

fn to_zero_based(vertex: Vertex, line: usize) -> Result<Vertex, GraphReadError> {
    vertex
        .checked_sub(1)
        .ok_or_else(|| parse_error(line, "vertex ids start at 1"))
}

fn parse_error(line: usize, message: &str) -> GraphReadError {
    GraphReadError::Parse {
        line,
        message: message.to_string(),
    }
}
