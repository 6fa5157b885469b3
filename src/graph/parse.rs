use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Deserialize;
use serde_json::error::Category;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use super::model::{GraphLink, GraphNode, GraphSnapshot};

// String literals are matched first so their contents pass through untouched.
static BARE_NUMERIC_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|([{,]\s*)(-?\d+(?:\.\d+)?)\s*:"#)
        .expect("numeric key pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("{0}")]
    Shape(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(error: serde_json::Error) -> Self {
        match error.classify() {
            Category::Syntax | Category::Eof | Category::Io => Self::Syntax {
                line: error.line(),
                column: error.column(),
                message: error.to_string(),
            },
            Category::Data => Self::Shape(format!("expected an adjacency map: {error}")),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NeighborId {
    Number(Number),
    Text(String),
}

impl NeighborId {
    fn into_id(self) -> String {
        match self {
            Self::Number(number) => match number.as_f64() {
                Some(value) if number.is_f64() && value.fract() == 0.0 && value.abs() < 1e15 => {
                    format!("{}", value as i64)
                }
                _ => number.to_string(),
            },
            Self::Text(text) => text,
        }
    }
}

/// Turns the permissive `{1: [2, 3], '2': [3]}` notation into strict JSON.
fn normalize(text: &str) -> String {
    let double_quoted = text.replace('\'', "\"");
    BARE_NUMERIC_KEY
        .replace_all(&double_quoted, |caps: &Captures<'_>| match (caps.get(1), caps.get(2)) {
            (Some(prefix), Some(key)) => format!("{}\"{}\":", prefix.as_str(), key.as_str()),
            _ => caps[0].to_owned(),
        })
        .into_owned()
}

/// Parses adjacency-list text into a snapshot.
///
/// Keys become nodes in input order. A neighbor only produces a link when it
/// is itself a key; anything else is dropped without an error. Duplicate
/// neighbors yield duplicate links.
pub fn parse_adjacency(text: &str) -> Result<GraphSnapshot, ParseError> {
    if text.trim().is_empty() {
        return Ok(GraphSnapshot::default());
    }

    let normalized = normalize(text);
    let object: Map<String, Value> = serde_json::from_str(&normalized)?;

    let mut adjacency = Vec::with_capacity(object.len());
    for (key, value) in object {
        let neighbors = Vec::<NeighborId>::deserialize(value).map_err(|error| {
            ParseError::Shape(format!("neighbors of {key} must be a list of ids: {error}"))
        })?;
        adjacency.push((key, neighbors));
    }

    let known_ids = adjacency
        .iter()
        .map(|(key, _)| key.clone())
        .collect::<HashSet<_>>();

    let nodes = adjacency
        .iter()
        .map(|(key, _)| GraphNode { id: key.clone() })
        .collect::<Vec<_>>();

    let mut links = Vec::new();
    let mut dangling = 0usize;
    for (key, neighbors) in adjacency {
        for neighbor in neighbors {
            let target = neighbor.into_id();
            if known_ids.contains(&target) {
                links.push(GraphLink {
                    source: key.clone(),
                    target,
                });
            } else {
                dangling += 1;
            }
        }
    }

    if dangling > 0 {
        log::debug!("dropped {dangling} neighbor(s) that are not declared as keys");
    }

    Ok(GraphSnapshot { nodes, links })
}
