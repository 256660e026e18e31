//! Conversion service
//!
//! Reads node records as JSON, runs the build/flatten conversions with the
//! configured options and serializes the result.

use std::cmp::Ordering;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt, JsonResultExt};
use crate::config::Settings;
use crate::domain::{self, HierarchyNode, Node, TreeBuilder};

/// Where node records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// `-` selects stdin, anything else is a file path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            Input::Stdin
        } else {
            Input::File(arg.to_path_buf())
        }
    }

    pub fn read_to_string(&self) -> ApplicationResult<String> {
        match self {
            Input::Stdin => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .with_context("read input", self)?;
                Ok(content)
            }
            Input::File(path) => std::fs::read_to_string(path).with_context("read input", self),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => write!(f, "<stdin>"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Shape statistics of a forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub nodes: usize,
    pub roots: usize,
    pub depth: usize,
    pub leaves: Vec<String>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} nodes, {} roots, depth {}",
            self.nodes, self.roots, self.depth
        )?;
        write!(f, "leaves: {}", self.leaves.iter().join(", "))
    }
}

/// Service running the conversions with settings applied.
pub struct ConversionService {
    settings: Settings,
}

impl ConversionService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Parse a JSON array of nodes (flat or nested).
    ///
    /// Nodes with a path but no delimiter get the configured default delimiter.
    #[instrument(level = "debug", skip(self, content))]
    pub fn parse_nodes(&self, content: &str, source: &Input) -> ApplicationResult<Vec<Node>> {
        let mut nodes: Vec<Node> = serde_json::from_str(content).json_context(source)?;
        apply_default_delimiter(&mut nodes, &self.settings.delimiter);
        debug!("parsed {} top-level nodes from {}", nodes.len(), source);
        Ok(nodes)
    }

    pub fn read_nodes(&self, source: &Input) -> ApplicationResult<Vec<Node>> {
        let content = source.read_to_string()?;
        self.parse_nodes(&content, source)
    }

    /// Build a forest from a flat list.
    ///
    /// `sort_key` and `relevel` override the configured values when given.
    #[instrument(level = "debug", skip(self, nodes), fields(nodes = nodes.len()))]
    pub fn build(
        &self,
        nodes: Vec<Node>,
        sort_key: Option<&str>,
        relevel: Option<bool>,
    ) -> ApplicationResult<Vec<Node>> {
        let sort_key = sort_key.or(self.settings.sort_key.as_deref());
        let mut builder =
            TreeBuilder::new().relevel(relevel.unwrap_or(self.settings.relevel));
        if let Some(key) = sort_key {
            debug!("sorting siblings by {key}");
            builder = builder.sort_by(compare_by_key(key));
        }
        Ok(builder.build(nodes)?)
    }

    pub fn flatten(&self, roots: Vec<Node>) -> Vec<Node> {
        domain::flatten(roots)
    }

    pub fn summary(&self, roots: &[Node]) -> Summary {
        Summary {
            nodes: domain::count(roots),
            roots: roots.len(),
            depth: domain::depth(roots),
            leaves: domain::leaf_ids(roots),
        }
    }

    pub fn to_json(&self, nodes: &[Node]) -> ApplicationResult<String> {
        let json = if self.settings.pretty {
            serde_json::to_string_pretty(nodes)
        } else {
            serde_json::to_string(nodes)
        };
        json.json_context(&"output")
    }
}

/// Comparator ordering nodes by `id` or by an attribute value.
///
/// Numbers compare numerically, strings lexicographically; nodes missing the
/// attribute sort last. Values of different kinds order as
/// bool < number < string < anything else.
pub fn compare_by_key(key: &str) -> impl Fn(&Node, &Node) -> Ordering + '_ {
    move |a: &Node, b: &Node| {
        if key == "id" {
            return a.id().cmp(b.id());
        }
        compare_values(a.attribute(key), b.attribute(key))
    }
}

/// Display label of a node: the `key` attribute if present, else the id.
///
/// String attributes are used verbatim, other values as their JSON text.
pub fn node_label(node: &Node, key: Option<&str>) -> String {
    key.and_then(|key| node.attribute(key))
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| node.id().to_string())
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => {
                let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (Value::String(x), Value::String(y)) => x.cmp(y),
            _ => kind_rank(a).cmp(&kind_rank(b)),
        },
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        _ => 3,
    }
}

fn apply_default_delimiter(nodes: &mut [Node], delimiter: &str) {
    let mut pending: Vec<&mut Node> = nodes.iter_mut().collect();
    while let Some(node) = pending.pop() {
        node.default_delimiter(delimiter);
        if let Some(children) = node.children_mut() {
            pending.extend(children.iter_mut());
        }
    }
}
