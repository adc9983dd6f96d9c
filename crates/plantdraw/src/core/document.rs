//! Primitive diagram document
//!
//! The emission target of every plugin: a flat list of positioned shapes and
//! edges with draw.io style strings, plus the serializers that turn it into
//! an `mxfile` XML document or JSON.

use std::collections::HashMap;
use std::fmt::Write as _;

use anyhow::Result;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use super::text::{escape_html, escape_xml_attr, resolve_line_breaks};
use super::Bounds;

/// Style prefix shared by all relation edges
const EDGE_BASE_STYLE: &str = "edgeStyle=orthogonalEdgeStyle;rounded=0;html=1;";

/// Shape of a primitive node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Rhombus,
    Actor,
    Container,
}

impl ShapeKind {
    /// Style tokens draw.io needs to draw this shape
    pub fn base_style(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle | ShapeKind::Container => "",
            ShapeKind::Ellipse => "ellipse;",
            ShapeKind::Rhombus => "rhombus;",
            ShapeKind::Actor => "shape=umlActor;verticalLabelPosition=bottom;verticalAlign=top;",
        }
    }
}

/// A positioned vertex
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveNode {
    pub id: String,
    pub shape: ShapeKind,
    #[serde(flatten)]
    pub bounds: Bounds,
    pub style: String,
    #[serde(serialize_with = "serialize_label")]
    pub label: String,
}

/// One end of an edge: a node or a fixed point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeEnd {
    Node(String),
    Point { x: f64, y: f64 },
}

impl EdgeEnd {
    pub fn point(x: f64, y: f64) -> Self {
        EdgeEnd::Point { x, y }
    }

    /// The referenced node id, if this end is attached to a node
    pub fn node_id(&self) -> Option<&str> {
        match self {
            EdgeEnd::Node(id) => Some(id),
            EdgeEnd::Point { .. } => None,
        }
    }
}

/// A connection between two ends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveEdge {
    pub id: String,
    pub source: EdgeEnd,
    pub target: EdgeEnd,
    pub style: String,
    #[serde(serialize_with = "serialize_label")]
    pub label: String,
}

fn serialize_label<S: Serializer>(label: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&resolve_line_breaks(label, "\n"))
}

/// A finished diagram: root container plus flat node and edge lists
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub name: String,
    pub nodes: Vec<PrimitiveNode>,
    pub edges: Vec<PrimitiveEdge>,
}

impl Document {
    /// Find a node by cell id
    pub fn node(&self, id: &str) -> Option<&PrimitiveNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find the first node with the given label
    pub fn node_by_label(&self, label: &str) -> Option<&PrimitiveNode> {
        self.nodes.iter().find(|n| n.label == label)
    }

    /// Edges whose target is the given node
    pub fn edges_into(&self, id: &str) -> impl Iterator<Item = &PrimitiveEdge> {
        let id = id.to_string();
        self.edges
            .iter()
            .filter(move |e| e.target.node_id() == Some(id.as_str()))
    }

    /// Edges whose source is the given node
    pub fn edges_from(&self, id: &str) -> impl Iterator<Item = &PrimitiveEdge> {
        let id = id.to_string();
        self.edges
            .iter()
            .filter(move |e| e.source.node_id() == Some(id.as_str()))
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize as a draw.io `mxfile` document
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<mxfile host=\"plantdraw\" agent=\"plantdraw {}\" type=\"device\">",
            env!("CARGO_PKG_VERSION")
        );
        let _ = writeln!(
            out,
            "  <diagram name=\"{}\" id=\"diagram1\">",
            escape_xml_attr(&self.name)
        );
        out.push_str(
            "    <mxGraphModel dx=\"1422\" dy=\"794\" grid=\"1\" gridSize=\"10\" guides=\"1\" \
             tooltips=\"1\" connect=\"1\" arrows=\"1\" fold=\"1\" page=\"1\" pageScale=\"1\" \
             pageWidth=\"827\" pageHeight=\"1169\" math=\"0\" shadow=\"0\">\n",
        );
        out.push_str("      <root>\n");
        out.push_str("        <mxCell id=\"0\" />\n");
        out.push_str("        <mxCell id=\"1\" parent=\"0\" />\n");

        for node in &self.nodes {
            let _ = writeln!(
                out,
                "        <mxCell id=\"{}\" value=\"{}\" style=\"{}\" vertex=\"1\" parent=\"1\">",
                node.id,
                label_attr(&node.label),
                escape_xml_attr(&node.style)
            );
            let _ = writeln!(
                out,
                "          <mxGeometry x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" as=\"geometry\" />",
                fmt_num(node.bounds.x),
                fmt_num(node.bounds.y),
                fmt_num(node.bounds.width),
                fmt_num(node.bounds.height)
            );
            out.push_str("        </mxCell>\n");
        }

        for edge in &self.edges {
            let _ = write!(
                out,
                "        <mxCell id=\"{}\" value=\"{}\" style=\"{}\" edge=\"1\" parent=\"1\"",
                edge.id,
                label_attr(&edge.label),
                escape_xml_attr(&edge.style)
            );
            if let Some(source) = edge.source.node_id() {
                let _ = write!(out, " source=\"{}\"", source);
            }
            if let Some(target) = edge.target.node_id() {
                let _ = write!(out, " target=\"{}\"", target);
            }
            out.push_str(">\n");

            let points: Vec<(&str, f64, f64)> = [("sourcePoint", &edge.source), ("targetPoint", &edge.target)]
                .into_iter()
                .filter_map(|(role, end)| match end {
                    EdgeEnd::Point { x, y } => Some((role, *x, *y)),
                    EdgeEnd::Node(_) => None,
                })
                .collect();

            if points.is_empty() {
                out.push_str("          <mxGeometry relative=\"1\" as=\"geometry\" />\n");
            } else {
                out.push_str("          <mxGeometry relative=\"1\" as=\"geometry\">\n");
                for (role, x, y) in points {
                    let _ = writeln!(
                        out,
                        "            <mxPoint x=\"{}\" y=\"{}\" as=\"{}\" />",
                        fmt_num(x),
                        fmt_num(y),
                        role
                    );
                }
                out.push_str("          </mxGeometry>\n");
            }
            out.push_str("        </mxCell>\n");
        }

        out.push_str("      </root>\n");
        out.push_str("    </mxGraphModel>\n");
        out.push_str("  </diagram>\n");
        out.push_str("</mxfile>\n");
        out
    }
}

/// Labels are HTML (`html=1`), so markup is escaped before the placeholder
/// becomes `<br>`, then the whole value is escaped for the attribute.
fn label_attr(label: &str) -> String {
    escape_xml_attr(&resolve_line_breaks(&escape_html(label), "<br>"))
}

fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Incrementally builds a [`Document`], handing out cell ids.
///
/// Ids are `elem_N` for vertices and `arrow_N` for edges, drawn from one
/// counter that starts at 2 (cells 0 and 1 are the root and default layer).
pub struct DocumentBuilder {
    name: String,
    next_id: usize,
    nodes: Vec<PrimitiveNode>,
    edges: Vec<PrimitiveEdge>,
    /// model identifier -> cell id
    cells: HashMap<String, String>,
}

impl DocumentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            next_id: 2,
            nodes: Vec::new(),
            edges: Vec::new(),
            cells: HashMap::new(),
        }
    }

    fn next(&mut self, prefix: &str) -> String {
        let id = format!("{}_{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a vertex and return its cell id
    pub fn add_node(
        &mut self,
        shape: ShapeKind,
        label: impl Into<String>,
        bounds: Bounds,
        style: &str,
    ) -> String {
        let id = self.next("elem");
        let mut full_style = String::from(shape.base_style());
        if !style.contains("whiteSpace=") {
            full_style.push_str("whiteSpace=wrap;");
        }
        full_style.push_str("html=1;");
        full_style.push_str(style);

        trace!(id = %id, shape = ?shape, "Emitting node");
        self.nodes.push(PrimitiveNode {
            id: id.clone(),
            shape,
            bounds,
            style: full_style,
            label: label.into(),
        });
        id
    }

    /// Add a vertex and remember it under a model identifier.
    ///
    /// The first registration of an identifier wins.
    pub fn add_entity(
        &mut self,
        model_id: &str,
        shape: ShapeKind,
        label: impl Into<String>,
        bounds: Bounds,
        style: &str,
    ) -> String {
        let id = self.add_node(shape, label, bounds, style);
        self.cells
            .entry(model_id.to_string())
            .or_insert_with(|| id.clone());
        id
    }

    /// Cell id of a registered model identifier
    pub fn cell(&self, model_id: &str) -> Option<&str> {
        self.cells.get(model_id).map(String::as_str)
    }

    /// Add a relation edge between two model identifiers.
    ///
    /// Returns `None` without adding anything when either end was never
    /// registered.
    pub fn connect(
        &mut self,
        from: &str,
        to: &str,
        label: impl Into<String>,
        style: &str,
    ) -> Option<String> {
        let (Some(source), Some(target)) = (self.cell(from), self.cell(to)) else {
            debug!(from, to, "Dropping relation with unresolved endpoint");
            return None;
        };
        let (source, target) = (source.to_string(), target.to_string());
        Some(self.add_edge(
            EdgeEnd::Node(source),
            EdgeEnd::Node(target),
            label,
            style,
        ))
    }

    /// Add an edge with the shared relation style prefix
    pub fn add_edge(
        &mut self,
        source: EdgeEnd,
        target: EdgeEnd,
        label: impl Into<String>,
        style: &str,
    ) -> String {
        let full_style = format!("{}{}", EDGE_BASE_STYLE, style);
        self.push_edge(source, target, label.into(), full_style)
    }

    /// Add an edge whose style is used verbatim
    pub fn add_plain_edge(
        &mut self,
        source: EdgeEnd,
        target: EdgeEnd,
        label: impl Into<String>,
        style: &str,
    ) -> String {
        self.push_edge(source, target, label.into(), style.to_string())
    }

    fn push_edge(&mut self, source: EdgeEnd, target: EdgeEnd, label: String, style: String) -> String {
        let id = self.next("arrow");
        trace!(id = %id, "Emitting edge");
        self.edges.push(PrimitiveEdge {
            id: id.clone(),
            source,
            target,
            style,
            label,
        });
        id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn finish(self) -> Document {
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "Document assembled"
        );
        Document {
            name: self.name,
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::text::LINE_BREAK;

    fn sample() -> Document {
        let mut builder = DocumentBuilder::new("Test");
        builder.add_entity("a", ShapeKind::Rectangle, "A", Bounds::new(0.0, 0.0, 120.0, 60.0), "");
        builder.add_entity("b", ShapeKind::Ellipse, "B", Bounds::new(0.0, 100.0, 30.0, 30.0), "");
        builder.connect("a", "b", "go", "endArrow=block;");
        builder.finish()
    }

    #[test]
    fn test_ids_start_at_two_and_share_counter() {
        let doc = sample();
        assert_eq!(doc.nodes[0].id, "elem_2");
        assert_eq!(doc.nodes[1].id, "elem_3");
        assert_eq!(doc.edges[0].id, "arrow_4");
    }

    #[test]
    fn test_shape_base_style_is_prepended() {
        let doc = sample();
        assert!(doc.nodes[1].style.starts_with("ellipse;"));
        assert!(doc.nodes[0].style.contains("html=1;"));
        assert!(doc.edges[0].style.starts_with("edgeStyle=orthogonalEdgeStyle;"));
    }

    #[test]
    fn test_connect_drops_dangling_reference() {
        let mut builder = DocumentBuilder::new("Test");
        builder.add_entity("a", ShapeKind::Rectangle, "A", Bounds::default(), "");
        assert!(builder.connect("a", "missing", "", "").is_none());
        assert!(builder.connect("missing", "a", "", "").is_none());
        assert!(builder.finish().edges.is_empty());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut builder = DocumentBuilder::new("Test");
        let first = builder.add_entity("a", ShapeKind::Rectangle, "A", Bounds::default(), "");
        builder.add_entity("a", ShapeKind::Rectangle, "A again", Bounds::default(), "");
        assert_eq!(builder.cell("a"), Some(first.as_str()));
    }

    #[test]
    fn test_xml_structure() {
        let xml = sample().to_xml();
        assert!(xml.starts_with("<mxfile"));
        assert!(xml.contains("<diagram name=\"Test\" id=\"diagram1\">"));
        assert!(xml.contains("<mxCell id=\"0\" />"));
        assert!(xml.contains("<mxCell id=\"1\" parent=\"0\" />"));
        assert!(xml.contains("id=\"elem_2\" value=\"A\""));
        assert!(xml.contains("source=\"elem_2\" target=\"elem_3\""));
        assert!(xml.contains("width=\"120\" height=\"60\""));
        assert!(xml.trim_end().ends_with("</mxfile>"));
    }

    #[test]
    fn test_xml_point_edges() {
        let mut builder = DocumentBuilder::new("Points");
        builder.add_edge(EdgeEnd::point(10.0, 20.5), EdgeEnd::point(30.0, 20.5), "msg", "");
        let xml = builder.finish().to_xml();
        assert!(xml.contains("<mxPoint x=\"10\" y=\"20.5\" as=\"sourcePoint\" />"));
        assert!(xml.contains("<mxPoint x=\"30\" y=\"20.5\" as=\"targetPoint\" />"));
        assert!(!xml.contains("source=\""));
    }

    #[test]
    fn test_xml_label_escaping() {
        let mut builder = DocumentBuilder::new("Esc");
        let label = format!("<<include>>{}next", LINE_BREAK);
        builder.add_node(ShapeKind::Rectangle, label, Bounds::default(), "");
        let xml = builder.finish().to_xml();
        assert!(xml.contains("value=\"&amp;lt;&amp;lt;include&amp;gt;&amp;gt;&lt;br&gt;next\""));
    }

    #[test]
    fn test_json_resolves_line_breaks() {
        let mut builder = DocumentBuilder::new("Json");
        builder.add_node(ShapeKind::Rectangle, format!("a{}b", LINE_BREAK), Bounds::default(), "");
        let json = builder.finish().to_json().unwrap();
        assert!(json.contains("\"label\": \"a\\nb\""));
        assert!(json.contains("\"shape\": \"rectangle\""));
    }
}
