use std::borrow::Cow;

use enum_dispatch::enum_dispatch;

use crate::core::accessor::{AccessorDescriptor, PrimitiveDescriptor};
use crate::core::element::DecodedElement;
use crate::core::paginate::Paginated;
use crate::core::shared::{format_component, format_components};
use crate::core::topology::{Line, Point, TopologyMode, TopologyResult, Triangle};
use crate::core::vertex::{AttributeValue, VertexRecord, VerticesResult};

/// Something that can be shown as one row of the inspection tree.
#[enum_dispatch]
pub trait TreeItem {
	fn label(&self) -> String;

	/// Secondary text shown next to the label.
	fn description(&self) -> Option<String> {
		None
	}

	fn children(&self) -> Cow<'_, [InspectNode]> {
		Cow::Borrowed(&[])
	}
}

/// A node of the inspection tree.
#[enum_dispatch(TreeItem)]
#[derive(Clone, Debug, PartialEq)]
pub enum InspectNode {
	Header(Header),
	PageGroup(PageGroup),
	ScalarElement(ScalarElement),
	VectorElement(VectorElement),
	MatrixElement(MatrixElement),
	MatrixRow(MatrixRow),
	VertexGroup(VertexGroup),
	VertexRecord(VertexRecord),
	VertexAttribute(VertexAttribute),
	TriangleGroup(TriangleGroup),
	Triangle(Triangle),
	LineGroup(LineGroup),
	Line(Line),
	PointGroup(PointGroup),
	Point(Point),
}

impl InspectNode {
	/// Follows child positions from this node. An empty path is the node itself.
	pub fn descend(&self, path: &[usize]) -> Option<InspectNode> {
		match path.split_first() {
			None => Some(self.clone()),
			Some((&first, rest)) => self.children().get(first)?.descend(rest),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Header {
	pub title: String,
	pub children: Vec<InspectNode>,
}

impl TreeItem for Header {
	fn label(&self) -> String {
		self.title.clone()
	}

	fn children(&self) -> Cow<'_, [InspectNode]> {
		Cow::Borrowed(&self.children)
	}
}

/// Items `start..=end` of a paged list.
#[derive(Clone, Debug, PartialEq)]
pub struct PageGroup {
	pub start: usize,
	pub end: usize,
	pub children: Vec<InspectNode>,
}

impl TreeItem for PageGroup {
	fn label(&self) -> String {
		format!("[{}..{}]", self.start, self.end)
	}

	fn children(&self) -> Cow<'_, [InspectNode]> {
		Cow::Borrowed(&self.children)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarElement {
	pub index: usize,
	pub value: f64,
	pub is_float: bool,
}

impl TreeItem for ScalarElement {
	fn label(&self) -> String {
		format_component(self.value, self.is_float)
	}

	fn description(&self) -> Option<String> {
		Some(format!("[{}]", self.index))
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct VectorElement {
	pub index: usize,
	pub values: Vec<f64>,
	pub is_float: bool,
}

impl TreeItem for VectorElement {
	fn label(&self) -> String {
		format_components(&self.values, self.is_float)
	}

	fn description(&self) -> Option<String> {
		Some(format!("[{}]", self.index))
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatrixElement {
	pub index: usize,
	pub rows: Vec<Vec<f64>>,
	pub is_float: bool,
}

impl TreeItem for MatrixElement {
	fn label(&self) -> String {
		format!("[{}]", self.index)
	}

	fn description(&self) -> Option<String> {
		Some(format!("{}x{}", self.rows.len(), self.rows.len()))
	}

	fn children(&self) -> Cow<'_, [InspectNode]> {
		self.rows.iter()
			.enumerate()
			.map(|(row, values)| InspectNode::from(MatrixRow { row, values: values.clone(), is_float: self.is_float }))
			.collect::<Vec<_>>()
			.into()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatrixRow {
	pub row: usize,
	pub values: Vec<f64>,
	pub is_float: bool,
}

impl TreeItem for MatrixRow {
	fn label(&self) -> String {
		format_components(&self.values, self.is_float)
	}

	fn description(&self) -> Option<String> {
		Some(format!("row {}", self.row))
	}
}

impl TreeItem for VertexRecord {
	fn label(&self) -> String {
		format!("Vertex {}", self.index)
	}

	fn children(&self) -> Cow<'_, [InspectNode]> {
		self.attributes.iter()
			.map(|(name, value)| InspectNode::from(VertexAttribute { name: name.clone(), value: value.clone() }))
			.collect::<Vec<_>>()
			.into()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct VertexAttribute {
	pub name: String,
	pub value: AttributeValue,
}

impl TreeItem for VertexAttribute {
	fn label(&self) -> String {
		self.name.clone()
	}

	fn description(&self) -> Option<String> {
		Some(format_components(&self.value.values, self.value.is_float))
	}
}

impl TreeItem for Triangle {
	fn label(&self) -> String {
		format!("Triangle {}", self.index)
	}

	fn description(&self) -> Option<String> {
		let [a, b, c] = self.vertices;
		Some(format!("{}, {}, {}", a, b, c))
	}
}

impl TreeItem for Line {
	fn label(&self) -> String {
		format!("Line {}", self.index)
	}

	fn description(&self) -> Option<String> {
		let [a, b] = self.vertices;
		Some(format!("{}, {}", a, b))
	}
}

impl TreeItem for Point {
	fn label(&self) -> String {
		format!("Point {}", self.index)
	}

	fn description(&self) -> Option<String> {
		Some(self.vertex.to_string())
	}
}

macro_rules! group_node {
	($($name:ident => $title:literal),*) => {
		$(
			/// Groups the items of one list together with their total count.
			#[derive(Clone, Debug, PartialEq)]
			pub struct $name {
				pub count: usize,
				pub children: Vec<InspectNode>,
			}

			impl TreeItem for $name {
				fn label(&self) -> String {
					format!("{} ({})", $title, self.count)
				}

				fn children(&self) -> Cow<'_, [InspectNode]> {
					Cow::Borrowed(&self.children)
				}
			}
		)*
	};
}

group_node! {
	VertexGroup => "Vertices",
	TriangleGroup => "Triangles",
	LineGroup => "Lines",
	PointGroup => "Points"
}

impl From<DecodedElement> for InspectNode {
	fn from(element: DecodedElement) -> Self {
		match element {
			DecodedElement::Scalar { index, value, is_float } => ScalarElement { index, value, is_float }.into(),
			DecodedElement::Vector { index, values, is_float } => VectorElement { index, values, is_float }.into(),
			DecodedElement::Matrix { index, rows, is_float } => MatrixElement {
				index,
				rows: rows.into_iter().map(|r| r.values).collect(),
				is_float,
			}.into(),
		}
	}
}

/// Flattens a paginated list into tree nodes: flat lists are kept as is, pages
/// become [`PageGroup`] nodes.
pub fn page_nodes<T>(items: Paginated<T>) -> Vec<InspectNode>
	where T: Into<InspectNode>
{
	match items.map(Into::<InspectNode>::into) {
		Paginated::Flat(nodes) => nodes,
		Paginated::Paged(pages) => pages.into_iter()
			.map(|p| PageGroup { start: p.start, end: p.end, children: p.items }.into())
			.collect(),
	}
}

/// Tree shown for an accessor: a header over its (paged) elements.
pub fn accessor_tree(accessor: &AccessorDescriptor, elements: Paginated<DecodedElement>) -> InspectNode {
	let title = format!(
		"Accessor {} ({} {}{}, {} elements)",
		accessor.index,
		accessor.element_type.tag(),
		accessor.component_type.name(),
		if accessor.normalized { " normalized" } else { "" },
		accessor.count,
	);
	Header { title, children: page_nodes(elements) }.into()
}

/// Tree shown for a mesh primitive: a header over its vertices and its primitives.
pub fn primitive_tree(primitive: &PrimitiveDescriptor, mode: TopologyMode, vertices: VerticesResult, topology: TopologyResult) -> InspectNode {
	let vertex_group = VertexGroup {
		count: vertices.vertex_count,
		children: page_nodes(vertices.nodes),
	};
	let count = topology.len();
	let topology_group: InspectNode = match topology {
		TopologyResult::Triangles(t) => TriangleGroup { count, children: page_nodes(t) }.into(),
		TopologyResult::Lines(l) => LineGroup { count, children: page_nodes(l) }.into(),
		TopologyResult::Points(p) => PointGroup { count, children: page_nodes(p) }.into(),
	};
	let title = format!("Mesh {} primitive {} ({})", primitive.mesh, primitive.primitive, mode.name());
	Header { title, children: vec![vertex_group.into(), topology_group] }.into()
}
