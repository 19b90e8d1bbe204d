use super::tree::InspectNode;

/// What a set of selected tree nodes means in terms of geometry: the vertices and the
/// primitives (as vertex index tuples) to highlight in a viewport.
/// Both lists are capped independently; the number of dropped entries is kept so a
/// notice can be shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
	pub vertices: Vec<u32>,
	pub primitives: Vec<Vec<u32>>,
	pub dropped_vertices: usize,
	pub dropped_primitives: usize,
}

impl Selection {
	pub fn from_nodes<'a, I>(nodes: I, limit: usize) -> Self
		where I: IntoIterator<Item = &'a InspectNode>
	{
		let mut out = Selection::default();
		for node in nodes {
			match node {
				InspectNode::VertexRecord(v) => out.push_vertex(v.index as u32, limit),
				InspectNode::Triangle(t) => out.push_primitive(t.vertices.to_vec(), limit),
				InspectNode::Line(l) => out.push_primitive(l.vertices.to_vec(), limit),
				InspectNode::Point(p) => out.push_primitive(vec![p.vertex], limit),
				InspectNode::Header(_)
				| InspectNode::PageGroup(_)
				| InspectNode::ScalarElement(_)
				| InspectNode::VectorElement(_)
				| InspectNode::MatrixElement(_)
				| InspectNode::MatrixRow(_)
				| InspectNode::VertexGroup(_)
				| InspectNode::VertexAttribute(_)
				| InspectNode::TriangleGroup(_)
				| InspectNode::LineGroup(_)
				| InspectNode::PointGroup(_) => {},
			}
		}
		out
	}

	fn push_vertex(&mut self, vertex: u32, limit: usize) {
		if self.vertices.len() < limit {
			self.vertices.push(vertex);
		} else {
			self.dropped_vertices += 1;
		}
	}

	fn push_primitive(&mut self, primitive: Vec<u32>, limit: usize) {
		if self.primitives.len() < limit {
			self.primitives.push(primitive);
		} else {
			self.dropped_primitives += 1;
		}
	}

	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty() && self.primitives.is_empty()
	}

	/// Over-limit notices, one per capped list.
	pub fn notices(&self) -> Vec<String> {
		let mut out = Vec::new();
		if self.dropped_vertices > 0 {
			out.push(format!(
				"Showing the first {} selected vertices, {} more not shown",
				self.vertices.len(),
				self.dropped_vertices
			));
		}
		if self.dropped_primitives > 0 {
			out.push(format!(
				"Showing the first {} selected primitives, {} more not shown",
				self.primitives.len(),
				self.dropped_primitives
			));
		}
		out
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::topology::{Line, Point, Triangle};
	use crate::core::vertex::VertexRecord;
	use crate::inspect::tree::ScalarElement;
	use indexmap::IndexMap;
	use pretty_assertions::assert_eq;

	fn vertex(index: usize) -> InspectNode {
		VertexRecord { index, attributes: IndexMap::new() }.into()
	}

	#[test]
	fn collects_vertices_and_primitives() {
		let nodes = vec![
			vertex(4),
			Triangle { index: 0, vertices: [0, 1, 2] }.into(),
			Line { index: 3, vertices: [7, 8] }.into(),
			Point { index: 1, vertex: 9 }.into(),
			ScalarElement { index: 0, value: 1.0, is_float: false }.into(),
		];
		let selection = Selection::from_nodes(&nodes, 10);
		assert_eq!(selection.vertices, vec![4]);
		assert_eq!(selection.primitives, vec![vec![0, 1, 2], vec![7, 8], vec![9]]);
		assert!(selection.notices().is_empty());
	}

	#[test]
	fn lists_are_capped_independently() {
		let mut nodes = (0..13).map(vertex).collect::<Vec<_>>();
		nodes.extend((0..4).map(|i| InspectNode::from(Point { index: i, vertex: i as u32 })));

		let selection = Selection::from_nodes(&nodes, 10);
		assert_eq!(selection.vertices, (0..10).collect::<Vec<u32>>());
		assert_eq!(selection.dropped_vertices, 3);
		assert_eq!(selection.primitives.len(), 4);
		assert_eq!(selection.dropped_primitives, 0);
		assert_eq!(
			selection.notices(),
			vec!["Showing the first 10 selected vertices, 3 more not shown".to_string()]
		);
	}

	#[test]
	fn nothing_selected() {
		let selection = Selection::from_nodes(std::iter::empty(), 10);
		assert!(selection.is_empty());
	}
}
