/// Reduces selected tree nodes to vertex and primitive lists.
pub mod selection;

/// Display nodes and their labels.
pub mod tree;

use serde::Serialize;
use thiserror::Error;

use crate::core::accessor::{AccessorDescriptor, GeometrySource, PrimitiveDescriptor, Target};
use crate::core::element::{build_accessor_tree, DecodedElement};
use crate::core::paginate::Paginated;
use crate::core::shared::ConfigType;
use crate::core::topology::{build_topology, TopologyMode, TopologyResult};
use crate::core::vertex::{build_vertices, VerticesResult};
use crate::core::DecodeError;

use selection::Selection;
use tree::InspectNode;

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Err {
	#[error("Decode error: {0}")]
	DecodeError(#[from] DecodeError),
	#[error("No node at path {0:?}")]
	InvalidNodePath(Vec<usize>),
	#[error("Nothing is being inspected")]
	NoCurrentTree,
}

#[derive(Debug, Clone)]
pub struct Config {
	/// Maximum number of vertices, and separately of primitives, forwarded per selection.
	pub selection_limit: usize,
}

impl ConfigType for Config {
	fn default() -> Self {
		Self {
			selection_limit: 10,
		}
	}
}

/// The decoded data behind one inspect request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Inspection {
	Accessor {
		accessor: AccessorDescriptor,
		elements: Paginated<DecodedElement>,
	},
	Primitive {
		primitive: PrimitiveDescriptor,
		mode: TopologyMode,
		vertices: VerticesResult,
		topology: TopologyResult,
	},
}

impl Inspection {
	/// Resolves `pointer` and decodes what it refers to.
	pub fn run<S>(source: &S, pointer: &str) -> Result<Self, DecodeError>
		where S: GeometrySource + ?Sized
	{
		match source.resolve_json_pointer(pointer)? {
			Target::Accessor(accessor) => {
				let elements = build_accessor_tree(source, &accessor)?;
				Ok(Inspection::Accessor { accessor, elements })
			},
			Target::Primitive(primitive) => {
				let mode = TopologyMode::from_tag(primitive.mode.unwrap_or(TopologyMode::Triangles.tag()))?;
				let vertices = build_vertices(source, &primitive.attributes);
				let topology = build_topology(source, vertices.vertex_count, Some(mode.tag()), primitive.indices)?;
				Ok(Inspection::Primitive { primitive, mode, vertices, topology })
			},
		}
	}

	pub fn into_tree(self) -> InspectNode {
		match self {
			Inspection::Accessor { accessor, elements } => tree::accessor_tree(&accessor, elements),
			Inspection::Primitive { primitive, mode, vertices, topology } => {
				tree::primitive_tree(&primitive, mode, vertices, topology)
			},
		}
	}
}

/// An inspection session over one document. It keeps only the tree of the latest
/// request; every request rebuilds it from scratch.
pub struct Inspector<S> {
	source: S,
	cfg: Config,
	current: Option<InspectNode>,
}

impl<S> Inspector<S>
	where S: GeometrySource
{
	pub fn new(source: S, cfg: Config) -> Self {
		Self { source, cfg, current: None }
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	/// Replaces the tree with the one of `pointer`. On failure nothing is shown.
	pub fn inspect(&mut self, pointer: &str) -> Result<&InspectNode, Err> {
		self.current = None;
		let tree = Inspection::run(&self.source, pointer)?.into_tree();
		tracing::debug!(pointer, "inspecting");
		Ok(&*self.current.insert(tree))
	}

	#[inline]
	pub fn current(&self) -> Option<&InspectNode> {
		self.current.as_ref()
	}

	/// Drops the current tree, e.g. when the document was closed.
	pub fn invalidate(&mut self) {
		self.current = None;
	}

	/// Swaps in a reloaded document. The current tree no longer matches it and is dropped.
	pub fn replace_source(&mut self, source: S) {
		self.source = source;
		self.invalidate();
	}

	/// Resolves nodes of the current tree by child-position paths and reduces them to a
	/// selection.
	pub fn select(&self, paths: &[Vec<usize>]) -> Result<Selection, Err> {
		let root = self.current.as_ref().ok_or(Err::NoCurrentTree)?;
		let nodes = paths.iter()
			.map(|path| root.descend(path).ok_or_else(|| Err::InvalidNodePath(path.clone())))
			.collect::<Result<Vec<_>, _>>()?;
		Ok(Selection::from_nodes(&nodes, self.cfg.selection_limit))
	}
}
