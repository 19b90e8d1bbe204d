use serde::Serialize;

use super::accessor::GeometrySource;
use super::element::read_components;
use super::paginate::{paginate, Paginated};
use super::DecodeError;

/// glTF primitive topology. The discriminants are the glTF `mode` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TopologyMode {
	Points = 0,
	Lines = 1,
	LineLoop = 2,
	LineStrip = 3,
	Triangles = 4,
	TriangleStrip = 5,
	TriangleFan = 6,
}

impl TopologyMode {
	pub fn from_tag(tag: u32) -> Result<Self, DecodeError> {
		match tag {
			0 => Ok(TopologyMode::Points),
			1 => Ok(TopologyMode::Lines),
			2 => Ok(TopologyMode::LineLoop),
			3 => Ok(TopologyMode::LineStrip),
			4 => Ok(TopologyMode::Triangles),
			5 => Ok(TopologyMode::TriangleStrip),
			6 => Ok(TopologyMode::TriangleFan),
			_ => Err(DecodeError::UnsupportedTopologyMode(tag)),
		}
	}

	#[inline]
	pub fn tag(self) -> u32 {
		self as u32
	}

	pub fn name(self) -> &'static str {
		match self {
			TopologyMode::Points => "POINTS",
			TopologyMode::Lines => "LINES",
			TopologyMode::LineLoop => "LINE_LOOP",
			TopologyMode::LineStrip => "LINE_STRIP",
			TopologyMode::Triangles => "TRIANGLES",
			TopologyMode::TriangleStrip => "TRIANGLE_STRIP",
			TopologyMode::TriangleFan => "TRIANGLE_FAN",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Triangle {
	pub index: usize,
	pub vertices: [u32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Line {
	pub index: usize,
	pub vertices: [u32; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Point {
	pub index: usize,
	pub vertex: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "primitives", rename_all = "snake_case")]
pub enum TopologyResult {
	Triangles(Paginated<Triangle>),
	Lines(Paginated<Line>),
	Points(Paginated<Point>),
}

impl TopologyResult {
	/// Number of primitives.
	pub fn len(&self) -> usize {
		match self {
			TopologyResult::Triangles(t) => t.len(),
			TopologyResult::Lines(l) => l.len(),
			TopologyResult::Points(p) => p.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Where the vertex indices of a primitive come from: a decoded index accessor, or the
/// implicit sequence `0, 1, .., n-1` of a non-indexed primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexSource {
	Explicit(Vec<u32>),
	Implicit(usize),
}

impl IndexSource {
	/// Decodes an index accessor. `None` if the accessor or its data is unavailable.
	pub fn from_accessor<S>(source: &S, accessor: usize) -> Option<Self>
		where S: GeometrySource + ?Sized
	{
		let accessor = source.accessor(accessor)?;
		let data = source.accessor_data(&accessor)?;
		let indices = (0..accessor.count)
			.map(|i| read_components(
				&data,
				i,
				accessor.component_count(),
				accessor.component_type,
				accessor.normalized,
			))
			.collect::<Option<Vec<_>>>()?
			.into_iter()
			.flatten()
			.map(|v| v as u32)
			.collect();
		Some(IndexSource::Explicit(indices))
	}

	#[inline]
	pub fn get(&self, i: usize) -> u32 {
		match self {
			IndexSource::Explicit(indices) => indices[i],
			IndexSource::Implicit(_) => i as u32,
		}
	}

	#[inline]
	pub fn len(&self) -> usize {
		match self {
			IndexSource::Explicit(indices) => indices.len(),
			IndexSource::Implicit(n) => *n,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Expands the index sequence into the primitives of `mode`.
/// Sequences too short for a single primitive give an empty result.
pub fn reconstruct(mode: TopologyMode, indices: &IndexSource) -> TopologyResult {
	let len = indices.len();
	let get = |i: usize| indices.get(i);

	match mode {
		TopologyMode::Triangles => TopologyResult::Triangles(paginate(len / 3, |i| Triangle {
			index: i,
			vertices: [get(3 * i), get(3 * i + 1), get(3 * i + 2)],
		})),
		TopologyMode::TriangleFan => TopologyResult::Triangles(paginate(len.saturating_sub(2), |i| Triangle {
			index: i,
			vertices: [get(0), get(i + 1), get(i + 2)],
		})),
		TopologyMode::TriangleStrip => TopologyResult::Triangles(paginate(len.saturating_sub(2), |i| {
			// every other triangle is flipped to keep a consistent winding
			let vertices = if i % 2 == 0 {
				[get(i), get(i + 1), get(i + 2)]
			} else {
				[get(i + 2), get(i + 1), get(i)]
			};
			Triangle { index: i, vertices }
		})),
		TopologyMode::Lines => TopologyResult::Lines(paginate(len / 2, |i| Line {
			index: i,
			vertices: [get(2 * i), get(2 * i + 1)],
		})),
		TopologyMode::LineStrip => TopologyResult::Lines(paginate(len.saturating_sub(1), |i| Line {
			index: i,
			vertices: [get(i), get(i + 1)],
		})),
		TopologyMode::LineLoop => {
			let count = if len < 2 { 0 } else { len };
			TopologyResult::Lines(paginate(count, |i| Line {
				index: i,
				vertices: [get(i), get((i + 1) % len)],
			}))
		},
		TopologyMode::Points => TopologyResult::Points(paginate(len, |i| Point {
			index: i,
			vertex: get(i),
		})),
	}
}

/// Rebuilds the primitives of a mesh primitive with `vertex_count` vertices.
///
/// `mode` is the raw glTF mode tag and defaults to triangles. An index accessor that
/// cannot be read is treated like an absent one.
pub fn build_topology<S>(
	source: &S,
	vertex_count: usize,
	mode: Option<u32>,
	indices: Option<usize>,
) -> Result<TopologyResult, DecodeError>
	where S: GeometrySource + ?Sized
{
	let mode = TopologyMode::from_tag(mode.unwrap_or(TopologyMode::Triangles.tag()))?;

	let indices = match indices.map(|idx| (idx, IndexSource::from_accessor(source, idx))) {
		Some((_, Some(explicit))) => explicit,
		Some((idx, None)) => {
			tracing::warn!(accessor = idx, "index accessor is unreadable, using implicit indices");
			IndexSource::Implicit(vertex_count)
		},
		None => IndexSource::Implicit(vertex_count),
	};

	if let IndexSource::Explicit(explicit) = &indices {
		let out_of_range = explicit.iter().filter(|&&v| v as usize >= vertex_count).count();
		if out_of_range > 0 {
			tracing::warn!(out_of_range, vertex_count, "indices reference missing vertices");
		}
	}

	let out = reconstruct(mode, &indices);
	tracing::debug!(mode = mode.name(), primitives = out.len(), "reconstructed topology");
	Ok(out)
}
