use indexmap::IndexMap;
use serde::Serialize;

use super::accessor::{AccessorDescriptor, GeometrySource};
use super::element::read_components;
use super::paginate::{paginate, Paginated};

/// The attribute whose accessor decides how many vertices a primitive has.
pub const POSITION: &str = "POSITION";

/// The value of one attribute of one vertex.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttributeValue {
	pub values: Vec<f64>,
	pub is_float: bool,
}

/// All attribute values of a vertex, decoded at the same index, in attribute order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VertexRecord {
	pub index: usize,
	pub attributes: IndexMap<String, AttributeValue>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VerticesResult {
	pub vertex_count: usize,
	pub nodes: Paginated<VertexRecord>,
}

struct ResolvedAttribute<'a> {
	name: &'a str,
	accessor: AccessorDescriptor,
	data: Vec<f64>,
}

/// Zips the attribute accessors of a primitive into vertex records.
///
/// The vertex count comes from the `POSITION` accessor, and is zero without one or
/// when its data cannot be read. Attributes whose accessor or data cannot be read are
/// left out of every record.
pub fn build_vertices<S>(source: &S, attributes: &IndexMap<String, usize>) -> VerticesResult
	where S: GeometrySource + ?Sized
{
	let declared = attributes.get(POSITION)
		.and_then(|&idx| source.accessor(idx))
		.map_or(0, |acc| acc.count);

	let resolved = attributes.iter()
		.filter_map(|(name, &idx)| {
			let resolved = source.accessor(idx).and_then(|accessor| {
				let needed = declared.checked_mul(accessor.component_count())?;
				source.accessor_data(&accessor)
					.filter(|data| data.len() >= needed)
					.map(|data| ResolvedAttribute { name, accessor, data })
			});
			if resolved.is_none() {
				tracing::debug!(attribute = %name, accessor = idx, "skipping unreadable attribute");
			}
			resolved
		})
		.collect::<Vec<_>>();

	// the count is only trusted once the positions behind it were read
	let vertex_count = if resolved.iter().any(|att| att.name == POSITION) { declared } else { 0 };

	let nodes = paginate(vertex_count, |index| {
		let attributes = resolved.iter()
			.filter_map(|att| {
				let values = read_components(
					&att.data,
					index,
					att.accessor.component_count(),
					att.accessor.component_type,
					att.accessor.normalized,
				)?;
				Some((att.name.to_owned(), AttributeValue { values, is_float: att.accessor.is_float() }))
			})
			.collect();
		VertexRecord { index, attributes }
	});

	VerticesResult { vertex_count, nodes }
}


#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::accessor::{ComponentType, ElementType};
	use crate::core::testing::MemorySource;
	use pretty_assertions::assert_eq;

	fn vec3(index: usize, count: usize) -> AccessorDescriptor {
		AccessorDescriptor {
			index,
			component_type: ComponentType::F32,
			element_type: ElementType::Vec3,
			count,
			normalized: false,
		}
	}

	fn attributes(pairs: &[(&str, usize)]) -> IndexMap<String, usize> {
		pairs.iter().map(|&(name, idx)| (name.to_string(), idx)).collect()
	}

	#[test]
	fn unreadable_attributes_are_omitted() {
		let mut source = MemorySource::new();
		source.add(vec3(0, 3), Some((0..9).map(f64::from).collect()));
		source.add(vec3(1, 3), Some(vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]));
		source.add(AccessorDescriptor { element_type: ElementType::Vec4, ..vec3(2, 3) }, None);

		let out = build_vertices(&source, &attributes(&[("POSITION", 0), ("NORMAL", 1), ("COLOR_0", 2)]));
		assert_eq!(out.vertex_count, 3);
		let Paginated::Flat(records) = &out.nodes else { panic!("expected a flat list") };
		assert_eq!(records.len(), 3);
		for record in records {
			assert_eq!(record.attributes.keys().collect::<Vec<_>>(), vec!["POSITION", "NORMAL"]);
		}
		assert_eq!(records[1].index, 1);
		assert_eq!(records[1].attributes["POSITION"].values, vec![3.0, 4.0, 5.0]);
		assert_eq!(records[1].attributes["NORMAL"].values, vec![0.0, 1.0, 0.0]);
	}

	#[test]
	fn missing_position_gives_no_vertices() {
		let mut source = MemorySource::new();
		source.add(vec3(1, 3), Some(vec![0.0; 9]));
		let out = build_vertices(&source, &attributes(&[("NORMAL", 1)]));
		assert_eq!(out.vertex_count, 0);
		assert!(out.nodes.is_empty());
	}

	#[test]
	fn unknown_accessor_and_short_data_are_skipped() {
		let mut source = MemorySource::new();
		source.add(vec3(0, 2), Some(vec![0.0; 6]));
		// only one element of data for two vertices
		source.add(vec3(1, 2), Some(vec![1.0; 3]));
		let out = build_vertices(&source, &attributes(&[("POSITION", 0), ("NORMAL", 1), ("TANGENT", 9)]));
		assert_eq!(out.vertex_count, 2);
		for record in out.nodes.iter() {
			assert_eq!(record.attributes.len(), 1);
			assert!(record.attributes.contains_key("POSITION"));
		}
	}

	#[test]
	fn unreadable_position_gives_no_vertices() {
		let mut source = MemorySource::new();
		source.add(vec3(0, usize::MAX / 2), Some(vec![0.0; 12]));
		source.add(vec3(1, 4), Some(vec![0.0; 12]));
		let out = build_vertices(&source, &attributes(&[("POSITION", 0), ("NORMAL", 1)]));
		assert_eq!(out.vertex_count, 0);
		assert!(out.nodes.is_empty());

		source.add(vec3(0, 4), None);
		let out = build_vertices(&source, &attributes(&[("POSITION", 0), ("NORMAL", 1)]));
		assert_eq!(out.vertex_count, 0);
	}

	#[test]
	fn attribute_order_follows_the_map() {
		let mut source = MemorySource::new();
		source.add(vec3(0, 1), Some(vec![0.0; 3]));
		source.add(
			AccessorDescriptor {
				index: 1,
				component_type: ComponentType::U8,
				element_type: ElementType::Vec2,
				count: 1,
				normalized: true,
			},
			Some(vec![255.0, 0.0]),
		);
		let out = build_vertices(&source, &attributes(&[("TEXCOORD_0", 1), ("POSITION", 0)]));
		let record = out.nodes.iter().next().unwrap();
		assert_eq!(record.attributes.keys().collect::<Vec<_>>(), vec!["TEXCOORD_0", "POSITION"]);
		assert_eq!(record.attributes["TEXCOORD_0"], AttributeValue { values: vec![1.0, 0.0], is_float: true });
	}

	#[test]
	fn many_vertices_are_paged() {
		let mut source = MemorySource::new();
		source.add(vec3(0, 205), Some(vec![0.5; 615]));
		let out = build_vertices(&source, &attributes(&[("POSITION", 0)]));
		let Paginated::Paged(pages) = &out.nodes else { panic!("expected pages") };
		assert_eq!(pages.len(), 3);
		assert_eq!(pages[2].items.len(), 5);
		assert_eq!(pages[2].items[4].index, 204);
	}
}
