use serde::Serialize;

use super::accessor::{AccessorDescriptor, ComponentType, GeometrySource};
use super::paginate::{try_paginate, Paginated};
use super::DecodeError;

/// One row of a decoded matrix element.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatrixRow {
	pub row: usize,
	pub values: Vec<f64>,
}

/// One accessor element after decoding. `is_float` is set for float accessors and for
/// normalized integer accessors, whose values are fractions.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodedElement {
	Scalar { index: usize, value: f64, is_float: bool },
	Vector { index: usize, values: Vec<f64>, is_float: bool },
	Matrix { index: usize, rows: Vec<MatrixRow>, is_float: bool },
}

impl DecodedElement {
	#[inline]
	pub fn index(&self) -> usize {
		match self {
			DecodedElement::Scalar { index, .. }
			| DecodedElement::Vector { index, .. }
			| DecodedElement::Matrix { index, .. } => *index,
		}
	}

	#[inline]
	pub fn is_float(&self) -> bool {
		match self {
			DecodedElement::Scalar { is_float, .. }
			| DecodedElement::Vector { is_float, .. }
			| DecodedElement::Matrix { is_float, .. } => *is_float,
		}
	}

	/// All components of the element in storage order.
	pub fn values(&self) -> Vec<f64> {
		match self {
			DecodedElement::Scalar { value, .. } => vec![*value],
			DecodedElement::Vector { values, .. } => values.clone(),
			DecodedElement::Matrix { rows, .. } => rows.iter()
				.flat_map(|r| r.values.iter().copied())
				.collect(),
		}
	}
}

/// Maps a raw integer component into `[0, 1]` (unsigned) or `[-1, 1]` (signed).
/// Float components are returned unchanged.
#[inline]
pub fn normalize(raw: f64, component_type: ComponentType) -> f64 {
	match component_type.normalization_divisor() {
		// the most negative signed value would fall just below -1
		Some(divisor) => (raw / divisor).max(-1.0),
		None => raw,
	}
}

/// Reads the `component_count` values of element `index` from a flat array of raw
/// component values. Returns `None` if the element lies outside of `data`.
pub fn read_components(
	data: &[f64],
	index: usize,
	component_count: usize,
	component_type: ComponentType,
	normalized: bool,
) -> Option<Vec<f64>> {
	let start = index.checked_mul(component_count)?;
	let end = start.checked_add(component_count)?;
	let raw = data.get(start..end)?;
	let out = if normalized && !component_type.is_float() {
		raw.iter().map(|&v| normalize(v, component_type)).collect()
	} else {
		raw.to_vec()
	};
	Some(out)
}

/// Decodes element `index` of `accessor` into a scalar, vector or matrix.
pub fn decode_element(data: &[f64], index: usize, accessor: &AccessorDescriptor) -> Result<DecodedElement, DecodeError> {
	let values = read_components(
		data,
		index,
		accessor.component_count(),
		accessor.component_type,
		accessor.normalized,
	).ok_or(DecodeError::DataUnavailable { accessor: accessor.index })?;
	let is_float = accessor.is_float();

	let element = if let Some(order) = accessor.element_type.matrix_order() {
		let rows = values.chunks_exact(order)
			.enumerate()
			.map(|(row, values)| MatrixRow { row, values: values.to_vec() })
			.collect();
		DecodedElement::Matrix { index, rows, is_float }
	} else if accessor.component_count() == 1 {
		DecodedElement::Scalar { index, value: values[0], is_float }
	} else {
		DecodedElement::Vector { index, values, is_float }
	};
	Ok(element)
}

/// Decodes every element of an accessor and pages the result.
pub fn build_accessor_tree<S>(source: &S, accessor: &AccessorDescriptor) -> Result<Paginated<DecodedElement>, DecodeError>
	where S: GeometrySource + ?Sized
{
	let data = source.accessor_data(accessor)
		.filter(|data| accessor.scalar_len().is_some_and(|len| data.len() >= len))
		.ok_or(DecodeError::DataUnavailable { accessor: accessor.index })?;

	let out = try_paginate(accessor.count, |i| decode_element(&data, i, accessor))?;
	tracing::debug!(
		accessor = accessor.index,
		count = accessor.count,
		element_type = accessor.element_type.tag(),
		"decoded accessor"
	);
	Ok(out)
}


#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::accessor::ElementType;
	use crate::core::testing::MemorySource;
	use pretty_assertions::assert_eq;

	fn descriptor(component_type: ComponentType, element_type: ElementType, count: usize, normalized: bool) -> AccessorDescriptor {
		AccessorDescriptor { index: 0, component_type, element_type, count, normalized }
	}

	#[test]
	fn unsigned_normalization() {
		assert_eq!(read_components(&[255.0], 0, 1, ComponentType::U8, true), Some(vec![1.0]));
		assert_eq!(read_components(&[0.0], 0, 1, ComponentType::U8, true), Some(vec![0.0]));
		assert_eq!(read_components(&[65535.0], 0, 1, ComponentType::U16, true), Some(vec![1.0]));
	}

	#[test]
	fn signed_normalization_clamps_at_minus_one() {
		assert_eq!(read_components(&[-128.0], 0, 1, ComponentType::I8, true), Some(vec![-1.0]));
		assert_eq!(read_components(&[127.0], 0, 1, ComponentType::I8, true), Some(vec![0.9921875]));
		assert_eq!(read_components(&[-32768.0], 0, 1, ComponentType::I16, true), Some(vec![-1.0]));
	}

	#[test]
	fn without_normalization_values_are_raw() {
		assert_eq!(read_components(&[255.0], 0, 1, ComponentType::U8, false), Some(vec![255.0]));
		// float accessors ignore the flag
		assert_eq!(read_components(&[2.5], 0, 1, ComponentType::F32, true), Some(vec![2.5]));
	}

	#[test]
	fn reads_the_window_of_the_element() {
		let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
		assert_eq!(read_components(&data, 1, 3, ComponentType::F32, false), Some(vec![3.0, 4.0, 5.0]));
		assert_eq!(read_components(&data, 2, 3, ComponentType::F32, false), None);
	}

	#[test]
	fn scalar_u16() {
		let acc = descriptor(ComponentType::U16, ElementType::Scalar, 1, false);
		let element = decode_element(&[12345.0], 0, &acc).unwrap();
		assert_eq!(element, DecodedElement::Scalar { index: 0, value: 12345.0, is_float: false });
	}

	#[test]
	fn vector_keeps_its_index() {
		let acc = descriptor(ComponentType::F32, ElementType::Vec2, 2, false);
		let element = decode_element(&[1.0, 2.0, 3.0, 4.0], 1, &acc).unwrap();
		assert_eq!(element, DecodedElement::Vector { index: 1, values: vec![3.0, 4.0], is_float: true });
	}

	#[test]
	fn matrix_rows_are_consecutive_runs() {
		let acc = descriptor(ComponentType::F32, ElementType::Mat3, 1, false);
		let data = (0..9).map(f64::from).collect::<Vec<_>>();
		let element = decode_element(&data, 0, &acc).unwrap();
		let DecodedElement::Matrix { rows, .. } = &element else { panic!("expected a matrix") };
		assert_eq!(rows.len(), 3);
		assert_eq!(rows[1], MatrixRow { row: 1, values: vec![3.0, 4.0, 5.0] });
		assert_eq!(element.values(), data);
	}

	#[test]
	fn normalized_matrix_is_float() {
		let acc = descriptor(ComponentType::I16, ElementType::Mat2, 1, true);
		let element = decode_element(&[-32768.0, 0.0, 16384.0, 32767.0], 0, &acc).unwrap();
		assert!(element.is_float());
		assert_eq!(element.values()[..3].to_vec(), vec![-1.0, 0.0, 0.5]);
	}

	#[test]
	fn accessor_tree_pages_large_accessors() {
		let acc = descriptor(ComponentType::U32, ElementType::Scalar, 250, false);
		let mut source = MemorySource::new();
		source.add(acc, Some((0..250).map(f64::from).collect()));

		let tree = build_accessor_tree(&source, &acc).unwrap();
		let Paginated::Paged(pages) = &tree else { panic!("expected pages") };
		assert_eq!(pages.len(), 3);
		assert_eq!((pages[2].start, pages[2].end), (200, 249));
		assert_eq!(pages[2].items[0], DecodedElement::Scalar { index: 200, value: 200.0, is_float: false });
	}

	#[test]
	fn accessor_tree_without_data_fails() {
		let acc = AccessorDescriptor { index: 7, ..descriptor(ComponentType::F32, ElementType::Vec3, 2, false) };
		let mut source = MemorySource::new();
		source.add(acc, None);
		assert_eq!(build_accessor_tree(&source, &acc), Err(DecodeError::DataUnavailable { accessor: 7 }));

		// too short for the declared count
		source.add(acc, Some(vec![0.0; 5]));
		assert_eq!(build_accessor_tree(&source, &acc), Err(DecodeError::DataUnavailable { accessor: 7 }));

		// a count whose scalar length overflows
		let huge = AccessorDescriptor { count: usize::MAX / 2, ..acc };
		source.add(huge, Some(vec![0.0; 6]));
		assert_eq!(build_accessor_tree(&source, &huge), Err(DecodeError::DataUnavailable { accessor: 7 }));
	}
}
