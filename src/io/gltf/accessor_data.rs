//! Reads accessor components out of buffer views.
//!
//! glTF stores components little-endian. Elements may be interleaved with other data
//! (byte stride), and matrix columns of 1- and 2-byte components are padded to
//! 4-byte boundaries.

use crate::core::accessor::{AccessorDescriptor, ComponentType};

/// Byte layout of one accessor element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ElementLayout {
    pub component_type: ComponentType,
    pub component_count: usize,
    pub matrix_order: Option<usize>,
}

impl ElementLayout {
    pub fn of(accessor: &AccessorDescriptor) -> Self {
        Self {
            component_type: accessor.component_type,
            component_count: accessor.component_count(),
            matrix_order: accessor.element_type.matrix_order(),
        }
    }

    /// Byte distance between two matrix columns.
    #[inline]
    fn column_stride(&self, order: usize) -> usize {
        (order * self.component_type.size()).next_multiple_of(4)
    }

    /// Byte offset of component `j` from the start of the element.
    #[inline]
    pub fn component_offset(&self, j: usize) -> usize {
        let size = self.component_type.size();
        match self.matrix_order {
            Some(order) => (j / order) * self.column_stride(order) + (j % order) * size,
            None => j * size,
        }
    }

    /// Size of a tightly packed element, including column padding.
    #[inline]
    pub fn packed_size(&self) -> usize {
        match self.matrix_order {
            Some(order) => order * self.column_stride(order),
            None => self.component_count * self.component_type.size(),
        }
    }
}

/// Reads one little-endian component. `None` if it does not fit into `bytes`.
pub(crate) fn read_component(bytes: &[u8], offset: usize, component_type: ComponentType) -> Option<f64> {
    let raw = bytes.get(offset..offset.checked_add(component_type.size())?)?;
    let value = match component_type {
        ComponentType::I8 => i8::from_le_bytes([raw[0]]) as f64,
        ComponentType::U8 => raw[0] as f64,
        ComponentType::I16 => i16::from_le_bytes([raw[0], raw[1]]) as f64,
        ComponentType::U16 => u16::from_le_bytes([raw[0], raw[1]]) as f64,
        ComponentType::I32 => i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as f64,
        ComponentType::U32 => u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as f64,
        ComponentType::F32 => f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as f64,
    };
    Some(value)
}

/// Reads `count` elements starting at `offset`, `stride` bytes apart (the packed
/// element size when `None`). The result holds `count * component_count` values.
/// `None` if the last element does not end within `bytes`.
pub(crate) fn read_elements(
    bytes: &[u8],
    offset: usize,
    stride: Option<usize>,
    count: usize,
    layout: ElementLayout,
) -> Option<Vec<f64>> {
    if count == 0 {
        return Some(Vec::new());
    }
    let stride = stride.unwrap_or(layout.packed_size());
    let end = (count - 1).checked_mul(stride)?
        .checked_add(offset)?
        .checked_add(layout.packed_size())?;
    if end > bytes.len() {
        return None;
    }

    let mut out = Vec::with_capacity(count.checked_mul(layout.component_count)?);
    for i in 0..count {
        let start = offset + i * stride;
        for j in 0..layout.component_count {
            out.push(read_component(bytes, start + layout.component_offset(j), layout.component_type)?);
        }
    }
    Some(out)
}

/// Overwrites the elements listed in `indices` with consecutive elements of `values`.
/// `None` if an index lies outside of `out` or `values` runs short.
pub(crate) fn apply_sparse(out: &mut [f64], indices: &[f64], values: &[f64], component_count: usize) -> Option<()> {
    for (k, &index) in indices.iter().enumerate() {
        let dst = (index as usize).checked_mul(component_count)?;
        let src = k.checked_mul(component_count)?;
        out.get_mut(dst..dst.checked_add(component_count)?)?
            .copy_from_slice(values.get(src..src.checked_add(component_count)?)?);
    }
    Some(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout(component_type: ComponentType, component_count: usize, matrix_order: Option<usize>) -> ElementLayout {
        ElementLayout { component_type, component_count, matrix_order }
    }

    #[test]
    fn components_are_little_endian() {
        assert_eq!(read_component(&[0x39, 0x30], 0, ComponentType::U16), Some(12345.0));
        assert_eq!(read_component(&[0x80], 0, ComponentType::I8), Some(-128.0));
        assert_eq!(read_component(&1.5f32.to_le_bytes(), 0, ComponentType::F32), Some(1.5));
        assert_eq!(read_component(&(-2i32).to_le_bytes(), 0, ComponentType::I32), Some(-2.0));
        assert_eq!(read_component(&[0x01], 0, ComponentType::U16), None);
    }

    #[test]
    fn strided_elements_skip_interleaved_bytes() {
        // two VEC2<u8> elements, each followed by two bytes of other data
        let bytes = [1, 2, 0xFF, 0xFF, 3, 4, 0xFF, 0xFF];
        let out = read_elements(&bytes, 0, Some(4), 2, layout(ComponentType::U8, 2, None));
        assert_eq!(out, Some(vec![1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn packed_elements_with_offset() {
        let bytes = [9, 9, 1, 0, 2, 0, 3, 0];
        let out = read_elements(&bytes, 2, None, 3, layout(ComponentType::U16, 1, None));
        assert_eq!(out, Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn mat2_of_bytes_pads_columns() {
        let l = layout(ComponentType::U8, 4, Some(2));
        assert_eq!(l.packed_size(), 8);
        assert_eq!((0..4).map(|j| l.component_offset(j)).collect::<Vec<_>>(), vec![0, 1, 4, 5]);
        let bytes = [1, 2, 0, 0, 3, 4, 0, 0];
        assert_eq!(read_elements(&bytes, 0, None, 1, l), Some(vec![1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn mat3_of_shorts_pads_columns() {
        let l = layout(ComponentType::I16, 9, Some(3));
        assert_eq!(l.packed_size(), 24);
        assert_eq!(l.component_offset(3), 8);
        // float matrices need no padding
        let f = layout(ComponentType::F32, 9, Some(3));
        assert_eq!(f.packed_size(), 36);
        assert_eq!(f.component_offset(4), 16);
    }

    #[test]
    fn reading_past_the_end_fails() {
        let out = read_elements(&[0u8; 10], 0, None, 1, layout(ComponentType::F32, 3, None));
        assert_eq!(out, None);
        // the last element must fit, not just the first
        let out = read_elements(&[0u8; 16], 0, Some(8), 2, layout(ComponentType::F32, 3, None));
        assert_eq!(out, None);
    }

    #[test]
    fn oversized_counts_fail_without_allocating() {
        let vec4 = layout(ComponentType::F32, 4, None);
        assert_eq!(read_elements(&[0u8; 16], 0, None, 1 << 62, vec4), None);
        assert_eq!(read_elements(&[0u8; 16], 0, Some(16), 1_000_000_000, vec4), None);
        assert_eq!(read_elements(&[0u8; 16], usize::MAX, None, 1, vec4), None);
        assert_eq!(read_elements(&[0u8; 16], 0, None, 0, vec4), Some(vec![]));
    }

    #[test]
    fn sparse_values_override_elements() {
        let mut out = vec![0.0; 8];
        apply_sparse(&mut out, &[1.0, 3.0], &[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 3.0, 4.0]);
        assert_eq!(apply_sparse(&mut out, &[4.0], &[1.0, 2.0], 2), None);
        assert_eq!(apply_sparse(&mut out, &[0.0, 1.0], &[1.0, 2.0], 2), None);
    }
}
