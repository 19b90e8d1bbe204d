use std::collections::BTreeMap;

use super::accessor::{AccessorDescriptor, GeometrySource, JsonPointer, PrimitiveDescriptor, Target};
use super::DecodeError;

/// In-memory document for unit tests. Accessor data is stored already decoded.
pub(crate) struct MemorySource {
	accessors: BTreeMap<usize, (AccessorDescriptor, Option<Vec<f64>>)>,
	primitives: Vec<PrimitiveDescriptor>,
}

impl MemorySource {
	pub(crate) fn new() -> Self {
		Self { accessors: BTreeMap::new(), primitives: Vec::new() }
	}

	/// Registers (or replaces) an accessor. `None` data makes the accessor unreadable.
	pub(crate) fn add(&mut self, accessor: AccessorDescriptor, data: Option<Vec<f64>>) {
		self.accessors.insert(accessor.index, (accessor, data));
	}

	pub(crate) fn add_primitive(&mut self, primitive: PrimitiveDescriptor) {
		self.primitives.push(primitive);
	}
}

impl GeometrySource for MemorySource {
	fn resolve_json_pointer(&self, pointer: &str) -> Result<Target, DecodeError> {
		let fail = || DecodeError::PointerResolutionFailure(pointer.to_owned());
		match JsonPointer::parse(pointer)? {
			JsonPointer::Accessor(a) => self.accessor(a).map(Target::Accessor).ok_or_else(fail),
			JsonPointer::Primitive { mesh, primitive } => self.primitives.iter()
				.find(|p| p.mesh == mesh && p.primitive == primitive)
				.cloned()
				.map(Target::Primitive)
				.ok_or_else(fail),
		}
	}

	fn accessor(&self, index: usize) -> Option<AccessorDescriptor> {
		self.accessors.get(&index).map(|(acc, _)| *acc)
	}

	fn accessor_data(&self, accessor: &AccessorDescriptor) -> Option<Vec<f64>> {
		self.accessors.get(&accessor.index).and_then(|(_, data)| data.clone())
	}
}
