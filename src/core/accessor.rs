use indexmap::IndexMap;
use serde::Serialize;

use super::DecodeError;

/// Storage type of a single accessor component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ComponentType {
	I8,
	U8,
	I16,
	U16,
	I32,
	U32,
	F32,
}

impl ComponentType {
	/// Parses the GL enum code used by glTF, e.g. 5126 for FLOAT.
	pub fn from_gl_enum(code: u32) -> Result<Self, DecodeError> {
		match code {
			5120 => Ok(ComponentType::I8),
			5121 => Ok(ComponentType::U8),
			5122 => Ok(ComponentType::I16),
			5123 => Ok(ComponentType::U16),
			5124 => Ok(ComponentType::I32),
			5125 => Ok(ComponentType::U32),
			5126 => Ok(ComponentType::F32),
			_ => Err(DecodeError::UnsupportedComponentType(code)),
		}
	}

	#[inline]
	pub fn gl_enum(self) -> u32 {
		match self {
			ComponentType::I8 => 5120,
			ComponentType::U8 => 5121,
			ComponentType::I16 => 5122,
			ComponentType::U16 => 5123,
			ComponentType::I32 => 5124,
			ComponentType::U32 => 5125,
			ComponentType::F32 => 5126,
		}
	}

	/// returns the size of the data type in bytes e.g. 4 for F32
	#[inline]
	pub fn size(self) -> usize {
		match self {
			ComponentType::I8 | ComponentType::U8 => 1,
			ComponentType::I16 | ComponentType::U16 => 2,
			ComponentType::I32 | ComponentType::U32 | ComponentType::F32 => 4,
		}
	}

	#[inline]
	pub fn is_float(self) -> bool {
		matches!(self, ComponentType::F32)
	}

	/// The divisor used to normalize a raw integer of this type.
	/// Unsigned types divide by their maximum, signed types by the magnitude of their minimum.
	/// `None` for float components, which are never normalized.
	#[inline]
	pub(crate) fn normalization_divisor(self) -> Option<f64> {
		match self {
			ComponentType::U8 => Some(u8::MAX as f64),
			ComponentType::U16 => Some(u16::MAX as f64),
			ComponentType::U32 => Some(u32::MAX as f64),
			ComponentType::I8 => Some(-(i8::MIN as f64)),
			ComponentType::I16 => Some(-(i16::MIN as f64)),
			ComponentType::I32 => Some(-(i32::MIN as f64)),
			ComponentType::F32 => None,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			ComponentType::I8 => "BYTE",
			ComponentType::U8 => "UNSIGNED_BYTE",
			ComponentType::I16 => "SHORT",
			ComponentType::U16 => "UNSIGNED_SHORT",
			ComponentType::I32 => "INT",
			ComponentType::U32 => "UNSIGNED_INT",
			ComponentType::F32 => "FLOAT",
		}
	}
}

/// Shape of a single accessor element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ElementType {
	Scalar,
	Vec2,
	Vec3,
	Vec4,
	Mat2,
	Mat3,
	Mat4,
}

impl ElementType {
	/// Parses the glTF `type` tag, e.g. `"VEC3"`.
	pub fn from_tag(tag: &str) -> Result<Self, DecodeError> {
		match tag {
			"SCALAR" => Ok(ElementType::Scalar),
			"VEC2" => Ok(ElementType::Vec2),
			"VEC3" => Ok(ElementType::Vec3),
			"VEC4" => Ok(ElementType::Vec4),
			"MAT2" => Ok(ElementType::Mat2),
			"MAT3" => Ok(ElementType::Mat3),
			"MAT4" => Ok(ElementType::Mat4),
			_ => Err(DecodeError::UnsupportedElementType(tag.to_owned())),
		}
	}

	pub fn tag(self) -> &'static str {
		match self {
			ElementType::Scalar => "SCALAR",
			ElementType::Vec2 => "VEC2",
			ElementType::Vec3 => "VEC3",
			ElementType::Vec4 => "VEC4",
			ElementType::Mat2 => "MAT2",
			ElementType::Mat3 => "MAT3",
			ElementType::Mat4 => "MAT4",
		}
	}

	#[inline]
	pub fn component_count(self) -> usize {
		match self {
			ElementType::Scalar => 1,
			ElementType::Vec2 => 2,
			ElementType::Vec3 => 3,
			ElementType::Vec4 => 4,
			ElementType::Mat2 => 4,
			ElementType::Mat3 => 9,
			ElementType::Mat4 => 16,
		}
	}

	/// Number of rows (and columns) for matrix types.
	#[inline]
	pub fn matrix_order(self) -> Option<usize> {
		match self {
			ElementType::Mat2 => Some(2),
			ElementType::Mat3 => Some(3),
			ElementType::Mat4 => Some(4),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AccessorDescriptor {
	/// position of the accessor in the document's accessor array
	pub index: usize,
	pub component_type: ComponentType,
	pub element_type: ElementType,
	pub count: usize,
	pub normalized: bool,
}

impl AccessorDescriptor {
	#[inline]
	pub fn component_count(&self) -> usize {
		self.element_type.component_count()
	}

	/// Whether decoded values of this accessor are presented as floats.
	#[inline]
	pub fn is_float(&self) -> bool {
		self.component_type.is_float() || self.normalized
	}

	/// Number of scalars a fully decoded data array must hold. `None` if the declared
	/// count is too large to address.
	#[inline]
	pub fn scalar_len(&self) -> Option<usize> {
		self.count.checked_mul(self.component_count())
	}
}

/// A mesh primitive as seen by the core: named attribute accessors, an optional
/// index accessor and the raw topology mode tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrimitiveDescriptor {
	pub mesh: usize,
	pub primitive: usize,
	pub attributes: IndexMap<String, usize>,
	pub indices: Option<usize>,
	pub mode: Option<u32>,
}

/// What a JSON pointer into the document refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
	Accessor(AccessorDescriptor),
	Primitive(PrimitiveDescriptor),
}

/// The parsed form of the pointers an inspector can follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsonPointer {
	Accessor(usize),
	Primitive { mesh: usize, primitive: usize },
}

impl JsonPointer {
	pub fn parse(pointer: &str) -> Result<Self, DecodeError> {
		let fail = || DecodeError::PointerResolutionFailure(pointer.to_owned());
		let segments = pointer.strip_prefix('/')
			.ok_or_else(fail)?
			.split('/')
			.collect::<Vec<_>>();
		let index = |s: &str| s.parse::<usize>().map_err(|_| fail());

		match segments.as_slice() {
			["accessors", a] => Ok(JsonPointer::Accessor(index(a)?)),
			["meshes", m, "primitives", p] => Ok(JsonPointer::Primitive {
				mesh: index(m)?,
				primitive: index(p)?,
			}),
			_ => Err(fail()),
		}
	}
}

/// The document seen through the core's eyes.
///
/// Implementors own both the parsed document and whatever context is needed to fetch
/// its buffers. Buffer-level decoding (byte stride, sparse overrides) happens behind
/// `accessor_data`, so the core only ever sees flat arrays of logical component values.
pub trait GeometrySource {
	/// Looks up the accessor or mesh primitive a pointer such as `/accessors/3` or
	/// `/meshes/0/primitives/1` refers to.
	fn resolve_json_pointer(&self, pointer: &str) -> Result<Target, DecodeError>;

	fn accessor(&self, index: usize) -> Option<AccessorDescriptor>;

	/// Returns `count * component_count` raw (not normalized) component values, or
	/// `None` if the accessor's data cannot be read.
	fn accessor_data(&self, accessor: &AccessorDescriptor) -> Option<Vec<f64>>;
}
