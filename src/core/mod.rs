/// Accessor and primitive descriptors, and the trait through which the core reads a document.
pub mod accessor;

/// Decodes accessor elements, applying integer normalization.
pub mod element;

/// Splits long sequences into bounded pages.
pub mod paginate;

/// Shared helper traits.
pub mod shared;

/// Expands index lists into triangles, lines and points.
pub mod topology;

/// Zips attribute accessors into vertex records.
pub mod vertex;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;

/// Errors raised while decoding accessors and reconstructing primitives.
///
/// `DataUnavailable` is recoverable where an accessor is only one of several inputs
/// (vertex attributes); every other variant aborts the build call that raised it.
#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
	#[error("Data of accessor {accessor} is unavailable")]
	DataUnavailable { accessor: usize },
	#[error("Could not resolve JSON pointer: {0}")]
	PointerResolutionFailure(String),
	#[error("Unsupported component type: {0}")]
	UnsupportedComponentType(u32),
	#[error("Unsupported element type: {0}")]
	UnsupportedElementType(String),
	#[error("Unsupported topology mode: {0}")]
	UnsupportedTopologyMode(u32),
}
