// lib.rs

/// Contains the decoding pipeline: element decoding, vertex assembly, topology
/// reconstruction and pagination. Nothing in here knows about glTF files or UI.
pub mod core;

/// Turns decoded data into a tree of display nodes and tracks the inspection session.
pub mod inspect;

/// Contains the interface between glTF assets on disk and the decoders.
pub mod io;


/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::DecodeError;
    pub use crate::core::accessor::{
        AccessorDescriptor,
        ComponentType,
        ElementType,
        GeometrySource,
        PrimitiveDescriptor,
        Target,
    };
    pub use crate::core::element::{build_accessor_tree, decode_element, DecodedElement};
    pub use crate::core::paginate::{paginate, Page, Paginated, PAGE_SIZE};
    pub use crate::core::shared::ConfigType;
    pub use crate::core::topology::{build_topology, TopologyMode, TopologyResult};
    pub use crate::core::vertex::{build_vertices, VertexRecord, VerticesResult};
    pub use crate::inspect::{self, Inspection, Inspector};
    pub use crate::inspect::selection::Selection;
    pub use crate::inspect::tree::{InspectNode, TreeItem};
    pub use crate::io::gltf::GltfAsset;
}
