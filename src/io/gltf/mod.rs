pub(crate) mod accessor_data;

use std::path::Path;

use gltf::accessor::{sparse, DataType, Dimensions};
use gltf::mesh::Mode;
use indexmap::IndexMap;

use crate::core::accessor::{
    AccessorDescriptor,
    ComponentType,
    ElementType,
    GeometrySource,
    JsonPointer,
    PrimitiveDescriptor,
    Target,
};
use crate::core::topology::TopologyMode;
use crate::core::DecodeError;
use accessor_data::{apply_sparse, read_elements, ElementLayout};

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Failed to load glTF file: {0}")]
    LoadError(#[from] gltf::Error),
}

/// A loaded glTF asset: the parsed document together with its buffer contents.
pub struct GltfAsset {
    document: gltf::Document,
    buffers: Vec<gltf::buffer::Data>,
}

impl GltfAsset {
    /// Loads a `.gltf` or `.glb` file along with the external buffers it references.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Err> {
        let (document, buffers, _images) = gltf::import(path)?;
        Ok(Self { document, buffers })
    }

    /// Loads an asset from memory. External buffers cannot be resolved this way, only
    /// the GLB binary chunk and `data:` URIs.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Err> {
        let (document, buffers, _images) = gltf::import_slice(bytes)?;
        Ok(Self { document, buffers })
    }

    pub fn document(&self) -> &gltf::Document {
        &self.document
    }

    /// All pointers this asset can be inspected at, accessors first.
    pub fn pointers(&self) -> Vec<String> {
        let accessors = self.document.accessors()
            .map(|a| format!("/accessors/{}", a.index()));
        let primitives = self.document.meshes()
            .flat_map(|m| m.primitives().map(move |p| format!("/meshes/{}/primitives/{}", m.index(), p.index())));
        accessors.chain(primitives).collect()
    }

    /// The bytes of a buffer view, bounds-checked against its buffer.
    fn view_bytes(&self, view: &gltf::buffer::View) -> Option<&[u8]> {
        let buffer = self.buffers.get(view.buffer().index())?;
        buffer.get(view.offset()..view.offset().checked_add(view.length())?)
    }

    fn read_sparse(&self, sparse: &sparse::Sparse, layout: ElementLayout, out: &mut [f64]) -> Option<()> {
        let indices = sparse.indices();
        let index_layout = ElementLayout {
            component_type: match indices.index_type() {
                sparse::IndexType::U8 => ComponentType::U8,
                sparse::IndexType::U16 => ComponentType::U16,
                sparse::IndexType::U32 => ComponentType::U32,
            },
            component_count: 1,
            matrix_order: None,
        };
        let index_values = read_elements(
            self.view_bytes(&indices.view())?,
            indices.offset(),
            None,
            sparse.count(),
            index_layout,
        )?;

        let values = sparse.values();
        let values = read_elements(
            self.view_bytes(&values.view())?,
            values.offset(),
            None,
            sparse.count(),
            layout,
        )?;
        apply_sparse(out, &index_values, &values, layout.component_count)
    }
}

/// A zeroed base array for a sparse accessor. `None` if it cannot be allocated.
fn zeros(len: usize) -> Option<Vec<f64>> {
    let mut out = Vec::new();
    out.try_reserve_exact(len).ok()?;
    out.resize(len, 0.0);
    Some(out)
}

fn component_type(data_type: DataType) -> ComponentType {
    match data_type {
        DataType::I8 => ComponentType::I8,
        DataType::U8 => ComponentType::U8,
        DataType::I16 => ComponentType::I16,
        DataType::U16 => ComponentType::U16,
        DataType::U32 => ComponentType::U32,
        DataType::F32 => ComponentType::F32,
    }
}

fn element_type(dimensions: Dimensions) -> ElementType {
    match dimensions {
        Dimensions::Scalar => ElementType::Scalar,
        Dimensions::Vec2 => ElementType::Vec2,
        Dimensions::Vec3 => ElementType::Vec3,
        Dimensions::Vec4 => ElementType::Vec4,
        Dimensions::Mat2 => ElementType::Mat2,
        Dimensions::Mat3 => ElementType::Mat3,
        Dimensions::Mat4 => ElementType::Mat4,
    }
}

fn topology_mode(mode: Mode) -> TopologyMode {
    match mode {
        Mode::Points => TopologyMode::Points,
        Mode::Lines => TopologyMode::Lines,
        Mode::LineLoop => TopologyMode::LineLoop,
        Mode::LineStrip => TopologyMode::LineStrip,
        Mode::Triangles => TopologyMode::Triangles,
        Mode::TriangleStrip => TopologyMode::TriangleStrip,
        Mode::TriangleFan => TopologyMode::TriangleFan,
    }
}

fn describe(accessor: &gltf::Accessor) -> AccessorDescriptor {
    AccessorDescriptor {
        index: accessor.index(),
        component_type: component_type(accessor.data_type()),
        element_type: element_type(accessor.dimensions()),
        count: accessor.count(),
        normalized: accessor.normalized(),
    }
}

impl GeometrySource for GltfAsset {
    fn resolve_json_pointer(&self, pointer: &str) -> Result<Target, DecodeError> {
        let fail = || DecodeError::PointerResolutionFailure(pointer.to_owned());
        match JsonPointer::parse(pointer)? {
            JsonPointer::Accessor(a) => self.accessor(a)
                .map(Target::Accessor)
                .ok_or_else(fail),
            JsonPointer::Primitive { mesh, primitive } => {
                let primitive = self.document.meshes()
                    .nth(mesh)
                    .and_then(|m| m.primitives().nth(primitive))
                    .ok_or_else(fail)?;
                let attributes = primitive.attributes()
                    .map(|(semantic, accessor)| (semantic.to_string(), accessor.index()))
                    .collect::<IndexMap<_, _>>();
                Ok(Target::Primitive(PrimitiveDescriptor {
                    mesh,
                    primitive: primitive.index(),
                    attributes,
                    indices: primitive.indices().map(|a| a.index()),
                    mode: Some(topology_mode(primitive.mode()).tag()),
                }))
            },
        }
    }

    fn accessor(&self, index: usize) -> Option<AccessorDescriptor> {
        self.document.accessors().nth(index).map(|a| describe(&a))
    }

    fn accessor_data(&self, descriptor: &AccessorDescriptor) -> Option<Vec<f64>> {
        let accessor = self.document.accessors().nth(descriptor.index)?;
        let layout = ElementLayout::of(descriptor);

        let mut out = match accessor.view() {
            Some(view) => read_elements(
                self.view_bytes(&view)?,
                accessor.offset(),
                view.stride(),
                descriptor.count,
                layout,
            )?,
            // without a buffer view the base values are zero; only sparse data fills them in
            None if accessor.sparse().is_some() => zeros(descriptor.scalar_len()?)?,
            None => return None,
        };

        if let Some(sparse) = accessor.sparse() {
            self.read_sparse(&sparse, layout, &mut out)?;
        }
        Some(out)
    }
}
