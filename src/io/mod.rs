/// Reads glTF 2.0 assets with the `gltf` crate and exposes them to the decoders.
pub mod gltf;
