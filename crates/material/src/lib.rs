//! Typed parameters for procedural compute-color nodes of the material system,
//! plus the file format used to persist them with a material asset.

pub mod asset_file;
pub mod compute_colors;

pub use asset_file::{AssetFileError, AssetFormat, ParameterAsset};
pub use compute_colors::{
    ComputeColorParameter, ComputeColorParameters, ParameterError, ParameterKind,
};
