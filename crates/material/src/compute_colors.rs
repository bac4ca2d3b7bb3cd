//! Parameter descriptors feeding compute-color nodes.
//!
//! Every parameter is one variant of [ComputeColorParameter]. The variant tag
//! (see [ParameterKind::tag]) is what identifies the parameter in a persisted
//! material, so those strings must never change.

pub mod errors;
mod parameter;
mod parameters;
mod sampler;
mod texture;
mod value;

pub use errors::ParameterError;
pub use parameter::{ComputeColorParameter, ParameterKind};
pub use parameters::ComputeColorParameters;
pub use sampler::{SamplerParameter, TextureAddressMode, TextureFilter};
pub use texture::{ComputeTextureColor, TextureCoordinate, TextureParameter, TextureReference};
pub use value::{
    BoolParameter, Float2, Float2Parameter, Float3, Float3Parameter, Float4, Float4Parameter,
    FloatParameter, IntParameter, ParameterValue, StringParameter, ValueParameter,
};
