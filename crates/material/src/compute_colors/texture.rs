use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::{Float2, ParameterError, TextureAddressMode, TextureFilter};

/// A reference to a texture asset by its URL (e.g. `textures/brick_albedo`).
///
/// The texture object itself is owned by the graphics resource layer; this is
/// only the name it's looked up by.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct TextureReference(String);

impl TextureReference {
    pub fn new(url: impl Into<String>) -> Result<Self, ParameterError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(ParameterError::EmptyTextureUrl);
        }
        Ok(Self(url))
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

impl Display for TextureReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TextureReference> for String {
    fn from(val: TextureReference) -> Self {
        val.0
    }
}

impl TryFrom<String> for TextureReference {
    type Error = ParameterError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

/// Which set of mesh texture coordinates a texture is sampled with.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureCoordinate {
    #[default]
    Texcoord0,
    Texcoord1,
    Texcoord2,
    Texcoord3,
    Texcoord4,
    Texcoord5,
    Texcoord6,
    Texcoord7,
    Texcoord8,
    Texcoord9,
}

impl TextureCoordinate {
    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// A compute-color node that samples a texture.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ComputeTextureColor {
    /// The sampled texture, `None` until one is assigned.
    pub texture: Option<TextureReference>,

    pub texcoord_index: TextureCoordinate,

    pub filtering: TextureFilter,

    pub address_mode_u: TextureAddressMode,

    pub address_mode_v: TextureAddressMode,

    /// Multiplies the texture coordinates before sampling.
    pub scale: Float2,

    /// Added to the texture coordinates after scaling.
    pub offset: Float2,

    /// Channel selection applied to the sampled color (e.g. `rgb` or `a`).
    /// Empty means the color is used as is.
    pub swizzle: String,
}

impl ComputeTextureColor {
    pub fn with_texture(texture: TextureReference) -> Self {
        Self {
            texture: Some(texture),
            ..Default::default()
        }
    }
}

impl Default for ComputeTextureColor {
    fn default() -> Self {
        Self {
            texture: None,
            texcoord_index: TextureCoordinate::Texcoord0,
            filtering: TextureFilter::Linear,
            address_mode_u: TextureAddressMode::Wrap,
            address_mode_v: TextureAddressMode::Wrap,
            scale: Float2::ONE,
            offset: Float2::ZERO,
            swizzle: String::new(),
        }
    }
}

/// A parameter that exclusively owns a texture compute-color node.
///
/// The node is created along with the parameter and can be edited, but never
/// swapped out for another one.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TextureParameter {
    texture: Box<ComputeTextureColor>,
}

impl TextureParameter {
    pub fn new(texture: ComputeTextureColor) -> Self {
        Self {
            texture: Box::new(texture),
        }
    }

    pub fn texture(&self) -> &ComputeTextureColor {
        &self.texture
    }

    pub fn texture_mut(&mut self) -> &mut ComputeTextureColor {
        &mut self.texture
    }

    pub fn into_texture(self) -> ComputeTextureColor {
        *self.texture
    }
}
