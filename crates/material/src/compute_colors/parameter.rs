use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::{
    BoolParameter, Float2Parameter, Float3Parameter, Float4Parameter, FloatParameter,
    IntParameter, ParameterError, ParameterValue, SamplerParameter, StringParameter,
    TextureParameter, TextureReference, ValueParameter,
};

/// One typed input of a compute-color node.
///
/// Serialized externally tagged: the variant is written under its persisted
/// tag (see [ParameterKind::tag]) and the fields follow in declaration order.
///
/// The binary encoding stores the variant's position instead of its tag, so
/// variants must never be reordered. New variants go at the end.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ComputeColorParameter {
    #[serde(rename = "ComputeColorStringParameter")]
    String(StringParameter),
    #[serde(rename = "ComputeColorParameterBool")]
    Bool(BoolParameter),
    #[serde(rename = "ComputeColorParameterFloat")]
    Float(FloatParameter),
    #[serde(rename = "ComputeColorParameterInt")]
    Int(IntParameter),
    #[serde(rename = "ComputeColorParameterFloat2")]
    Float2(Float2Parameter),
    #[serde(rename = "ComputeColorParameterFloat3")]
    Float3(Float3Parameter),
    #[serde(rename = "ComputeColorParameterFloat4")]
    Float4(Float4Parameter),
    #[serde(rename = "ComputeColorParameterTexture")]
    Texture(TextureParameter),
    #[serde(rename = "ComputeColorParameterSampler")]
    Sampler(SamplerParameter),
}

/// The kind of a [ComputeColorParameter], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParameterKind {
    String,
    Bool,
    Float,
    Int,
    Float2,
    Float3,
    Float4,
    Texture,
    Sampler,
}

impl ParameterKind {
    pub const ALL: [Self; 9] = [
        Self::String,
        Self::Bool,
        Self::Float,
        Self::Int,
        Self::Float2,
        Self::Float3,
        Self::Float4,
        Self::Texture,
        Self::Sampler,
    ];

    /// The stable identifier parameters of this kind are persisted under.
    ///
    /// These must match the `serde(rename)` of the [ComputeColorParameter]
    /// variants.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::String => "ComputeColorStringParameter",
            Self::Bool => "ComputeColorParameterBool",
            Self::Float => "ComputeColorParameterFloat",
            Self::Int => "ComputeColorParameterInt",
            Self::Float2 => "ComputeColorParameterFloat2",
            Self::Float3 => "ComputeColorParameterFloat3",
            Self::Float4 => "ComputeColorParameterFloat4",
            Self::Texture => "ComputeColorParameterTexture",
            Self::Sampler => "ComputeColorParameterSampler",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// A short lowercase name (e.g. `float3`), handier than the tag on a
    /// command line.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int => "int",
            Self::Float2 => "float2",
            Self::Float3 => "float3",
            Self::Float4 => "float4",
            Self::Texture => "texture",
            Self::Sampler => "sampler",
        }
    }

    /// Looks a kind up by either its tag or its short name.
    pub fn from_name(name: &str) -> Result<Self, ParameterError> {
        let name = name.trim();
        Self::from_tag(name)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|kind| kind.short_name().eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| ParameterError::UnknownTag(name.to_string()))
    }
}

impl Display for ParameterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl ComputeColorParameter {
    pub fn kind(&self) -> ParameterKind {
        match self {
            Self::String(_) => ParameterKind::String,
            Self::Bool(_) => ParameterKind::Bool,
            Self::Float(_) => ParameterKind::Float,
            Self::Int(_) => ParameterKind::Int,
            Self::Float2(_) => ParameterKind::Float2,
            Self::Float3(_) => ParameterKind::Float3,
            Self::Float4(_) => ParameterKind::Float4,
            Self::Texture(_) => ParameterKind::Texture,
            Self::Sampler(_) => ParameterKind::Sampler,
        }
    }

    /// Whether every float this parameter holds is finite. Only finite values
    /// can be persisted.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(p) => p.value.is_finite(),
            Self::Float2(p) => p.value.is_finite(),
            Self::Float3(p) => p.value.is_finite(),
            Self::Float4(p) => p.value.is_finite(),
            Self::Texture(p) => p.texture().scale.is_finite() && p.texture().offset.is_finite(),
            Self::String(_) | Self::Bool(_) | Self::Int(_) | Self::Sampler(_) => true,
        }
    }

    /// A freshly constructed parameter of the given kind, holding its default.
    pub fn default_for(kind: ParameterKind) -> Self {
        match kind {
            ParameterKind::String => Self::String(Default::default()),
            ParameterKind::Bool => Self::Bool(Default::default()),
            ParameterKind::Float => Self::Float(Default::default()),
            ParameterKind::Int => Self::Int(Default::default()),
            ParameterKind::Float2 => Self::Float2(Default::default()),
            ParameterKind::Float3 => Self::Float3(Default::default()),
            ParameterKind::Float4 => Self::Float4(Default::default()),
            ParameterKind::Texture => Self::Texture(Default::default()),
            ParameterKind::Sampler => Self::Sampler(Default::default()),
        }
    }

    /// Parses a parameter of the given kind from the text an editor shows for
    /// it.
    ///
    /// Vectors are comma separated (`1, 0, 0.5`), a texture is its URL and a
    /// sampler is `filter, address_u, address_v`.
    pub fn parse(kind: ParameterKind, text: &str) -> Result<Self, ParameterError> {
        let parse_error = |reason: String| ParameterError::Parse {
            kind,
            input: text.to_string(),
            reason,
        };

        Ok(match kind {
            ParameterKind::String => parse_value::<String>(text).map_err(parse_error)?,
            ParameterKind::Bool => parse_value::<bool>(text).map_err(parse_error)?,
            ParameterKind::Float => parse_value::<f32>(text).map_err(parse_error)?,
            ParameterKind::Int => parse_value::<i32>(text).map_err(parse_error)?,
            ParameterKind::Float2 => parse_value::<super::Float2>(text).map_err(parse_error)?,
            ParameterKind::Float3 => parse_value::<super::Float3>(text).map_err(parse_error)?,
            ParameterKind::Float4 => parse_value::<super::Float4>(text).map_err(parse_error)?,
            ParameterKind::Texture => {
                let texture = TextureReference::new(text.trim())?;
                let mut param = TextureParameter::default();
                param.texture_mut().texture = Some(texture);
                Self::Texture(param)
            }
            ParameterKind::Sampler => {
                Self::Sampler(SamplerParameter::parse_text(text).map_err(parse_error)?)
            }
        })
    }

    /// Borrow the plain value if this is a [ValueParameter] holding a `T`.
    pub fn value<T: ParameterValue>(&self) -> Option<&T> {
        T::from_parameter(self)
    }

    pub fn value_mut<T: ParameterValue>(&mut self) -> Option<&mut T> {
        T::from_parameter_mut(self)
    }

    pub fn as_string(&self) -> Option<&str> {
        self.value::<String>().map(String::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value::<bool>().copied()
    }

    pub fn as_float(&self) -> Option<f32> {
        self.value::<f32>().copied()
    }

    pub fn as_int(&self) -> Option<i32> {
        self.value::<i32>().copied()
    }

    pub fn as_float2(&self) -> Option<super::Float2> {
        self.value::<super::Float2>().copied()
    }

    pub fn as_float3(&self) -> Option<super::Float3> {
        self.value::<super::Float3>().copied()
    }

    pub fn as_float4(&self) -> Option<super::Float4> {
        self.value::<super::Float4>().copied()
    }

    pub fn as_texture(&self) -> Option<&TextureParameter> {
        match self {
            Self::Texture(param) => Some(param),
            _ => None,
        }
    }

    pub fn as_texture_mut(&mut self) -> Option<&mut TextureParameter> {
        match self {
            Self::Texture(param) => Some(param),
            _ => None,
        }
    }

    pub fn as_sampler(&self) -> Option<&SamplerParameter> {
        match self {
            Self::Sampler(param) => Some(param),
            _ => None,
        }
    }

    pub fn as_sampler_mut(&mut self) -> Option<&mut SamplerParameter> {
        match self {
            Self::Sampler(param) => Some(param),
            _ => None,
        }
    }
}

fn parse_value<T: ParameterValue>(text: &str) -> Result<ComputeColorParameter, String> {
    T::parse_text(text).map(|value| ValueParameter::new(value).into())
}

impl From<TextureParameter> for ComputeColorParameter {
    fn from(param: TextureParameter) -> Self {
        Self::Texture(param)
    }
}

impl From<SamplerParameter> for ComputeColorParameter {
    fn from(param: SamplerParameter) -> Self {
        Self::Sampler(param)
    }
}

impl Display for ComputeColorParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fn components(f: &mut Formatter<'_>, values: &[f32]) -> fmt::Result {
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{value}")?;
            }
            Ok(())
        }

        match self {
            Self::String(p) => f.write_str(&p.value),
            Self::Bool(p) => write!(f, "{}", p.value),
            Self::Float(p) => write!(f, "{}", p.value),
            Self::Int(p) => write!(f, "{}", p.value),
            Self::Float2(p) => components(f, &p.value.to_array()),
            Self::Float3(p) => components(f, &p.value.to_array()),
            Self::Float4(p) => components(f, &p.value.to_array()),
            Self::Texture(p) => match &p.texture().texture {
                Some(texture) => write!(f, "{texture}"),
                None => f.write_str("<no texture>"),
            },
            Self::Sampler(p) => write!(f, "{p}"),
        }
    }
}
