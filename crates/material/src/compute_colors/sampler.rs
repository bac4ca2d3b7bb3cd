use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Defines a fieldless enum that displays as, and parses from, its variant
/// names.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $raw:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$variant_meta])* $variant = $raw,)+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// The name this variant is persisted and displayed as.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }

            /// The raw value a graphics backend uses for this variant.
            pub const fn raw(self) -> u8 {
                self as u8
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| format!("unknown {} '{s}'", stringify!($name)))
            }
        }
    };
}

named_enum! {
    /// How a texture is filtered when sampled.
    ///
    /// The `Comparison*` variants compare the sampled value against a
    /// reference value before filtering (used for shadow maps).
    pub enum TextureFilter {
        Point = 0x00,
        MinMagPointMipLinear = 0x01,
        MinPointMagLinearMipPoint = 0x04,
        MinPointMagMipLinear = 0x05,
        MinLinearMagMipPoint = 0x10,
        MinLinearMagPointMipLinear = 0x11,
        MinMagLinearMipPoint = 0x14,
        #[default]
        Linear = 0x15,
        Anisotropic = 0x55,
        ComparisonPoint = 0x80,
        ComparisonMinMagPointMipLinear = 0x81,
        ComparisonMinPointMagLinearMipPoint = 0x84,
        ComparisonMinPointMagMipLinear = 0x85,
        ComparisonMinLinearMagMipPoint = 0x90,
        ComparisonMinLinearMagPointMipLinear = 0x91,
        ComparisonMinMagLinearMipPoint = 0x94,
        ComparisonLinear = 0x95,
        ComparisonAnisotropic = 0xd5,
    }
}

impl TextureFilter {
    pub const fn is_comparison(self) -> bool {
        self.raw() & 0x80 != 0
    }
}

named_enum! {
    /// How texture coordinates outside of `[0, 1]` are resolved.
    pub enum TextureAddressMode {
        /// Tile the texture.
        #[default]
        Wrap = 1,
        /// Tile the texture, flipping it at every boundary.
        Mirror = 2,
        /// Use the color at the nearest edge.
        Clamp = 3,
        /// Use the sampler's border color.
        Border = 4,
        /// Mirror once around 0, then clamp.
        MirrorOnce = 5,
    }
}

/// The sampler settings a shader uses when sampling a texture parameter.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct SamplerParameter {
    /// The texture filtering mode.
    pub filtering: TextureFilter,

    /// The address mode along the horizontal texture axis.
    pub address_mode_u: TextureAddressMode,

    /// The address mode along the vertical texture axis.
    pub address_mode_v: TextureAddressMode,
}

impl SamplerParameter {
    pub fn new(
        filtering: TextureFilter,
        address_mode_u: TextureAddressMode,
        address_mode_v: TextureAddressMode,
    ) -> Self {
        Self {
            filtering,
            address_mode_u,
            address_mode_v,
        }
    }

    /// Parses `filter,u,v` (e.g. `Point, Clamp, Wrap`). Trailing settings may
    /// be left out, in which case they keep their defaults.
    pub fn parse_text(text: &str) -> Result<Self, String> {
        let mut sampler = Self::default();
        let mut parts = text.split(',');

        if let Some(filtering) = parts.next() {
            sampler.filtering = filtering.parse()?;
        }
        if let Some(u) = parts.next() {
            sampler.address_mode_u = u.parse()?;
        }
        if let Some(v) = parts.next() {
            sampler.address_mode_v = v.parse()?;
        }
        if parts.next().is_some() {
            return Err("expected at most 3 sampler settings".to_string());
        }

        Ok(sampler)
    }
}

impl Default for SamplerParameter {
    fn default() -> Self {
        Self::new(
            TextureFilter::Linear,
            TextureAddressMode::Wrap,
            TextureAddressMode::Wrap,
        )
    }
}

impl Display for SamplerParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.filtering, self.address_mode_u, self.address_mode_v
        )
    }
}
