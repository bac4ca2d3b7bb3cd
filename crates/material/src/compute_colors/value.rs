use serde::{Deserialize, Serialize};

use super::{ComputeColorParameter, ParameterKind};

/// A 2 component float vector.
pub type Float2 = glam::Vec2;
/// A 3 component float vector.
pub type Float3 = glam::Vec3;
/// A 4 component float vector.
pub type Float4 = glam::Vec4;

/// A parameter holding a single plain value.
///
/// A default constructed parameter holds `T::default()` (`false`, `0`, `0.0`,
/// a zero vector or an empty string), so there is never an uninitialized
/// value to read.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ValueParameter<T> {
    pub value: T,
}

impl<T> ValueParameter<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

pub type StringParameter = ValueParameter<String>;
pub type BoolParameter = ValueParameter<bool>;
pub type FloatParameter = ValueParameter<f32>;
pub type IntParameter = ValueParameter<i32>;
pub type Float2Parameter = ValueParameter<Float2>;
pub type Float3Parameter = ValueParameter<Float3>;
pub type Float4Parameter = ValueParameter<Float4>;

/// A type that can be stored in a [ValueParameter] and therefore in a
/// [ComputeColorParameter].
pub trait ParameterValue: Sized + Default {
    /// The kind of parameter wrapping this value.
    const KIND: ParameterKind;

    /// Borrow the value if `param` is a [ValueParameter] of this type.
    fn from_parameter(param: &ComputeColorParameter) -> Option<&Self>;

    /// Mutably borrow the value if `param` is a [ValueParameter] of this type.
    fn from_parameter_mut(param: &mut ComputeColorParameter) -> Option<&mut Self>;

    /// Wrap the value parameter in the matching [ComputeColorParameter]
    /// variant.
    fn into_parameter(param: ValueParameter<Self>) -> ComputeColorParameter;

    /// Parse the value from the text an editor would show for it.
    fn parse_text(text: &str) -> Result<Self, String>;
}

impl<T: ParameterValue> From<ValueParameter<T>> for ComputeColorParameter {
    fn from(param: ValueParameter<T>) -> Self {
        T::into_parameter(param)
    }
}

macro_rules! impl_parameter_value {
    ($ty:ty, $variant:ident, |$text:ident| $parse:expr) => {
        impl ParameterValue for $ty {
            const KIND: ParameterKind = ParameterKind::$variant;

            fn from_parameter(param: &ComputeColorParameter) -> Option<&Self> {
                match param {
                    ComputeColorParameter::$variant(p) => Some(&p.value),
                    _ => None,
                }
            }

            fn from_parameter_mut(param: &mut ComputeColorParameter) -> Option<&mut Self> {
                match param {
                    ComputeColorParameter::$variant(p) => Some(&mut p.value),
                    _ => None,
                }
            }

            fn into_parameter(param: ValueParameter<Self>) -> ComputeColorParameter {
                ComputeColorParameter::$variant(param)
            }

            fn parse_text($text: &str) -> Result<Self, String> {
                $parse
            }
        }
    };
}

impl_parameter_value!(String, String, |text| Ok(text.to_owned()));
impl_parameter_value!(bool, Bool, |text| text
    .trim()
    .parse::<bool>()
    .map_err(|e| e.to_string()));
impl_parameter_value!(f32, Float, |text| parse_finite(text));
impl_parameter_value!(i32, Int, |text| text
    .trim()
    .parse::<i32>()
    .map_err(|e| e.to_string()));
impl_parameter_value!(Float2, Float2, |text| parse_components::<2>(text)
    .map(Float2::from_array));
impl_parameter_value!(Float3, Float3, |text| parse_components::<3>(text)
    .map(Float3::from_array));
impl_parameter_value!(Float4, Float4, |text| parse_components::<4>(text)
    .map(Float4::from_array));

/// Parses a float, rejecting `NaN` and infinities (JSON can't hold them).
fn parse_finite(text: &str) -> Result<f32, String> {
    let value = text.trim().parse::<f32>().map_err(|e| e.to_string())?;
    if !value.is_finite() {
        return Err(format!("{value} is not a finite number"));
    }
    Ok(value)
}

/// Parses exactly `N` comma separated floats (e.g. `1, 0.5, 2`).
fn parse_components<const N: usize>(text: &str) -> Result<[f32; N], String> {
    let mut components = [0.0; N];
    let mut count = 0;

    for part in text.split(',') {
        if count == N {
            return Err(format!("expected {N} components, got more"));
        }
        components[count] =
            parse_finite(part).map_err(|e| format!("component {}: {e}", count + 1))?;
        count += 1;
    }

    if count != N {
        return Err(format!("expected {N} components, got {count}"));
    }
    Ok(components)
}
