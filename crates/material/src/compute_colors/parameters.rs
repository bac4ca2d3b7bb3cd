use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use super::{ComputeColorParameter, ParameterError, ParameterValue};

/// The named inputs of a compute-color node, keyed by the name of the shader
/// argument each one feeds.
///
/// Entries are kept sorted by name so iteration and the persisted form are
/// deterministic.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ComputeColorParameters {
    entries: BTreeMap<String, ComputeColorParameter>,
}

impl ComputeColorParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, returning the one it replaced (if any).
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        param: impl Into<ComputeColorParameter>,
    ) -> Option<ComputeColorParameter> {
        let name = name.into();
        let param = param.into();
        let new_kind = param.kind();

        let replaced = self.entries.insert(name.clone(), param);
        match &replaced {
            Some(old) if old.kind() != new_kind => log::warn!(
                "Parameter '{name}' changed kind from {} to {new_kind}",
                old.kind()
            ),
            Some(_) => log::trace!("Parameter '{name}' replaced"),
            None => log::trace!("Parameter '{name}' added as {new_kind}"),
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&ComputeColorParameter> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ComputeColorParameter> {
        self.entries.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ComputeColorParameter> {
        let removed = self.entries.remove(name);
        if removed.is_some() {
            log::trace!("Parameter '{name}' removed");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, parameter)` pairs in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ComputeColorParameter> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The name of the first parameter holding a `NaN` or infinite float.
    pub fn first_non_finite(&self) -> Option<&str> {
        self.iter()
            .find(|(_, param)| !param.is_finite())
            .map(|(name, _)| name.as_str())
    }

    /// Look up the plain value of a parameter, checking that it has the
    /// expected kind.
    pub fn value<T: ParameterValue>(&self, name: &str) -> Result<&T, ParameterError> {
        let param = self
            .get(name)
            .ok_or_else(|| ParameterError::Missing(name.to_string()))?;

        T::from_parameter(param).ok_or_else(|| ParameterError::KindMismatch {
            name: name.to_string(),
            expected: T::KIND,
            actual: param.kind(),
        })
    }

    pub fn value_mut<T: ParameterValue>(&mut self, name: &str) -> Result<&mut T, ParameterError> {
        let param = self
            .entries
            .get_mut(name)
            .ok_or_else(|| ParameterError::Missing(name.to_string()))?;

        let actual = param.kind();
        T::from_parameter_mut(param).ok_or_else(|| ParameterError::KindMismatch {
            name: name.to_string(),
            expected: T::KIND,
            actual,
        })
    }
}

impl<'a> IntoIterator for &'a ComputeColorParameters {
    type Item = (&'a String, &'a ComputeColorParameter);
    type IntoIter = btree_map::Iter<'a, String, ComputeColorParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N, P> FromIterator<(N, P)> for ComputeColorParameters
where
    N: Into<String>,
    P: Into<ComputeColorParameter>,
{
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, param) in iter {
            params.insert(name, param);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_colors::{
        Float3, Float3Parameter, FloatParameter, IntParameter, ParameterKind, SamplerParameter,
        TextureParameter,
    };

    fn material_inputs() -> ComputeColorParameters {
        let mut params = ComputeColorParameters::new();
        params.insert("Roughness", FloatParameter::new(0.4));
        params.insert("Tint", Float3Parameter::new(Float3::new(1.0, 0.9, 0.8)));
        params.insert("Layers", IntParameter::new(2));
        params.insert("Albedo", TextureParameter::default());
        params.insert("AlbedoSampler", SamplerParameter::default());
        params
    }

    #[test]
    fn insert_and_lookup() {
        let params = material_inputs();

        assert_eq!(params.len(), 5);
        assert!(params.contains("Tint"));
        assert!(!params.contains("tint"));
        assert_eq!(params.get("Layers").map(ComputeColorParameter::kind), Some(ParameterKind::Int));
        assert_eq!(params.value::<f32>("Roughness"), Ok(&0.4));
    }

    #[test]
    fn iteration_is_sorted_by_name() {
        let params = material_inputs();
        let names: Vec<_> = params.names().collect();
        assert_eq!(names, vec!["Albedo", "AlbedoSampler", "Layers", "Roughness", "Tint"]);
    }

    #[test]
    fn insert_returns_replaced_parameter() {
        let mut params = material_inputs();

        let replaced = params.insert("Roughness", FloatParameter::new(0.9));
        assert_eq!(replaced.and_then(|p| p.as_float()), Some(0.4));
        assert_eq!(params.value::<f32>("Roughness"), Ok(&0.9));

        let replaced = params.insert("Layers", FloatParameter::new(1.0));
        assert_eq!(replaced.map(|p| p.kind()), Some(ParameterKind::Int));
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn typed_lookup_errors() {
        let params = material_inputs();

        assert_eq!(
            params.value::<f32>("Metalness"),
            Err(ParameterError::Missing("Metalness".to_string()))
        );
        assert_eq!(
            params.value::<i32>("Roughness"),
            Err(ParameterError::KindMismatch {
                name: "Roughness".to_string(),
                expected: ParameterKind::Int,
                actual: ParameterKind::Float,
            })
        );
    }

    #[test]
    fn mutation_through_lookup() {
        let mut params = material_inputs();
        let copy = params.clone();

        *params.value_mut::<i32>("Layers").unwrap() = 4;
        params
            .get_mut("AlbedoSampler")
            .and_then(ComputeColorParameter::as_sampler_mut)
            .unwrap()
            .filtering = crate::compute_colors::TextureFilter::Point;

        assert_eq!(params.value::<i32>("Layers"), Ok(&4));
        assert_eq!(copy.value::<i32>("Layers"), Ok(&2));
        assert_eq!(
            copy.get("AlbedoSampler").and_then(ComputeColorParameter::as_sampler),
            Some(&SamplerParameter::default())
        );
        assert!(params.value_mut::<bool>("Layers").is_err());
    }

    #[test]
    fn remove_drops_the_entry() {
        let mut params = material_inputs();

        assert!(params.remove("Tint").is_some());
        assert!(params.remove("Tint").is_none());
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn serializes_as_a_map() {
        let params: ComputeColorParameters =
            [("Intensity", FloatParameter::new(2.0))].into_iter().collect();

        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"Intensity":{"ComputeColorParameterFloat":{"value":2.0}}}"#
        );

        let read: ComputeColorParameters =
            serde_json::from_str(&serde_json::to_string(&material_inputs()).unwrap()).unwrap();
        assert_eq!(read, material_inputs());
    }
}
