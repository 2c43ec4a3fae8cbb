//! JSON encoding for `f64` values that may be infinite or NaN.
//!
//! serde_json writes non-finite floats as `null`, which cannot be read back
//! into an `f64`. Registers and variables go through these helpers instead:
//! finite values stay plain JSON numbers, the rest become the strings
//! `"NaN"`, `"inf"` and `"-inf"`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

fn to_repr(value: f64) -> Repr {
    if value.is_finite() {
        Repr::Number(value)
    } else if value.is_nan() {
        Repr::Text("NaN".to_string())
    } else if value > 0.0 {
        Repr::Text("inf".to_string())
    } else {
        Repr::Text("-inf".to_string())
    }
}

fn from_repr<E: serde::de::Error>(repr: Repr) -> Result<f64, E> {
    match repr {
        Repr::Number(value) => Ok(value),
        Repr::Text(text) => match text.as_str() {
            "NaN" => Ok(f64::NAN),
            "inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            other => Err(E::custom(format!("invalid float value '{}'", other))),
        },
    }
}

/// `#[serde(with = "float_json::array")]` for fixed-size register arrays
pub mod array {
    use super::*;

    pub fn serialize<S, const N: usize>(values: &[f64; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(values.iter().map(|v| to_repr(*v)))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[f64; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let reprs = Vec::<Repr>::deserialize(deserializer)?;
        if reprs.len() != N {
            return Err(serde::de::Error::invalid_length(reprs.len(), &"one value per register"));
        }
        let mut values = [0.0; N];
        for (slot, repr) in values.iter_mut().zip(reprs) {
            *slot = from_repr(repr)?;
        }
        Ok(values)
    }
}

/// `#[serde(with = "float_json::map")]` for keyed float storage
pub mod map {
    use super::*;

    pub fn serialize<S, K>(values: &BTreeMap<K, f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        K: Serialize,
    {
        serializer.collect_map(values.iter().map(|(k, v)| (k, to_repr(*v))))
    }

    pub fn deserialize<'de, D, K>(deserializer: D) -> Result<BTreeMap<K, f64>, D::Error>
    where
        D: Deserializer<'de>,
        K: DeserializeOwned + Ord,
    {
        BTreeMap::<K, Repr>::deserialize(deserializer)?
            .into_iter()
            .map(|(k, repr)| from_repr(repr).map(|v| (k, v)))
            .collect()
    }
}
