// src/models/mod.rs

pub mod activity;
pub mod attempt;
pub mod class;
pub mod exercise_list;
pub mod question;
pub mod user;

use serde::{Deserialize, Deserializer, Serializer};

/// Deserializes a missing or `null` array as empty.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Writes whole percentages as integers (`100`, not `100.0`), the way the
/// frontend's JSON encoder prints numbers.
pub(crate) fn js_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // 2^53: beyond it an f64 no longer maps to a unique integer
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
