// src/common/serde_utils.rs

use serde::{Deserialize, Deserializer};

// Distingue "campo ausente" (None, via #[serde(default)]) de "campo nulo" (Some(None)).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
