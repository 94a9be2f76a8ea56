use serde::{Deserialize, Deserializer};

/// Used together with `#[serde(default)]` to tell a field that is absent
/// (`None`) apart from a field that is explicitly `null` (`Some(None)`).
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
