use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One entry of the `subscribers` array of a dispatch request.
#[derive(Debug, Clone, Deserialize)]
pub struct Subscriber {
    pub email: String,
    #[serde(default, deserialize_with = "language_code")]
    pub language: Option<String>,
}

// Anything but a string means "no preference".
fn language_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_owned))
}
