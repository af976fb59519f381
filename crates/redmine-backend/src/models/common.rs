use serde::{Deserialize, Deserializer, Serialize};

/// Redmine `{id, name}` reference (project, user, activity)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct IdName {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Redmine bare `{id}` reference (issue)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct IdRef {
    #[serde(default)]
    pub id: u64,
}

/// Error body returned on failed requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorsResult {
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Redmine sends `null` for absent references; treat it like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
