use serde::{Deserialize, Deserializer};

/// A terminal profile entry.
///
/// Only `path` and `source` take part in shell selection; any other keys an
/// editor stores alongside them (`args`, `icon`, `env`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "deserialize_path")]
    pub path: Option<String>,

    #[serde(default)]
    pub source: Option<String>,
}

impl Profile {
    #[must_use]
    pub fn explicit_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|path| !path.is_empty())
    }

    #[must_use]
    pub fn source_tag(&self) -> Option<&str> {
        self.source.as_deref().filter(|source| !source.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PathField {
    Single(String),
    Candidates(Vec<String>),
}

// Editors accept either a single path or a list of candidates.
fn deserialize_path<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<PathField>::deserialize(deserializer)?;
    Ok(match field {
        Some(PathField::Single(path)) => Some(path),
        Some(PathField::Candidates(paths)) => paths.into_iter().find(|path| !path.is_empty()),
        None => None,
    })
}
