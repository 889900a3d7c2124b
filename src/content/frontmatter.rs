//! Front-matter parsing

use indexmap::IndexMap;
use serde::de::{DeserializeSeed, Deserializer, MapAccess, Visitor};
use serde::Serialize;
use serde_yaml::Value;
use std::fmt;
use thiserror::Error;

/// Errors raised while reading a front-matter block
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("Invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Front-matter must be a mapping of keys to values")]
    NotAMapping,

    #[error("Unsupported front-matter key: {0}")]
    UnsupportedKey(String),

    #[error("Unsupported value for `{0}`: expected a string or a list of strings")]
    UnsupportedValue(String),
}

/// Front-matter of a markdown document.
///
/// Every key maps to zero or more string values: a scalar becomes one value,
/// a list becomes one value per element and an empty value becomes none.
/// Key order follows the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, Vec<String>>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start();

        let Some((yaml_content, remaining)) = split_yaml_block(content) else {
            return Ok((FrontMatter::default(), content));
        };

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A `---` fenced block of prose is a markdown rule, not front-matter
        if !looks_like_yaml(yaml_content) {
            return Ok((FrontMatter::default(), content));
        }

        let front_matter = Self::from_yaml(yaml_content)?;
        Ok((front_matter, remaining))
    }

    /// Normalize a YAML document into front-matter fields.
    ///
    /// Scalars keep their source text: `date: 2024.10` stays `2024.10`.
    pub fn from_yaml(yaml: &str) -> Result<Self, FrontMatterError> {
        // Typed pass: validate the shape of every field
        let mapping = match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(FrontMatter::default()),
            _ => return Err(FrontMatterError::NotAMapping),
        };

        let mut shapes = Vec::with_capacity(mapping.len());
        for (key, value) in &mapping {
            if !is_scalar(key) {
                return Err(FrontMatterError::UnsupportedKey(key_label(key)));
            }
            let shape = field_shape(value)
                .ok_or_else(|| FrontMatterError::UnsupportedValue(key_label(key)))?;
            shapes.push(shape);
        }

        // Text pass: read scalars as strings so nothing is re-formatted
        let deserializer = serde_yaml::Deserializer::from_str(yaml);
        let fields = FieldsSeed { shapes: &shapes }.deserialize(deserializer)?;

        Ok(Self { fields })
    }

    /// All values of a key, if the key is present
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    /// The value of a key that holds exactly one value
    pub fn single(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            [value] => Some(value.as_str()),
            _ => None,
        }
    }

    /// Set the values of a key, replacing any previous ones
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.fields.insert(key.into(), values);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Split `---` fenced YAML from the rest of the content.
/// Both fences must sit on their own line.
fn split_yaml_block(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let remaining = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((yaml, remaining));
        }
        offset += line.len();
    }

    None
}

/// Whether a fenced block has at least one `key: value` line
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        // Keys are plain identifiers; `https:` and friends are prose
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

/// How a field's values are read in the text pass
#[derive(Debug, Clone, Copy)]
enum FieldShape {
    /// A scalar or null
    Single,
    /// A list of scalars and nulls
    List,
}

fn field_shape(value: &Value) -> Option<FieldShape> {
    match value {
        Value::Sequence(items) if items.iter().all(is_scalar) => Some(FieldShape::List),
        Value::Sequence(_) => None,
        other if is_scalar(other) => Some(FieldShape::Single),
        _ => None,
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => format!("{:?}", other),
    }
}

/// Reads a front-matter mapping whose field shapes are already known.
/// Nulls, alone or inside a list, contribute no value.
struct FieldsSeed<'a> {
    shapes: &'a [FieldShape],
}

impl<'de, 'a> DeserializeSeed<'de> for FieldsSeed<'a> {
    type Value = IndexMap<String, Vec<String>>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de, 'a> Visitor<'de> for FieldsSeed<'a> {
    type Value = IndexMap<String, Vec<String>>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a mapping of keys to strings or lists of strings")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut fields = IndexMap::with_capacity(self.shapes.len());
        for shape in self.shapes {
            let Some(key) = map.next_key::<String>()? else {
                break;
            };
            let values = match shape {
                FieldShape::Single => map.next_value::<Option<String>>()?.into_iter().collect(),
                FieldShape::List => map
                    .next_value::<Vec<Option<String>>>()?
                    .into_iter()
                    .flatten()
                    .collect(),
            };
            fields.insert(key, values);
        }
        Ok(fields)
    }
}
