//! Generic decoded rule tree: the shape rule sources take once read.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// One node of a decoded rule source.
///
/// A field such as `min` may be written either as an attribute or as a child
/// node carrying the value as text; [`RuleNode::field`] reads both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleNode {
    pub tag: String,
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "scalar_map"
    )]
    pub attributes: IndexMap<String, String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_text"
    )]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RuleNode>,
}

/// YAML and JSON sources may write numbers and booleans unquoted.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Str(s) => s,
        }
    }
}

fn scalar_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.into())).collect())
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

impl RuleNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: RuleNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Text payload, trimmed; `None` when absent or blank.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// The attribute `name`, else the text of the first child tagged `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.attr(name)
            .map(str::trim)
            .or_else(|| {
                self.children
                    .iter()
                    .find(|c| c.tag == name)
                    .and_then(RuleNode::text)
            })
    }

    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a RuleNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_prefers_attribute() {
        let node = RuleNode::new("hcp")
            .with_attr("min", 12)
            .with_child(RuleNode::new("min").with_text("15"))
            .with_child(RuleNode::new("max").with_text(" 17 "));
        assert_eq!(node.field("min"), Some("12"));
        assert_eq!(node.field("max"), Some("17"));
        assert_eq!(node.field("value"), None);
    }

    #[test]
    fn test_yaml_scalars_become_text() {
        let yaml = r#"
tag: hcp
attributes:
  min: 15
  max: 17.5
  strict: true
  name: opener
children:
  - tag: note
    text: 3
"#;
        let node: RuleNode = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(node.attr("min"), Some("15"));
        assert_eq!(node.attr("max"), Some("17.5"));
        assert_eq!(node.attr("strict"), Some("true"));
        assert_eq!(node.attr("name"), Some("opener"));
        assert_eq!(node.field("note"), Some("3"));
        let keys: Vec<&str> = node.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["min", "max", "strict", "name"]);
    }

    #[test]
    fn test_json_decode() {
        let json = r#"{"tag": "shape", "attributes": {"type": "general"}, "text": "balanced"}"#;
        let node: RuleNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.attr("type"), Some("general"));
        assert_eq!(node.text(), Some("balanced"));
        assert!(node.children.is_empty());
    }
}
