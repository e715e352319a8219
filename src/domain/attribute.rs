use std::fmt;

use crate::domain::error::{XmlError, XmlResult};

/// A `name="value"` pair attached to an element.
///
/// The name is trimmed and never empty. The value is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    /// Build an attribute, substituting `""` for a missing value.
    pub fn new(name: &str, value: Option<&str>) -> XmlResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(XmlError::InvalidArgument(
                "'name' parameter cannot be null nor empty".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            value: value.unwrap_or_default().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Unescaped `name="value"`.
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.name, self.value)
    }
}
