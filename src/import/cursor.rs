//! A path-tracking reader over `serde_json::Value` input trees.
//!
//! Both importers descend through opaque parse-tree values; the cursor keeps
//! the root-to-node path alongside each value so every error can name the
//! node it failed on.

use serde_json::Value;

use crate::import::error::{ImportError, NodePath, PathSegment};

/// A value plus the path that reached it.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    /// The value under the cursor.
    pub value: &'a Value,
    /// Path from the input root.
    pub path: NodePath,
}

impl<'a> Cursor<'a> {
    /// A cursor at the input root.
    pub fn root(value: &'a Value) -> Self {
        Self {
            value,
            path: NodePath::root(),
        }
    }

    /// Descends one segment to the given value.
    pub fn at(&self, segment: PathSegment, value: &'a Value) -> Cursor<'a> {
        Cursor {
            value,
            path: self.path.child(segment),
        }
    }

    /// A `Schema` error at this cursor.
    pub fn schema(&self, message: impl Into<String>) -> ImportError {
        ImportError::schema(self.path.clone(), message)
    }

    /// An `UnsupportedConstruct` error at this cursor.
    pub fn unsupported(&self, message: impl Into<String>) -> ImportError {
        ImportError::unsupported(self.path.clone(), message)
    }

    /// The value as an array.
    pub fn elements(&self) -> Result<Vec<Cursor<'a>>, ImportError> {
        let items = self
            .value
            .as_array()
            .ok_or_else(|| self.schema("expected an array"))?;
        Ok(items
            .iter()
            .enumerate()
            .map(|(i, v)| self.at(PathSegment::Index(i), v))
            .collect())
    }

    /// The value as an array of exactly `n` elements.
    pub fn tuple(&self, n: usize) -> Result<Vec<Cursor<'a>>, ImportError> {
        let items = self.elements()?;
        if items.len() != n {
            return Err(self.schema(format!("expected {n} elements, found {}", items.len())));
        }
        Ok(items)
    }

    /// The value as a `[tag, payload]` pair.
    pub fn tagged(&self) -> Result<(&'a str, Cursor<'a>), ImportError> {
        let items = self
            .value
            .as_array()
            .ok_or_else(|| self.schema("expected a [tag, payload] node"))?;
        if items.len() != 2 {
            return Err(self.schema(format!(
                "expected a [tag, payload] node, found {} elements",
                items.len()
            )));
        }
        let tag = items[0]
            .as_str()
            .ok_or_else(|| self.schema("node tag must be a string"))?;
        Ok((tag, self.at(PathSegment::Tag(tag.to_owned()), &items[1])))
    }

    /// A required object field.
    pub fn field(&self, name: &'static str) -> Result<Cursor<'a>, ImportError> {
        self.opt_field(name)
            .ok_or_else(|| self.schema(format!("missing field `{name}`")))
    }

    /// An optional object field; absent and `null` are both `None`.
    pub fn opt_field(&self, name: &'static str) -> Option<Cursor<'a>> {
        let object = self.value.as_object()?;
        let value = object.get(name)?;
        if value.is_null() {
            return None;
        }
        Some(self.at(PathSegment::Field(name), value))
    }

    /// The value as a string.
    pub fn str(&self) -> Result<&'a str, ImportError> {
        self.value
            .as_str()
            .ok_or_else(|| self.schema("expected a string"))
    }

    /// The value as a non-negative integer.
    pub fn u32(&self) -> Result<u32, ImportError> {
        self.value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| self.schema("expected a non-negative integer"))
    }

    /// The value as a bool.
    pub fn bool(&self) -> Result<bool, ImportError> {
        self.value
            .as_bool()
            .ok_or_else(|| self.schema("expected a bool"))
    }

    /// A source line number: a non-negative integer, or `null`/`-1` for
    /// "not recorded".
    pub fn line(&self) -> Result<Option<u32>, ImportError> {
        if self.value.is_null() {
            return Ok(None);
        }
        if let Some(n) = self.value.as_i64() {
            if n < 0 {
                return Ok(None);
            }
            if let Ok(line) = u32::try_from(n) {
                return Ok(Some(line));
            }
        }
        Err(self.schema("expected a line number or null"))
    }
}
