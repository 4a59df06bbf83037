//! Import error contracts.

use std::fmt;

use thiserror::Error;

/// Stable import error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ImportErrorKind {
    /// The input value does not match the expected shape for its dialect:
    /// unknown tag, missing field, or mistyped field.
    #[error("schema mismatch")]
    Schema,
    /// A recognized construct has no reconciling mapping in the canonical
    /// tree.
    #[error("unsupported construct")]
    UnsupportedConstruct,
    /// The input tree is nested deeper than the configured bound.
    #[error("depth limit exceeded")]
    DepthExceeded,
}

/// Import error payload.
///
/// The path names the offending node from the root so a failing conversion
/// is diagnosable without re-walking the input by hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {path}: {message}")]
pub struct ImportError {
    /// Error category.
    pub kind: ImportErrorKind,
    /// Path from the input root to the offending node.
    pub path: NodePath,
    /// Human-readable error summary.
    pub message: String,
}

impl ImportError {
    /// Creates an import error.
    pub fn new(kind: ImportErrorKind, path: NodePath, message: impl Into<String>) -> Self {
        Self {
            kind,
            path,
            message: message.into(),
        }
    }

    /// Creates a `Schema` error.
    pub fn schema(path: NodePath, message: impl Into<String>) -> Self {
        Self::new(ImportErrorKind::Schema, path, message)
    }

    /// Creates an `UnsupportedConstruct` error.
    pub fn unsupported(path: NodePath, message: impl Into<String>) -> Self {
        Self::new(ImportErrorKind::UnsupportedConstruct, path, message)
    }

    /// Creates a `DepthExceeded` error.
    pub fn depth_exceeded(path: NodePath, limit: usize) -> Self {
        Self::new(
            ImportErrorKind::DepthExceeded,
            path,
            format!("input nesting exceeds the configured bound of {limit}"),
        )
    }
}

/// One step of a [`NodePath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Descent through a tagged node.
    Tag(String),
    /// Descent through a named field.
    Field(&'static str),
    /// Descent through an array element.
    Index(usize),
}

/// Path from the input root to a node, rendered like `$.If.cond[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a copy of this path extended by one segment.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// The path's segments, root first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Tag(tag) => write!(f, ".{tag}")?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}
