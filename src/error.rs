//! Error types.
//!
//! One enum per concern. Test-harness errors live in [`crate::testing`].

use thiserror::Error;

/// A style token could not be converted into a typed value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    /// Not a keyword curve and not a well-formed `cubic-bezier(x1, y1, x2, y2)`.
    #[error("Invalid value for animation: {0}")]
    InvalidAnimationValue(String),

    #[error("invalid length: {0:?}")]
    InvalidLength(String),

    #[error("invalid grid item spec: {0:?}")]
    InvalidItemSpec(String),

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// A keyword outside the allowed set, e.g. `dock="Middle"`.
    #[error("invalid {kind} value: {value:?}")]
    InvalidKeyword { kind: &'static str, value: String },
}

/// An XML fragment could not be turned into a view tree.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("malformed xml: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("unknown element <{0}>")]
    UnknownElement(String),

    #[error("<{tag}> cannot have child elements")]
    ChildrenNotAllowed { tag: &'static str },

    #[error("attribute {name}={value:?} on <{tag}>: {source}")]
    InvalidAttribute {
        tag: &'static str,
        name: String,
        value: String,
        #[source]
        source: StyleError,
    },
}

/// The layout pass failed.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("taffy: {0}")]
    Taffy(#[from] taffy::TaffyError),

    #[error("view {0} is not allocated")]
    UnknownView(usize),

    /// A failure recorded by the layout derived.
    #[error("layout pass failed: {0}")]
    Failed(String),
}

/// A device profile could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid device profile: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid device profile: {0}")]
    Invalid(String),
}
