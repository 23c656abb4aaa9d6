//! Error types for the render engine

use thiserror::Error;

/// Error type for rendering and mounting operations.
///
/// Invalid style declarations are a type-level concern and never show up
/// here; what does is the environment (no window/document on wasm), DOM
/// failures, and caller contract violations such as a bound component
/// rendered without its store.
#[derive(Debug, Error)]
pub enum RenderError {
	/// Window object not available.
	#[error("window object not available")]
	NoWindow,

	/// Document object not available.
	#[error("document object not available")]
	NoDocument,

	/// The mount target selector matched nothing.
	#[error("mount target not found: {0}")]
	TargetNotFound(String),

	/// Failed to create an element.
	#[error("failed to create <{0}> element")]
	CreateElement(String),

	/// Failed to set an attribute.
	#[error("failed to set attribute {0:?}")]
	SetAttribute(String),

	/// Failed to append a child node.
	#[error("failed to append child node")]
	AppendChild,

	/// A component was configured without a store it requires.
	#[error("missing required store: {0}")]
	MissingStore(String),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
