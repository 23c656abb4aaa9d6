//! Document access
//!
//! [`Document::global`] is the single place the crate touches the browser
//! globals, so the "no window" and "no document" failure modes surface as
//! [`RenderError`] values exactly once instead of being scattered through
//! the builder and mount layers.

use crate::error::Result;
#[cfg(target_arch = "wasm32")]
use crate::error::RenderError;

use super::element::Element;

/// Handle to the document the engine creates nodes in.
///
/// On wasm this wraps the real `web_sys::Document`. On native targets it is a
/// stateless factory for virtual elements, which keeps call sites identical
/// across backends.
#[derive(Clone)]
pub struct Document {
	#[cfg(target_arch = "wasm32")]
	inner: web_sys::Document,
}

impl Document {
	/// Look up the global document.
	///
	/// # Errors
	///
	/// On wasm, [`RenderError::NoWindow`] or [`RenderError::NoDocument`] when
	/// run outside a browsing context (for example a worker without DOM
	/// access). Infallible on native targets.
	pub fn global() -> Result<Self> {
		#[cfg(target_arch = "wasm32")]
		{
			let window = web_sys::window().ok_or(RenderError::NoWindow)?;
			let inner = window.document().ok_or(RenderError::NoDocument)?;
			Ok(Self { inner })
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			Ok(Self {})
		}
	}

	/// Create a detached element.
	pub fn create_element(&self, tag: &str) -> Result<Element> {
		#[cfg(target_arch = "wasm32")]
		{
			let node = self
				.inner
				.create_element(tag)
				.map_err(|_| RenderError::CreateElement(tag.to_owned()))?;
			Ok(Element::from_web_sys(node))
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			Element::create(tag)
		}
	}

	/// Create a detached text node.
	#[cfg(target_arch = "wasm32")]
	pub(crate) fn create_text_node(&self, text: &str) -> web_sys::Text {
		self.inner.create_text_node(text)
	}

	/// The `<body>` element.
	#[cfg(target_arch = "wasm32")]
	pub fn body(&self) -> Result<Element> {
		let body = self.inner.body().ok_or(RenderError::NoDocument)?;
		Ok(Element::from_web_sys(body.into()))
	}

	/// Find the first element matching a CSS selector.
	#[cfg(target_arch = "wasm32")]
	pub fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
		let found = self
			.inner
			.query_selector(selector)
			.map_err(|_| RenderError::TargetNotFound(selector.to_owned()))?;
		Ok(found.map(Element::from_web_sys))
	}

	/// Access the underlying `web_sys::Document`.
	#[cfg(target_arch = "wasm32")]
	pub fn as_web_sys(&self) -> &web_sys::Document {
		&self.inner
	}
}

impl core::fmt::Debug for Document {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Document").finish_non_exhaustive()
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;

	#[test]
	fn global_document_creates_elements() {
		let document = Document::global().unwrap();
		let el = document.create_element("section").unwrap();
		assert_eq!(el.tag(), "section");
	}
}
