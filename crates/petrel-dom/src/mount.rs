//! Composition root
//!
//! Mounting attaches a built element tree to the document and hands back a
//! [`MountHandle`]. The handle is the single owner of the mounted tree's
//! lifetime: unmounting (or dropping the handle) first unbinds the whole
//! subtree, cancelling every store subscription and event listener beneath
//! it, then detaches the root node. After that no store emission reaches the
//! removed DOM.

use crate::debug_log;
use crate::dom::Element;
use crate::error::Result;

#[cfg(target_arch = "wasm32")]
use crate::dom::Document;
#[cfg(target_arch = "wasm32")]
use crate::error::RenderError;

/// Owner of a mounted subtree.
///
/// Keep the handle alive for as long as the UI should stay interactive.
pub struct MountHandle {
	root: Option<Element>,
}

impl MountHandle {
	/// The mounted root element, if still mounted.
	pub fn root(&self) -> Option<&Element> {
		self.root.as_ref()
	}

	/// Tear the subtree down now instead of at drop time.
	pub fn unmount(mut self) {
		self.teardown();
	}

	fn teardown(&mut self) {
		if let Some(root) = self.root.take() {
			// Unbind before detaching so no emission lands in between.
			root.unbind();
			root.remove();
			debug_log!("unmounted <{}> subtree", root.tag());
		}
	}
}

impl Drop for MountHandle {
	fn drop(&mut self) {
		self.teardown();
	}
}

impl core::fmt::Debug for MountHandle {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("MountHandle")
			.field("mounted", &self.root.is_some())
			.finish()
	}
}

/// Mount a built element into a parent element.
pub fn mount_into(root: Element, target: &Element) -> Result<MountHandle> {
	target.append_child(&root)?;
	debug_log!("mounted <{}> into <{}>", root.tag(), target.tag());
	Ok(MountHandle { root: Some(root) })
}

/// Mount a built element into the first node matching a CSS selector.
#[cfg(target_arch = "wasm32")]
pub fn mount(selector: &str, root: Element) -> Result<MountHandle> {
	let document = Document::global()?;
	let target = document
		.query_selector(selector)?
		.ok_or_else(|| RenderError::TargetNotFound(selector.to_owned()))?;
	mount_into(root, &target)
}

/// Mount a built element into `<body>`.
#[cfg(target_arch = "wasm32")]
pub fn mount_to_body(root: Element) -> Result<MountHandle> {
	let document = Document::global()?;
	let body = document.body()?;
	mount_into(root, &body)
}
