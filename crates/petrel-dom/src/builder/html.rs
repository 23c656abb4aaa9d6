//! HTML element builder
//!
//! [`ElementBuilder`] applies every operation directly to a live element, so
//! the chain has no deferred state; `build()` simply hands the element over.
//! Reactive bindings attach through [`crate::bind`] and live on the element
//! until it is unbound.

use petrel_reactive::Handler;

use crate::bind::{self, Observable};
use crate::dom::{Document, DomEvent, Element, EventType};
use crate::error::Result;
use crate::style::StyleDecl;
use crate::warn_log;

/// Fluent builder over a live DOM element.
///
/// ## Example
///
/// ```
/// use petrel_dom::builder::html::button;
///
/// let save = button()
/// 	.class("btn")
/// 	.attr("type", "submit")
/// 	.text("Save")
/// 	.build();
/// # let _ = save;
/// ```
pub struct ElementBuilder {
	element: Element,
}

impl ElementBuilder {
	/// Wrap an existing element.
	pub fn new(element: Element) -> Self {
		Self { element }
	}

	/// Add one or more space-separated class tokens. Calls accumulate;
	/// tokens already present are not duplicated.
	pub fn class(self, classes: &str) -> Self {
		for token in classes.split_ascii_whitespace() {
			self.element.add_class(token);
		}
		self
	}

	/// Set the id attribute.
	pub fn id(self, id: &str) -> Self {
		let _ = self.element.set_attribute("id", id);
		self
	}

	/// Set a custom attribute.
	pub fn attr(self, name: &str, value: &str) -> Self {
		let _ = self.element.set_attribute(name, value);
		self
	}

	/// Remove an attribute.
	pub fn remove_attr(self, name: &str) -> Self {
		self.element.remove_attribute(name);
		self
	}

	/// Resolve a style declaration and add its class.
	///
	/// Structurally identical declarations share a class, so repeated
	/// components cost one stylesheet rule.
	pub fn style(self, style: &StyleDecl) -> Self {
		let class = style.resolve();
		self.element.add_class(class.as_str());
		self
	}

	/// Set text content, replacing all children.
	pub fn text(self, text: &str) -> Self {
		self.element.set_text_content(text);
		self
	}

	/// Append a child element.
	pub fn child(self, child: Element) -> Self {
		if self.element.append_child(&child).is_err() {
			warn_log!("failed to append <{}> child", child.tag());
		}
		self
	}

	/// Append every element in an iterator.
	pub fn children(self, children: impl IntoIterator<Item = Element>) -> Self {
		children.into_iter().fold(self, Self::child)
	}

	// ------------------------------------------------------------------
	// Reactive bindings
	// ------------------------------------------------------------------

	/// Bind text content to a string stream.
	pub fn bind_text(self, source: &impl Observable<String>) -> Self {
		if let Err(err) = bind::bind_text(&self.element, source) {
			warn_log!("bind_text failed: {err}");
		}
		self
	}

	/// Bind an attribute to a stream through a formatting function.
	pub fn bind_attr<T: Clone + 'static>(
		self,
		name: &str,
		source: &impl Observable<T>,
		format: impl Fn(&T) -> Option<String> + 'static,
	) -> Self {
		if let Err(err) = bind::bind_attr(&self.element, name, source, format) {
			warn_log!("bind_attr({name}) failed: {err}");
		}
		self
	}

	/// Bind one class token to a stream.
	pub fn bind_class<T: Clone + 'static>(
		self,
		source: &impl Observable<T>,
		class_of: impl Fn(&T) -> Option<String> + 'static,
	) -> Self {
		if let Err(err) = bind::bind_class(&self.element, source, class_of) {
			warn_log!("bind_class failed: {err}");
		}
		self
	}

	/// Bind the checked state to a boolean stream.
	pub fn bind_checked(self, source: &impl Observable<bool>) -> Self {
		if let Err(err) = bind::bind_checked(&self.element, source) {
			warn_log!("bind_checked failed: {err}");
		}
		self
	}

	/// Bind the disabled attribute to a boolean stream.
	pub fn bind_disabled(self, source: &impl Observable<bool>) -> Self {
		if let Err(err) = bind::bind_disabled(&self.element, source) {
			warn_log!("bind_disabled failed: {err}");
		}
		self
	}

	// ------------------------------------------------------------------
	// Event wiring
	// ------------------------------------------------------------------

	/// Register an event listener closure. The listener is owned by the
	/// element and removed when it is unbound.
	pub fn on(self, event_type: EventType, callback: impl FnMut(DomEvent) + 'static) -> Self {
		self.element.listen(event_type, callback);
		self
	}

	/// Wire a store handler to an event.
	pub fn on_handler(self, event_type: EventType, handler: Handler<DomEvent>) -> Self {
		self.on(event_type, move |event| handler.call(event))
	}

	/// Wire a store handler to click events.
	#[inline]
	pub fn on_click(self, handler: Handler<DomEvent>) -> Self {
		self.on_handler(EventType::Click, handler)
	}

	/// Wire a store handler to input events.
	#[inline]
	pub fn on_input(self, handler: Handler<DomEvent>) -> Self {
		self.on_handler(EventType::Input, handler)
	}

	/// Wire a store handler to change events.
	#[inline]
	pub fn on_change(self, handler: Handler<DomEvent>) -> Self {
		self.on_handler(EventType::Change, handler)
	}

	/// Wire a store handler to submit events.
	#[inline]
	pub fn on_submit(self, handler: Handler<DomEvent>) -> Self {
		self.on_handler(EventType::Submit, handler)
	}

	/// Finalize the builder and return the element.
	pub fn build(self) -> Element {
		self.element
	}
}

// ============================================================================
// Helper functions for common HTML elements
// ============================================================================

/// Create a builder for an arbitrary tag.
///
/// # Errors
///
/// Fails when the DOM environment cannot create the element (no document on
/// wasm, or an invalid tag name).
pub fn try_element(tag: &str) -> Result<ElementBuilder> {
	let document = Document::global()?;
	Ok(ElementBuilder::new(document.create_element(tag)?))
}

/// Create a builder for an arbitrary tag.
///
/// # Panics
///
/// Panics if the element cannot be created. Creating a standard HTML element
/// only fails when the browser environment itself is unusable, which is not
/// a recoverable state for a UI.
pub fn element(tag: &str) -> ElementBuilder {
	match try_element(tag) {
		Ok(builder) => builder,
		Err(err) => panic!("failed to create <{tag}> element: {err}"),
	}
}

/// Macro for defining HTML element creation functions
macro_rules! define_element {
	($(#[$meta:meta])* $name:ident, $tag:literal) => {
		$(#[$meta])*
		pub fn $name() -> ElementBuilder {
			element($tag)
		}
	};
}

define_element!(
	/// Create a `<div>` element.
	div, "div"
);

define_element!(
	/// Create a `<span>` element.
	span, "span"
);

define_element!(
	/// Create a `<p>` element.
	p, "p"
);

define_element!(
	/// Create a `<button>` element.
	///
	/// ## Example
	///
	/// ```
	/// use petrel_dom::builder::html::button;
	/// use petrel_reactive::Store;
	///
	/// let count = Store::new(0);
	/// let bump = count.handle(|n, _event| *n += 1);
	/// let el = button().text("Increment").on_click(bump).build();
	/// # let _ = el;
	/// ```
	button, "button"
);

define_element!(
	/// Create an `<input>` element.
	input, "input"
);

define_element!(
	/// Create a `<textarea>` element.
	textarea, "textarea"
);

define_element!(
	/// Create a `<select>` element.
	select, "select"
);

define_element!(
	/// Create an `<option>` element.
	option, "option"
);

define_element!(
	/// Create a `<form>` element.
	form, "form"
);

define_element!(
	/// Create an `<a>` element.
	a, "a"
);

define_element!(
	/// Create a `<label>` element.
	label, "label"
);

define_element!(
	/// Create a `<ul>` element.
	ul, "ul"
);

define_element!(
	/// Create an `<ol>` element.
	ol, "ol"
);

define_element!(
	/// Create an `<li>` element.
	li, "li"
);

define_element!(
	/// Create an `<h1>` element.
	h1, "h1"
);

define_element!(
	/// Create an `<h2>` element.
	h2, "h2"
);

define_element!(
	/// Create an `<h3>` element.
	h3, "h3"
);

define_element!(
	/// Create a `<section>` element.
	section, "section"
);

define_element!(
	/// Create a `<header>` element.
	header, "header"
);

define_element!(
	/// Create a `<footer>` element.
	footer, "footer"
);

define_element!(
	/// Create a `<nav>` element.
	nav, "nav"
);

define_element!(
	/// Create an `<img>` element.
	img, "img"
);

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use petrel_reactive::Store;

	use super::*;
	use crate::dom::EventType;

	#[test]
	fn fluent_chain_builds_expected_tree() {
		let el = div()
			.class("card shadowed")
			.attr("data-role", "summary")
			.child(h2().text("Title").build())
			.child(p().text("Body").build())
			.build();

		assert_eq!(
			el.outer_html(),
			"<div class=\"card shadowed\" data-role=\"summary\"><h2>Title</h2><p>Body</p></div>"
		);
	}

	#[test]
	fn class_calls_accumulate_tokens() {
		let el = span().class("a b").class("b c").build();
		assert_eq!(el.get_attribute("class").as_deref(), Some("a b c"));
	}

	#[test]
	fn click_handler_drives_the_store() {
		let count = Store::new(0);
		let bump = count.handle(|n, _event| *n += 1);
		let el = button().text("go").on_click(bump).build();

		el.fire(EventType::Click);
		el.fire(EventType::Click);
		assert_eq!(count.get(), 2);
	}

	#[test]
	fn bound_text_tracks_a_derived_store() {
		let count = Store::new(0);
		let label = count.map(|n| format!("count: {n}"));
		let el = span().bind_text(&label).build();
		assert_eq!(el.outer_html(), "<span>count: 0</span>");

		count.set(7);
		assert_eq!(el.outer_html(), "<span>count: 7</span>");
	}
}
