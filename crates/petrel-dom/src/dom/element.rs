//! Dual-backend element handle
//!
//! [`Element`] is the node type the whole engine operates on. On wasm targets
//! it wraps a real `web_sys::Element`; on native targets it is a lightweight
//! virtual node (tag, attributes, children) that renders to an HTML string,
//! which is what the integration tests and server-side stylesheet checks use.
//!
//! Independent of backend, every element owns its reactive bindings and event
//! handles. Removing a subtree and calling [`Element::unbind`] drops them,
//! which cancels every subscription beneath the subtree - the teardown
//! guarantee the binding layer is built on.

use core::cell::RefCell;
use std::rc::{Rc, Weak};

use petrel_reactive::Subscription;

use crate::error::Result;
#[cfg(target_arch = "wasm32")]
use crate::error::RenderError;

use super::event::{DomEvent, EventHandle, EventType};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(not(target_arch = "wasm32"))]
use core::cell::Cell;

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
	static NEXT_LISTENER_ID: Cell<u64> = const { Cell::new(1) };
}

/// One registered native listener. `callback` is taken out of the slot while
/// it runs so a listener may mutate the element it is attached to.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) struct ListenerEntry {
	pub(crate) id: u64,
	pub(crate) event_type: EventType,
	pub(crate) callback: Option<Box<dyn FnMut(DomEvent)>>,
}

enum ChildNode {
	Element(Element),
	Text(TextNode),
}

struct ElementState {
	#[cfg(not(target_arch = "wasm32"))]
	tag: String,
	#[cfg(not(target_arch = "wasm32"))]
	attrs: RefCell<Vec<(String, String)>>,
	/// Mirror of element children, used for recursive unbind (and, on the
	/// native backend, for HTML rendering).
	children: RefCell<Vec<ChildNode>>,
	parent: RefCell<Weak<ElementState>>,
	bindings: RefCell<Vec<Subscription>>,
	handles: RefCell<Vec<EventHandle>>,
	#[cfg(not(target_arch = "wasm32"))]
	listeners: Rc<RefCell<Vec<ListenerEntry>>>,
}

impl ElementState {
	fn new(#[allow(unused_variables)] tag: &str) -> Rc<Self> {
		Rc::new(Self {
			#[cfg(not(target_arch = "wasm32"))]
			tag: tag.to_owned(),
			#[cfg(not(target_arch = "wasm32"))]
			attrs: RefCell::new(Vec::new()),
			children: RefCell::new(Vec::new()),
			parent: RefCell::new(Weak::new()),
			bindings: RefCell::new(Vec::new()),
			handles: RefCell::new(Vec::new()),
			#[cfg(not(target_arch = "wasm32"))]
			listeners: Rc::new(RefCell::new(Vec::new())),
		})
	}
}

/// A live DOM element handle.
///
/// Cloning is cheap and clones refer to the same node. The handle owns the
/// node's reactive bindings and event listeners; see [`Element::unbind`].
#[derive(Clone)]
pub struct Element {
	#[cfg(target_arch = "wasm32")]
	node: web_sys::Element,
	state: Rc<ElementState>,
}

impl Element {
	/// Create a detached element. Prefer [`Document::create_element`]
	/// (or the builder DSL) over calling this directly.
	///
	/// [`Document::create_element`]: super::document::Document::create_element
	pub fn create(tag: &str) -> Result<Self> {
		#[cfg(target_arch = "wasm32")]
		{
			let document = super::document::Document::global()?;
			document.create_element(tag)
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			Ok(Self {
				state: ElementState::new(tag),
			})
		}
	}

	#[cfg(target_arch = "wasm32")]
	pub(crate) fn from_web_sys(node: web_sys::Element) -> Self {
		let tag = node.tag_name().to_ascii_lowercase();
		Self {
			node,
			state: ElementState::new(&tag),
		}
	}

	/// Access the underlying `web_sys::Element`.
	#[cfg(target_arch = "wasm32")]
	pub fn as_web_sys(&self) -> &web_sys::Element {
		&self.node
	}

	/// The element's tag name, lowercase.
	pub fn tag(&self) -> String {
		#[cfg(target_arch = "wasm32")]
		{
			self.node.tag_name().to_ascii_lowercase()
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			self.state.tag.clone()
		}
	}

	/// Downgrade to a weak handle. Binding closures hold these so a dangling
	/// subscription can never keep a removed subtree alive.
	pub fn downgrade(&self) -> WeakElement {
		WeakElement {
			#[cfg(target_arch = "wasm32")]
			node: self.node.clone(),
			state: Rc::downgrade(&self.state),
		}
	}

	// ------------------------------------------------------------------
	// Attributes and classes
	// ------------------------------------------------------------------

	/// Set an attribute.
	pub fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
		#[cfg(target_arch = "wasm32")]
		{
			self.node
				.set_attribute(name, value)
				.map_err(|_| RenderError::SetAttribute(name.to_owned()))
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			let mut attrs = self.state.attrs.borrow_mut();
			match attrs.iter_mut().find(|(n, _)| n == name) {
				Some((_, v)) => *v = value.to_owned(),
				None => attrs.push((name.to_owned(), value.to_owned())),
			}
			Ok(())
		}
	}

	/// Remove an attribute. Removing an absent attribute is a no-op.
	pub fn remove_attribute(&self, name: &str) {
		#[cfg(target_arch = "wasm32")]
		{
			let _ = self.node.remove_attribute(name);
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			self.state.attrs.borrow_mut().retain(|(n, _)| n != name);
		}
	}

	/// Read an attribute value.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		#[cfg(target_arch = "wasm32")]
		{
			self.node.get_attribute(name)
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			self.state
				.attrs
				.borrow()
				.iter()
				.find(|(n, _)| n == name)
				.map(|(_, v)| v.clone())
		}
	}

	/// Whether an attribute is present.
	pub fn has_attribute(&self, name: &str) -> bool {
		#[cfg(target_arch = "wasm32")]
		{
			self.node.has_attribute(name)
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			self.state.attrs.borrow().iter().any(|(n, _)| n == name)
		}
	}

	/// Add a class token to the `class` attribute.
	pub fn add_class(&self, class: &str) {
		#[cfg(target_arch = "wasm32")]
		{
			let _ = self.node.class_list().add_1(class);
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			let current = self.get_attribute("class").unwrap_or_default();
			if !current.split_ascii_whitespace().any(|c| c == class) {
				let updated = if current.is_empty() {
					class.to_owned()
				} else {
					format!("{current} {class}")
				};
				let _ = self.set_attribute("class", &updated);
			}
		}
	}

	/// Remove a class token from the `class` attribute.
	pub fn remove_class(&self, class: &str) {
		#[cfg(target_arch = "wasm32")]
		{
			let _ = self.node.class_list().remove_1(class);
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			if let Some(current) = self.get_attribute("class") {
				let updated = current
					.split_ascii_whitespace()
					.filter(|c| *c != class)
					.collect::<Vec<_>>()
					.join(" ");
				if updated.is_empty() {
					self.remove_attribute("class");
				} else {
					let _ = self.set_attribute("class", &updated);
				}
			}
		}
	}

	/// Set the `checked` property on input elements. On the native backend
	/// only the attribute (handled by the binding layer) exists.
	pub fn set_checked_property(&self, #[allow(unused_variables)] checked: bool) {
		#[cfg(target_arch = "wasm32")]
		if let Some(input) = self.node.dyn_ref::<web_sys::HtmlInputElement>() {
			input.set_checked(checked);
		}
	}

	// ------------------------------------------------------------------
	// Content and structure
	// ------------------------------------------------------------------

	/// Replace all children with a single text node.
	pub fn set_text_content(&self, text: &str) {
		#[cfg(target_arch = "wasm32")]
		{
			self.node.set_text_content(Some(text));
			self.state.children.borrow_mut().clear();
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			let mut children = self.state.children.borrow_mut();
			children.clear();
			children.push(ChildNode::Text(TextNode::new(text)));
		}
	}

	/// Append a text node and return a handle for later updates.
	pub fn append_text(&self, text: &str) -> Result<TextNode> {
		#[cfg(target_arch = "wasm32")]
		{
			let document = super::document::Document::global()?;
			let node = document.create_text_node(text);
			self.node
				.append_child(node.as_ref())
				.map_err(|_| RenderError::AppendChild)?;
			let handle = TextNode { node };
			self.state
				.children
				.borrow_mut()
				.push(ChildNode::Text(handle.clone()));
			Ok(handle)
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			let handle = TextNode::new(text);
			self.state
				.children
				.borrow_mut()
				.push(ChildNode::Text(handle.clone()));
			Ok(handle)
		}
	}

	/// Append a child element.
	pub fn append_child(&self, child: &Element) -> Result<()> {
		#[cfg(target_arch = "wasm32")]
		self.node
			.append_child(&child.node)
			.map_err(|_| RenderError::AppendChild)?;

		*child.state.parent.borrow_mut() = Rc::downgrade(&self.state);
		self.state
			.children
			.borrow_mut()
			.push(ChildNode::Element(child.clone()));
		Ok(())
	}

	/// Detach this element from its parent. Bindings stay alive until
	/// [`Element::unbind`] runs; [`MountHandle`](crate::mount::MountHandle)
	/// does both.
	pub fn remove(&self) {
		#[cfg(target_arch = "wasm32")]
		self.node.remove();

		if let Some(parent) = self.state.parent.borrow().upgrade() {
			parent.children.borrow_mut().retain(|child| match child {
				ChildNode::Element(el) => !Rc::ptr_eq(&el.state, &self.state),
				ChildNode::Text(_) => true,
			});
		}
		*self.state.parent.borrow_mut() = Weak::new();
	}

	// ------------------------------------------------------------------
	// Bindings and listeners
	// ------------------------------------------------------------------

	/// Store a binding's subscription on this element. The subscription is
	/// dropped (cancelled) when the element is unbound.
	pub fn push_binding(&self, subscription: Subscription) {
		self.state.bindings.borrow_mut().push(subscription);
	}

	/// Register an event listener owned by this element.
	pub fn listen(&self, event_type: EventType, callback: impl FnMut(DomEvent) + 'static) {
		#[cfg(target_arch = "wasm32")]
		let handle = EventHandle::attach(self.node.clone().into(), event_type, callback);

		#[cfg(not(target_arch = "wasm32"))]
		let handle = {
			let id = NEXT_LISTENER_ID.with(|n| {
				let id = n.get();
				n.set(id + 1);
				id
			});
			self.state.listeners.borrow_mut().push(ListenerEntry {
				id,
				event_type,
				callback: Some(Box::new(callback)),
			});
			EventHandle {
				id,
				listeners: Rc::downgrade(&self.state.listeners),
			}
		};

		self.state.handles.borrow_mut().push(handle);
	}

	/// Drop every binding and listener of this element and all element
	/// descendants. After this call no store emission mutates the subtree.
	pub fn unbind(&self) {
		self.state.bindings.borrow_mut().clear();
		self.state.handles.borrow_mut().clear();
		for child in self.state.children.borrow().iter() {
			if let ChildNode::Element(el) = child {
				el.unbind();
			}
		}
	}

	/// Number of live bindings on this element alone. Test hook.
	#[doc(hidden)]
	pub fn binding_count(&self) -> usize {
		self.state.bindings.borrow().len()
	}

	/// Fire an event on the native virtual backend, invoking listeners of the
	/// matching type in registration order. Test helper; real events are
	/// delivered by the browser on wasm.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn fire(&self, event_type: EventType) {
		let ids: Vec<u64> = self
			.state
			.listeners
			.borrow()
			.iter()
			.filter(|entry| entry.event_type == event_type)
			.map(|entry| entry.id)
			.collect();

		for id in ids {
			let taken = {
				let mut listeners = self.state.listeners.borrow_mut();
				listeners
					.iter_mut()
					.find(|entry| entry.id == id)
					.and_then(|entry| entry.callback.take())
			};
			if let Some(mut callback) = taken {
				callback(DomEvent {
					event_type: Some(event_type),
				});
				let mut listeners = self.state.listeners.borrow_mut();
				if let Some(entry) = listeners.iter_mut().find(|entry| entry.id == id) {
					entry.callback = Some(callback);
				}
			}
		}
	}

	// ------------------------------------------------------------------
	// Rendering
	// ------------------------------------------------------------------

	/// Render the element (and subtree) to an HTML string.
	pub fn outer_html(&self) -> String {
		#[cfg(target_arch = "wasm32")]
		{
			self.node.outer_html()
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			let mut output = String::new();
			self.render_html(&mut output);
			output
		}
	}

	#[cfg(not(target_arch = "wasm32"))]
	fn render_html(&self, output: &mut String) {
		output.push('<');
		output.push_str(&self.state.tag);
		for (name, value) in self.state.attrs.borrow().iter() {
			output.push(' ');
			output.push_str(name);
			output.push_str("=\"");
			output.push_str(&html_escape(value));
			output.push('"');
		}

		if is_void_tag(&self.state.tag) {
			output.push_str(" />");
			return;
		}

		output.push('>');
		for child in self.state.children.borrow().iter() {
			match child {
				ChildNode::Element(el) => el.render_html(output),
				ChildNode::Text(text) => output.push_str(&html_escape(&text.text())),
			}
		}
		output.push_str("</");
		output.push_str(&self.state.tag);
		output.push('>');
	}
}

impl core::fmt::Debug for Element {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Element")
			.field("tag", &self.tag())
			.field("bindings", &self.state.bindings.borrow().len())
			.finish()
	}
}

/// Weak counterpart of [`Element`], held by binding closures.
#[derive(Clone)]
pub struct WeakElement {
	#[cfg(target_arch = "wasm32")]
	node: web_sys::Element,
	state: Weak<ElementState>,
}

impl WeakElement {
	/// Upgrade back to a strong handle if the element is still alive.
	pub fn upgrade(&self) -> Option<Element> {
		self.state.upgrade().map(|state| Element {
			#[cfg(target_arch = "wasm32")]
			node: self.node.clone(),
			state,
		})
	}
}

/// A text node handle used by text bindings.
#[derive(Clone)]
pub struct TextNode {
	#[cfg(target_arch = "wasm32")]
	node: web_sys::Text,
	#[cfg(not(target_arch = "wasm32"))]
	content: Rc<RefCell<String>>,
}

impl TextNode {
	#[cfg(not(target_arch = "wasm32"))]
	fn new(text: &str) -> Self {
		Self {
			content: Rc::new(RefCell::new(text.to_owned())),
		}
	}

	/// Replace the node's character data.
	pub fn set_text(&self, text: &str) {
		#[cfg(target_arch = "wasm32")]
		self.node.set_data(text);
		#[cfg(not(target_arch = "wasm32"))]
		{
			*self.content.borrow_mut() = text.to_owned();
		}
	}

	/// Read the node's character data.
	pub fn text(&self) -> String {
		#[cfg(target_arch = "wasm32")]
		{
			self.node.data()
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			self.content.borrow().clone()
		}
	}
}

impl core::fmt::Debug for TextNode {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("TextNode").field("text", &self.text()).finish()
	}
}

#[cfg(not(target_arch = "wasm32"))]
fn is_void_tag(tag: &str) -> bool {
	matches!(
		tag,
		"area"
			| "base" | "br"
			| "col" | "embed"
			| "hr" | "img"
			| "input" | "link"
			| "meta" | "source"
			| "track" | "wbr"
	)
}

/// Escapes HTML special characters.
#[cfg(not(target_arch = "wasm32"))]
fn html_escape(s: &str) -> std::borrow::Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		std::borrow::Cow::Owned(escaped)
	} else {
		std::borrow::Cow::Borrowed(s)
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;

	#[test]
	fn attributes_round_trip() {
		let el = Element::create("div").unwrap();
		el.set_attribute("id", "main").unwrap();
		assert_eq!(el.get_attribute("id").as_deref(), Some("main"));
		assert!(el.has_attribute("id"));

		el.set_attribute("id", "other").unwrap();
		assert_eq!(el.get_attribute("id").as_deref(), Some("other"));

		el.remove_attribute("id");
		assert!(!el.has_attribute("id"));
	}

	#[test]
	fn class_tokens_are_managed_individually() {
		let el = Element::create("span").unwrap();
		el.add_class("a");
		el.add_class("b");
		el.add_class("a"); // duplicate, ignored
		assert_eq!(el.get_attribute("class").as_deref(), Some("a b"));

		el.remove_class("a");
		assert_eq!(el.get_attribute("class").as_deref(), Some("b"));
		el.remove_class("b");
		assert!(!el.has_attribute("class"));
	}

	#[test]
	fn renders_nested_structure_with_escaping() {
		let root = Element::create("div").unwrap();
		root.set_attribute("class", "outer").unwrap();
		let child = Element::create("span").unwrap();
		child.append_text("a < b").unwrap();
		root.append_child(&child).unwrap();

		assert_eq!(
			root.outer_html(),
			"<div class=\"outer\"><span>a &lt; b</span></div>"
		);
	}

	#[test]
	fn void_elements_render_self_closed() {
		let el = Element::create("input").unwrap();
		el.set_attribute("type", "checkbox").unwrap();
		assert_eq!(el.outer_html(), "<input type=\"checkbox\" />");
	}

	#[test]
	fn text_node_updates_are_visible_in_render() {
		let el = Element::create("p").unwrap();
		let text = el.append_text("before").unwrap();
		text.set_text("after");
		assert_eq!(el.outer_html(), "<p>after</p>");
	}

	#[test]
	fn remove_detaches_from_parent() {
		let root = Element::create("div").unwrap();
		let child = Element::create("span").unwrap();
		root.append_child(&child).unwrap();
		assert_eq!(root.outer_html(), "<div><span></span></div>");

		child.remove();
		assert_eq!(root.outer_html(), "<div></div>");
	}

	#[test]
	fn fire_invokes_matching_listeners_only() {
		let el = Element::create("button").unwrap();
		let clicks = Rc::new(Cell::new(0));
		let inputs = Rc::new(Cell::new(0));

		el.listen(EventType::Click, {
			let clicks = clicks.clone();
			move |_| clicks.set(clicks.get() + 1)
		});
		el.listen(EventType::Input, {
			let inputs = inputs.clone();
			move |_| inputs.set(inputs.get() + 1)
		});

		el.fire(EventType::Click);
		el.fire(EventType::Click);
		assert_eq!(clicks.get(), 2);
		assert_eq!(inputs.get(), 0);
	}

	#[test]
	fn unbind_drops_listeners_too() {
		let el = Element::create("button").unwrap();
		let clicks = Rc::new(Cell::new(0));
		el.listen(EventType::Click, {
			let clicks = clicks.clone();
			move |_| clicks.set(clicks.get() + 1)
		});

		el.unbind();
		el.fire(EventType::Click);
		assert_eq!(clicks.get(), 0);
	}
}
