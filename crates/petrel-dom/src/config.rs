//! Component configuration
//!
//! A [`ComponentConfig`] is the mutable record a declarative block populates
//! before a component is rendered. Everything is applied up front; rendering
//! consumes the config by value, so there is no way to mutate a component's
//! configuration after it has been mounted.
//!
//! Components with required stores declare them with
//! [`ComponentConfig::require_store`]; rendering a config whose requirements
//! were never satisfied fails with [`RenderError::MissingStore`] instead of
//! panicking somewhere inside the engine.

use petrel_reactive::Handler;

use crate::bind::{self, Observable};
use crate::dom::{DomEvent, Element, EventType};
use crate::error::Result;
use crate::style::StyleDecl;

#[cfg(doc)]
use crate::error::RenderError;

/// Color variant, mapped onto the theme's `--pt-*` color variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
	/// Primary accent.
	Primary,
	/// Secondary accent.
	Secondary,
	/// Success / confirmation.
	Success,
	/// Danger / destructive action.
	Danger,
}

impl Variant {
	/// Class token suffix for this variant.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Primary => "primary",
			Self::Secondary => "secondary",
			Self::Success => "success",
			Self::Danger => "danger",
		}
	}

	/// The theme variable carrying this variant's color.
	pub fn css_var(&self) -> &'static str {
		match self {
			Self::Primary => "var(--pt-primary)",
			Self::Secondary => "var(--pt-secondary)",
			Self::Success => "var(--pt-success)",
			Self::Danger => "var(--pt-danger)",
		}
	}
}

/// Size variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
	/// Small.
	Sm,
	/// Medium, the default.
	#[default]
	Md,
	/// Large.
	Lg,
}

impl Size {
	/// Class token suffix for this size.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Sm => "sm",
			Self::Md => "md",
			Self::Lg => "lg",
		}
	}
}

type Installer = Box<dyn FnOnce(&Element) -> Result<()>>;

/// Mutable per-component configuration, populated via a declarative block
/// and consumed by [`render`](crate::render::render).
#[derive(Default)]
pub struct ComponentConfig {
	pub(crate) style: Option<StyleDecl>,
	pub(crate) classes: Vec<String>,
	pub(crate) attrs: Vec<(String, String)>,
	pub(crate) text: Option<String>,
	pub(crate) disabled: bool,
	pub(crate) checked: bool,
	pub(crate) size: Option<Size>,
	pub(crate) variant: Option<Variant>,
	pub(crate) children: Vec<Element>,
	/// Deferred binding and listener setup, run against the rendered element.
	pub(crate) installers: Vec<Installer>,
	required: Vec<String>,
	provided: Vec<String>,
}

impl ComponentConfig {
	/// Build a configuration with a declarative block.
	pub fn build(block: impl FnOnce(&mut ComponentConfig)) -> Self {
		let mut config = Self::default();
		block(&mut config);
		config
	}

	/// Attach a style declaration, resolved to a class at render time.
	pub fn style(&mut self, style: StyleDecl) -> &mut Self {
		self.style = Some(style);
		self
	}

	/// Add a static class token.
	pub fn class(&mut self, class: impl Into<String>) -> &mut Self {
		self.classes.push(class.into());
		self
	}

	/// Set a static attribute.
	pub fn attr(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Set static text content.
	pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
		self.text = Some(text.into());
		self
	}

	/// Set the static disabled flag.
	pub fn disabled(&mut self, disabled: bool) -> &mut Self {
		self.disabled = disabled;
		self
	}

	/// Set the static checked flag.
	pub fn checked(&mut self, checked: bool) -> &mut Self {
		self.checked = checked;
		self
	}

	/// Set the size variant.
	pub fn size(&mut self, size: Size) -> &mut Self {
		self.size = Some(size);
		self
	}

	/// Set the color variant.
	pub fn variant(&mut self, variant: Variant) -> &mut Self {
		self.variant = Some(variant);
		self
	}

	/// Append an already-built child element.
	pub fn child(&mut self, child: Element) -> &mut Self {
		self.children.push(child);
		self
	}

	// ------------------------------------------------------------------
	// Reactive bindings
	// ------------------------------------------------------------------

	/// Bind the component's text content to a string stream.
	pub fn bind_text(&mut self, source: &(impl Observable<String> + Clone + 'static)) -> &mut Self {
		self.provide_store("text");
		let source = source.clone();
		self.installers
			.push(Box::new(move |element| bind::bind_text(element, &source)));
		self
	}

	/// Bind an attribute to a stream through a formatting function.
	pub fn bind_attr<T: Clone + 'static>(
		&mut self,
		name: impl Into<String>,
		source: &(impl Observable<T> + Clone + 'static),
		format: impl Fn(&T) -> Option<String> + 'static,
	) -> &mut Self {
		let name = name.into();
		self.provide_store(name.clone());
		let source = source.clone();
		self.installers.push(Box::new(move |element| {
			bind::bind_attr(element, name, &source, format)
		}));
		self
	}

	/// Bind one class token to a stream.
	pub fn bind_class<T: Clone + 'static>(
		&mut self,
		source: &(impl Observable<T> + Clone + 'static),
		class_of: impl Fn(&T) -> Option<String> + 'static,
	) -> &mut Self {
		self.provide_store("class");
		let source = source.clone();
		self.installers.push(Box::new(move |element| {
			bind::bind_class(element, &source, class_of)
		}));
		self
	}

	/// Bind the checked state to a boolean stream.
	pub fn bind_checked(&mut self, source: &(impl Observable<bool> + Clone + 'static)) -> &mut Self {
		self.provide_store("checked");
		let source = source.clone();
		self.installers
			.push(Box::new(move |element| bind::bind_checked(element, &source)));
		self
	}

	/// Bind the disabled attribute to a boolean stream.
	pub fn bind_disabled(&mut self, source: &(impl Observable<bool> + Clone + 'static)) -> &mut Self {
		self.provide_store("disabled");
		let source = source.clone();
		self.installers
			.push(Box::new(move |element| bind::bind_disabled(element, &source)));
		self
	}

	// ------------------------------------------------------------------
	// Event wiring
	// ------------------------------------------------------------------

	/// Register an event listener closure.
	pub fn on(
		&mut self,
		event_type: EventType,
		callback: impl FnMut(DomEvent) + 'static,
	) -> &mut Self {
		self.installers.push(Box::new(move |element| {
			element.listen(event_type, callback);
			Ok(())
		}));
		self
	}

	/// Wire a store handler to an event.
	pub fn on_handler(&mut self, event_type: EventType, handler: Handler<DomEvent>) -> &mut Self {
		self.on(event_type, move |event| handler.call(event))
	}

	/// Wire a store handler to click events.
	pub fn on_click(&mut self, handler: Handler<DomEvent>) -> &mut Self {
		self.on_handler(EventType::Click, handler)
	}

	// ------------------------------------------------------------------
	// Store requirements
	// ------------------------------------------------------------------

	/// Declare that this component cannot render without the named store.
	/// Component constructors call this; the matching `bind_*` call
	/// satisfies it.
	pub fn require_store(&mut self, name: impl Into<String>) -> &mut Self {
		let name = name.into();
		if !self.required.contains(&name) {
			self.required.push(name);
		}
		self
	}

	/// Mark a named store requirement as satisfied. Every `bind_*` call does
	/// this under its own name (`bind_attr` uses the attribute name,
	/// `bind_class` uses `"class"`).
	pub fn provide_store(&mut self, name: impl Into<String>) -> &mut Self {
		let name = name.into();
		if !self.provided.contains(&name) {
			self.provided.push(name);
		}
		self
	}

	/// The first declared requirement no binding satisfied, if any.
	pub(crate) fn unmet_requirement(&self) -> Option<&str> {
		self.required
			.iter()
			.find(|name| !self.provided.contains(name))
			.map(String::as_str)
	}
}

impl core::fmt::Debug for ComponentConfig {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ComponentConfig")
			.field("classes", &self.classes)
			.field("attrs", &self.attrs)
			.field("text", &self.text)
			.field("disabled", &self.disabled)
			.field("checked", &self.checked)
			.field("size", &self.size)
			.field("variant", &self.variant)
			.field("children", &self.children.len())
			.field("installers", &self.installers.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use petrel_reactive::Store;

	use super::*;

	#[test]
	fn declarative_block_populates_fields() {
		let config = ComponentConfig::build(|c| {
			c.class("btn")
				.attr("type", "button")
				.text("Save")
				.size(Size::Lg)
				.variant(Variant::Primary)
				.disabled(true);
		});

		assert_eq!(config.classes, vec!["btn"]);
		assert_eq!(config.attrs, vec![("type".to_owned(), "button".to_owned())]);
		assert_eq!(config.text.as_deref(), Some("Save"));
		assert_eq!(config.size, Some(Size::Lg));
		assert_eq!(config.variant, Some(Variant::Primary));
		assert!(config.disabled);
	}

	#[test]
	fn unmet_requirement_is_reported() {
		let config = ComponentConfig::build(|c| {
			c.require_store("checked");
		});
		assert_eq!(config.unmet_requirement(), Some("checked"));
	}

	#[test]
	fn binding_satisfies_requirement() {
		let checked = Store::new(false);
		let config = ComponentConfig::build(|c| {
			c.require_store("checked");
			c.bind_checked(&checked);
		});
		assert_eq!(config.unmet_requirement(), None);
		assert_eq!(config.installers.len(), 1);
	}

	#[test]
	fn attr_and_class_bindings_satisfy_requirements() {
		let value = Store::new(String::new());
		let active = Store::new(false);
		let config = ComponentConfig::build(|c| {
			c.require_store("value");
			c.require_store("class");
			c.bind_attr("value", &value, |v| Some(v.clone()));
			c.bind_class(&active, |on| on.then(|| "is-active".to_owned()));
		});
		assert_eq!(config.unmet_requirement(), None);
		assert_eq!(config.installers.len(), 2);
	}

	#[test]
	fn variant_and_size_tokens() {
		assert_eq!(Variant::Danger.as_str(), "danger");
		assert_eq!(Variant::Primary.css_var(), "var(--pt-primary)");
		assert_eq!(Size::default(), Size::Md);
		assert_eq!(Size::Sm.as_str(), "sm");
	}
}
