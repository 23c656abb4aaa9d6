//! Render engine
//!
//! [`render`] consumes a [`ComponentConfig`] and produces a fully wired
//! element: style resolved to a shared class, static attributes and flags
//! applied, children attached, and every deferred binding and listener
//! installed. Consuming the config by value is what makes post-mount
//! configuration changes unrepresentable.

use crate::config::ComponentConfig;
use crate::debug_log;
use crate::dom::{Document, Element};
use crate::error::{RenderError, Result};

/// Render a configuration into a `tag` element.
///
/// # Errors
///
/// [`RenderError::MissingStore`] when a declared store requirement was never
/// satisfied by a binding; otherwise DOM creation and attachment errors.
pub fn render(config: ComponentConfig, tag: &str) -> Result<Element> {
	if let Some(name) = config.unmet_requirement() {
		return Err(RenderError::MissingStore(name.to_owned()));
	}

	let document = Document::global()?;
	let element = document.create_element(tag)?;

	if let Some(style) = &config.style {
		if !style.is_empty() {
			element.add_class(style.resolve().as_str());
		}
	}
	for class in &config.classes {
		element.add_class(class);
	}
	if let Some(size) = config.size {
		element.add_class(&format!("pt-{}", size.as_str()));
	}
	if let Some(variant) = config.variant {
		element.add_class(&format!("pt-{}", variant.as_str()));
	}

	for (name, value) in &config.attrs {
		element.set_attribute(name, value)?;
	}
	if config.disabled {
		element.set_attribute("disabled", "")?;
	}
	if config.checked {
		element.set_attribute("checked", "")?;
		element.set_checked_property(true);
	}

	if let Some(text) = &config.text {
		element.set_text_content(text);
	}
	for child in &config.children {
		element.append_child(child)?;
	}

	let installer_count = config.installers.len();
	for installer in config.installers {
		installer(&element)?;
	}
	debug_log!("rendered <{tag}> with {installer_count} bindings/listeners");

	Ok(element)
}

/// Render a configuration and append the result to `parent`.
pub fn render_into(config: ComponentConfig, tag: &str, parent: &Element) -> Result<Element> {
	let element = render(config, tag)?;
	parent.append_child(&element)?;
	Ok(element)
}
