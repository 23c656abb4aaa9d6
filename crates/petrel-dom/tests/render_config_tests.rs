//! Component configuration and rendering

#![cfg(not(target_arch = "wasm32"))]

use rstest::rstest;
use serial_test::serial;

use petrel_dom::builder::html::span;
use petrel_dom::config::{ComponentConfig, Size, Variant};
use petrel_dom::dom::EventType;
use petrel_dom::error::RenderError;
use petrel_dom::render::render;
use petrel_dom::style::{StyleDecl, registry, stylesheet_text};
use petrel_reactive::Store;

/// A checkbox-like component: requires a checked store, optional label.
fn checkbox(block: impl FnOnce(&mut ComponentConfig)) -> ComponentConfig {
	ComponentConfig::build(|c| {
		c.attr("type", "checkbox");
		c.require_store("checked");
		block(c);
	})
}

#[rstest]
#[serial]
fn component_without_its_required_store_fails_fast() {
	let config = checkbox(|_| {});
	match render(config, "input") {
		Err(RenderError::MissingStore(name)) => assert_eq!(name, "checked"),
		other => panic!("expected MissingStore, got {other:?}"),
	}
}

#[rstest]
#[serial]
fn bound_checkbox_tracks_its_store() {
	let checked = Store::new(false);
	let config = checkbox(|c| {
		c.bind_checked(&checked);
	});
	let el = render(config, "input").unwrap();
	assert!(!el.has_attribute("checked"));

	checked.set(true);
	assert_eq!(el.get_attribute("checked").as_deref(), Some(""));

	checked.set(false);
	assert!(!el.has_attribute("checked"));
}

#[rstest]
#[serial]
fn styled_component_resolves_to_a_registered_class() {
	registry::reset();
	let config = ComponentConfig::build(|c| {
		c.style(StyleDecl::build(|s| {
			s.prop("display", "flex");
			s.prop("gap", "0.5rem");
		}));
		c.variant(Variant::Success).size(Size::Sm);
	});
	let el = render(config, "div").unwrap();

	let class = el.get_attribute("class").unwrap();
	let style_class = class
		.split_ascii_whitespace()
		.find(|c| c.starts_with("pt-") && c.len() == 11)
		.expect("resolved style class");
	assert!(class.contains("pt-sm"));
	assert!(class.contains("pt-success"));
	assert!(stylesheet_text().contains(&format!(".{style_class} {{ display:flex;gap:0.5rem; }}")));
}

#[rstest]
#[serial]
fn two_instances_of_one_component_share_the_style_rule() {
	registry::reset();
	let make = || {
		ComponentConfig::build(|c| {
			c.style(StyleDecl::build(|s| {
				s.prop("padding", "0.25rem");
			}));
		})
	};
	let a = render(make(), "div").unwrap();
	let b = render(make(), "div").unwrap();

	assert_eq!(a.get_attribute("class"), b.get_attribute("class"));
	assert_eq!(registry::rule_count(), 1);
}

#[rstest]
#[serial]
fn configured_children_and_static_flags_render() {
	let config = ComponentConfig::build(|c| {
		c.text("Save");
		c.child(span().text("badge").build());
		c.disabled(true);
	});
	let el = render(config, "button").unwrap();

	assert_eq!(el.get_attribute("disabled").as_deref(), Some(""));
	assert_eq!(
		el.outer_html(),
		"<button disabled=\"\">Save<span>badge</span></button>"
	);
}

#[rstest]
#[serial]
fn config_event_wiring_reaches_the_store() {
	let submitted = Store::new(0);
	let on_submit = submitted.handle(|n, _event| *n += 1);

	let config = ComponentConfig::build(|c| {
		c.attr("action", "/save");
		c.on_handler(EventType::Submit, on_submit);
	});
	let el = render(config, "form").unwrap();

	el.fire(EventType::Submit);
	el.fire(EventType::Submit);
	assert_eq!(submitted.get(), 2);
}

#[rstest]
#[serial]
fn rendering_consumes_the_configuration() {
	// Move semantics: a rendered config cannot be reused, so post-mount
	// reconfiguration is unrepresentable. This is a compile-time property;
	// the runtime assertion is that one config produces one element.
	let config = ComponentConfig::build(|c| {
		c.text("once");
	});
	let el = render(config, "p").unwrap();
	assert_eq!(el.outer_html(), "<p>once</p>");
}
