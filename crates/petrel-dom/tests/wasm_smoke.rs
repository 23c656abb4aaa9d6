//! Browser smoke tests, run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use petrel_dom::builder::html::{button, div, span};
use petrel_dom::mount::mount_to_body;
use petrel_dom::style::StyleDecl;
use petrel_reactive::Store;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn mounts_and_updates_real_dom_nodes() {
	let label = Store::new(String::from("first"));
	let root = div().child(span().id("wired").bind_text(&label).build()).build();
	let handle = mount_to_body(root).unwrap();

	let document = web_sys::window().unwrap().document().unwrap();
	let node = document.get_element_by_id("wired").unwrap();
	assert_eq!(node.text_content().as_deref(), Some("first"));

	label.set(String::from("second"));
	assert_eq!(node.text_content().as_deref(), Some("second"));

	handle.unmount();
	assert!(document.get_element_by_id("wired").is_none());
	assert_eq!(label.subscriber_count(), 0);
}

#[wasm_bindgen_test]
fn resolved_styles_land_in_the_injected_stylesheet() {
	let class = StyleDecl::build(|s| {
		s.prop("outline", "2px solid red");
	})
	.resolve();

	let document = web_sys::window().unwrap().document().unwrap();
	let style = document
		.query_selector("style[data-petrel-styles]")
		.unwrap()
		.expect("injected style element");
	let text = style.text_content().unwrap_or_default();
	assert!(text.contains(class.as_str()));
}

#[wasm_bindgen_test]
fn click_listeners_fire_through_the_browser() {
	let count = Store::new(0);
	let bump = count.handle(|n, _event| *n += 1);
	let root = button().id("clicker").text("go").on_click(bump).build();
	let _handle = mount_to_body(root).unwrap();

	let document = web_sys::window().unwrap().document().unwrap();
	let node = document
		.get_element_by_id("clicker")
		.unwrap()
		.dyn_into::<web_sys::HtmlElement>()
		.unwrap();
	node.click();
	node.click();
	assert_eq!(count.get(), 2);
}
