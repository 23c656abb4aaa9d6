//! Reactive binding behavior against the virtual DOM backend

#![cfg(not(target_arch = "wasm32"))]

use rstest::rstest;
use serial_test::serial;

use petrel_dom::builder::html::{button, div, input, span};
use petrel_dom::dom::{Element, EventType};
use petrel_dom::mount::mount_into;
use petrel_reactive::Store;

#[rstest]
#[serial]
fn toggling_a_bound_boolean_touches_only_its_attribute() {
	let disabled = Store::new(false);
	let title = Store::new(String::from("stable"));

	let el = button()
		.attr("type", "button")
		.bind_disabled(&disabled)
		.bind_attr("title", &title, |t| Some(t.clone()))
		.text("Go")
		.build();

	assert!(!el.has_attribute("disabled"));
	assert_eq!(el.get_attribute("title").as_deref(), Some("stable"));

	disabled.set(true);

	assert_eq!(el.get_attribute("disabled").as_deref(), Some(""));
	// Unrelated fields are untouched by the emission.
	assert_eq!(el.get_attribute("title").as_deref(), Some("stable"));
	assert_eq!(el.get_attribute("type").as_deref(), Some("button"));

	disabled.set(false);
	assert!(!el.has_attribute("disabled"));
	assert_eq!(el.get_attribute("title").as_deref(), Some("stable"));
}

#[rstest]
#[serial]
fn each_emission_updates_only_the_bound_node() {
	let left = Store::new(String::from("L0"));
	let right = Store::new(String::from("R0"));

	let left_el = span().bind_text(&left).build();
	let right_el = span().bind_text(&right).build();
	let root = div()
		.child(left_el.clone())
		.child(right_el.clone())
		.build();

	left.set(String::from("L1"));
	assert_eq!(root.outer_html(), "<div><span>L1</span><span>R0</span></div>");

	right.set(String::from("R1"));
	assert_eq!(root.outer_html(), "<div><span>L1</span><span>R1</span></div>");
}

#[rstest]
#[serial]
fn every_binding_owns_exactly_one_subscription() {
	let value = Store::new(String::from("x"));
	let flag = Store::new(false);

	let el = input()
		.bind_attr("value", &value, |v| Some(v.clone()))
		.bind_checked(&flag)
		.bind_disabled(&flag)
		.build();

	assert_eq!(value.subscriber_count(), 1);
	assert_eq!(flag.subscriber_count(), 2);
	assert_eq!(el.binding_count(), 3);
}

#[rstest]
#[serial]
fn unmount_cancels_subscriptions_and_freezes_the_dom() {
	let target = Element::create("main").unwrap();
	let label = Store::new(String::from("before"));
	let disabled = Store::new(false);

	let root = div()
		.child(span().bind_text(&label).build())
		.child(button().bind_disabled(&disabled).text("b").build())
		.build();
	// Keep a handle on the subtree to observe it after unmount.
	let frozen = root.clone();

	let handle = mount_into(root, &target).unwrap();
	assert_eq!(label.subscriber_count(), 1);
	assert_eq!(disabled.subscriber_count(), 1);

	handle.unmount();
	assert_eq!(label.subscriber_count(), 0);
	assert_eq!(disabled.subscriber_count(), 0);

	let before = frozen.outer_html();
	label.set(String::from("after"));
	disabled.set(true);
	assert_eq!(frozen.outer_html(), before);
	assert_eq!(target.outer_html(), "<main></main>");
}

#[rstest]
#[serial]
fn event_listener_emission_updates_bound_text_in_the_same_tick() {
	let count = Store::new(0);
	let label = count.map(|n| format!("clicked {n}"));
	let bump = count.handle(|n, _event| *n += 1);

	let el = button().bind_text(&label).on_click(bump).build();
	assert_eq!(el.outer_html(), "<button>clicked 0</button>");

	el.fire(EventType::Click);
	assert_eq!(count.get(), 1);
	assert_eq!(el.outer_html(), "<button>clicked 1</button>");
}

#[rstest]
#[serial]
fn listeners_are_removed_with_the_subtree() {
	let count = Store::new(0);
	let bump = count.handle(|n, _event| *n += 1);

	let target = Element::create("main").unwrap();
	let btn = button().on_click(bump).build();
	let root = div().child(btn.clone()).build();

	let handle = mount_into(root, &target).unwrap();
	btn.fire(EventType::Click);
	assert_eq!(count.get(), 1);

	handle.unmount();
	btn.fire(EventType::Click);
	assert_eq!(count.get(), 1);
}
