//! # Petrel
//!
//! A reactive, type-safe UI component library for styled web interfaces.
//!
//! Petrel turns declarative component configuration into live DOM nodes whose
//! attributes, content and CSS classes continuously track observable stores,
//! while CSS is generated, deduplicated and scoped per component instance.
//!
//! ## Core Principles
//!
//! - **Ordered reactivity**: a store's update stream delivers every applied
//!   update exactly once, in order. No coalescing, no skipped states.
//! - **Per-field bindings**: each dynamic DOM field owns exactly one
//!   subscription; an emission touches the bound node and nothing else.
//! - **Content-addressed styling**: structurally identical style
//!   declarations share one class name and one stylesheet rule.
//! - **Explicit teardown**: unmounting a subtree cancels every subscription
//!   and listener beneath it.
//!
//! ## Quick Example
//!
//! ```
//! use petrel::prelude::*;
//!
//! let count = Store::new(0);
//! let label = count.map(|n| format!("clicked {n} times"));
//! let increment = count.handle(|n, _event| *n += 1);
//!
//! let card = StyleDecl::build(|s| {
//! 	s.prop("padding", "1rem");
//! 	s.prop("border-radius", "var(--pt-border-radius)");
//! });
//!
//! let view = div()
//! 	.style(&card)
//! 	.child(button().bind_text(&label).on_click(increment).build())
//! 	.build();
//! # let _ = view;
//! ```
//!
//! ## Crates
//!
//! - [`reactive`]: stores, subscriptions, handlers, emitters, derived stores.
//! - [`dom`]: DOM abstraction, builder DSL, style resolution, component
//!   configuration, render engine and mounting.

#![warn(missing_docs)]

pub use petrel_dom as dom;
pub use petrel_reactive as reactive;

/// Commonly used types and functions, for glob import.
pub mod prelude {
	pub use petrel_reactive::{DerivedStore, Emitter, Handler, Store, Subscription};

	pub use petrel_dom::bind::{Observable, debounced};
	pub use petrel_dom::builder::ElementBuilder;
	pub use petrel_dom::builder::html::{
		a, button, div, element, form, h1, h2, h3, input, label, li, option, p, section, select,
		span, textarea, ul,
	};
	pub use petrel_dom::config::{ComponentConfig, Size, Variant};
	pub use petrel_dom::dom::{Document, DomEvent, Element, EventType, TextNode};
	pub use petrel_dom::error::{RenderError, Result};
	#[cfg(target_arch = "wasm32")]
	pub use petrel_dom::mount::{mount, mount_to_body};
	pub use petrel_dom::mount::{MountHandle, mount_into};
	pub use petrel_dom::render::{render, render_into};
	pub use petrel_dom::style::{Breakpoint, ClassName, ResponsiveValue, StyleDecl, Theme};
}
