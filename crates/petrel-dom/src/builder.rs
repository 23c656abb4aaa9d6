//! Element builder DSL
//!
//! A fluent API for constructing DOM elements: `div()`, `button()` and
//! friends return an [`ElementBuilder`](html::ElementBuilder) that chains
//! attributes, styles, children, event wiring and reactive bindings, and
//! finally yields the built [`Element`](crate::dom::Element).
//!
//! ```
//! use petrel_dom::builder::html::{button, div};
//! use petrel_reactive::Store;
//!
//! let count = Store::new(0);
//! let label = count.map(|n| format!("count: {n}"));
//! let increment = count.handle(|n, _event| *n += 1);
//!
//! let view = div()
//! 	.class("counter")
//! 	.child(button().bind_text(&label).on_click(increment).build())
//! 	.build();
//! # let _ = view;
//! ```

pub mod html;

pub use html::ElementBuilder;
