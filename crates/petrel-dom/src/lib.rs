//! Petrel DOM - render engine for styled, store-bound web interfaces
//!
//! This crate turns declarative component configuration into live DOM nodes
//! whose attributes, content and CSS classes continuously track
//! [`petrel_reactive`] store streams, while CSS is generated, deduplicated and
//! scoped per component instance.
//!
//! ## Architecture
//!
//! - [`dom`]: dual-backend DOM abstraction. On wasm targets it wraps
//!   `web-sys`; on native targets it is a lightweight virtual element tree
//!   that renders to HTML, so the whole engine is testable off-browser.
//! - [`style`]: style declarations, responsive breakpoints, theme variables,
//!   and the content-hashed, process-wide stylesheet registry.
//! - [`builder`]: fluent element builder DSL (`div()`, `button()`, ...).
//! - [`config`]: the mutable per-component configuration object populated via
//!   a declarative block.
//! - [`bind`]: per-field reactive bindings; each binding owns exactly one
//!   subscription, torn down when its node is removed.
//! - [`render`]: consumes a configuration and produces a wired element.
//! - [`mount`]: the composition root; mounts the render tree into the
//!   document and tears it down again.
//!
//! ## Example
//!
//! ```
//! use petrel_dom::builder::html::{button, div};
//! use petrel_dom::style::StyleDecl;
//! use petrel_reactive::Store;
//!
//! let count = Store::new(0);
//! let label = count.map(|n| format!("clicked {n} times"));
//! let increment = count.handle(|n, _event| *n += 1);
//!
//! let card = StyleDecl::build(|s| {
//!     s.prop("padding", "1rem");
//!     s.prop("border-radius", "var(--pt-border-radius)");
//! });
//!
//! let view = div()
//!     .class(card.resolve().as_str())
//!     .child(
//!         button()
//!             .bind_text(&label)
//!             .on_click(increment)
//!             .build(),
//!     )
//!     .build();
//! # let _ = view;
//! ```

#![warn(missing_docs)]

pub mod bind;
pub mod builder;
pub mod config;
pub mod dom;
pub mod error;
pub mod logging;
pub mod mount;
pub mod render;
pub mod style;

pub use bind::{
	Observable, bind_attr, bind_checked, bind_class, bind_disabled, bind_text, debounced,
};
pub use builder::ElementBuilder;
pub use config::{ComponentConfig, Size, Variant};
pub use dom::{Document, DomEvent, Element, EventHandle, EventType, TextNode};
pub use error::{RenderError, Result};
pub use mount::{MountHandle, mount_into};
#[cfg(target_arch = "wasm32")]
pub use mount::{mount, mount_to_body};
pub use render::{render, render_into};
pub use style::{Breakpoint, ClassName, ResponsiveValue, StyleDecl, Theme};
