//! Dual-backend DOM abstraction
//!
//! Everything above this module manipulates [`Element`] and [`TextNode`]
//! handles and never touches `web_sys` directly. On wasm targets the handles
//! wrap live browser nodes; on native targets they form a virtual tree that
//! renders to HTML, so bindings, rendering and teardown are testable with
//! plain `cargo test`.

pub mod document;
pub mod element;
pub mod event;

pub use document::Document;
pub use element::{Element, TextNode, WeakElement};
pub use event::{DomEvent, EventHandle, EventType};

#[cfg(not(target_arch = "wasm32"))]
pub use event::StubEvent;
