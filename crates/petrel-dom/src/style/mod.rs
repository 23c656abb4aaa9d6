//! Style resolution
//!
//! Styling is content-addressed: a [`StyleDecl`] serializes to canonical CSS,
//! the canonical text is hashed to a short class name, and the rule is
//! registered once in a process-wide stylesheet. Components share classes
//! whenever their declarations are structurally identical, so the sheet stays
//! proportional to the number of distinct styles, not component instances.
//!
//! [`Theme`] supplies CSS custom properties declarations reference instead of
//! hard-coded values; [`Breakpoint`] and [`ResponsiveValue`] cover the
//! responsive axis.

pub mod declaration;
pub mod registry;
pub mod responsive;
pub mod theme;

pub use declaration::{ClassName, RuleBlock, StyleDecl};
pub use registry::stylesheet_text;
pub use responsive::{Breakpoint, ResponsiveValue};
pub use theme::Theme;
