//! Style declarations
//!
//! A [`StyleDecl`] is an ordered set of CSS property assignments, optionally
//! scoped to pseudo-class selectors and responsive breakpoints. Declarations
//! are plain values; nothing reaches the stylesheet until
//! [`StyleDecl::resolve`] serializes the declaration to canonical CSS and
//! exchanges it for a content-hashed class name.

use super::registry;
use super::responsive::{Breakpoint, ResponsiveValue};

/// A CSS class name produced by style resolution (`pt-xxxxxxxx`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName(String);

impl ClassName {
	pub(crate) fn new(name: String) -> Self {
		Self(name)
	}

	/// The class name without a leading dot.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl core::fmt::Display for ClassName {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(&self.0)
	}
}

/// One serialized rule of a declaration, with the class selector kept out of
/// band. The registry substitutes the real selector only at the selector
/// position, so `&` occurring inside property values (URLs, `content` text)
/// is never rewritten.
pub(crate) struct CanonicalBlock {
	/// Media query condition wrapping the rule, if any.
	pub(crate) media: Option<String>,
	/// Selector suffix appended to the class selector (`":hover"`, `""`).
	pub(crate) suffix: String,
	/// Serialized property list.
	pub(crate) body: String,
}

impl CanonicalBlock {
	/// Render the block with `selector` in the selector position.
	pub(crate) fn render(&self, selector: &str) -> String {
		match &self.media {
			Some(media) => format!(
				"@media {media} {{ {selector}{} {{ {} }} }}",
				self.suffix, self.body
			),
			None => format!("{selector}{} {{ {} }}", self.suffix, self.body),
		}
	}
}

/// The property list of one rule block, written to inside the closures
/// passed to [`StyleDecl::pseudo`] and [`StyleDecl::at`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBlock {
	props: Vec<(String, String)>,
}

impl RuleBlock {
	/// Add a property assignment. Order is preserved and significant.
	pub fn prop(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.props.push((name.into(), value.into()));
		self
	}

	fn serialize(&self, output: &mut String) {
		for (name, value) in &self.props {
			output.push_str(name);
			output.push(':');
			output.push_str(value);
			output.push(';');
		}
	}

	fn is_empty(&self) -> bool {
		self.props.is_empty()
	}
}

/// An ordered, responsive, pseudo-class-aware style declaration.
///
/// Built with a declarative block:
///
/// ```
/// use petrel_dom::style::{Breakpoint, StyleDecl};
///
/// let card = StyleDecl::build(|s| {
/// 	s.prop("padding", "1rem");
/// 	s.prop("border-radius", "var(--pt-border-radius)");
/// 	s.pseudo(":hover", |b| {
/// 		b.prop("box-shadow", "var(--pt-shadow)");
/// 	});
/// 	s.at(Breakpoint::Md, |b| {
/// 		b.prop("padding", "2rem");
/// 	});
/// });
/// let class = card.resolve();
/// assert!(class.as_str().starts_with("pt-"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDecl {
	base: RuleBlock,
	/// Pseudo selector suffix (":hover") and its block, in insertion order.
	pseudo: Vec<(String, RuleBlock)>,
	/// Per-breakpoint blocks, kept in ascending width order.
	responsive: Vec<(Breakpoint, RuleBlock)>,
}

impl StyleDecl {
	/// Build a declaration with a declarative block.
	pub fn build(block: impl FnOnce(&mut StyleDecl)) -> Self {
		let mut decl = Self::default();
		block(&mut decl);
		decl
	}

	/// Add a base property assignment.
	pub fn prop(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.base.prop(name, value);
		self
	}

	/// Add properties under a pseudo-class selector suffix such as
	/// `":hover"` or `":focus-visible"`. Repeated suffixes extend the
	/// existing block.
	pub fn pseudo(&mut self, suffix: &str, block: impl FnOnce(&mut RuleBlock)) -> &mut Self {
		if let Some((_, existing)) = self.pseudo.iter_mut().find(|(s, _)| s == suffix) {
			block(existing);
		} else {
			let mut rule = RuleBlock::default();
			block(&mut rule);
			self.pseudo.push((suffix.to_owned(), rule));
		}
		self
	}

	/// Shorthand for `pseudo(":hover", …)`.
	pub fn hover(&mut self, block: impl FnOnce(&mut RuleBlock)) -> &mut Self {
		self.pseudo(":hover", block)
	}

	/// Add properties scoped to a breakpoint. `Breakpoint::Xs` extends the
	/// base block. Blocks are emitted in ascending width order regardless of
	/// declaration order, which keeps the mobile-first cascade intact.
	pub fn at(&mut self, breakpoint: Breakpoint, block: impl FnOnce(&mut RuleBlock)) -> &mut Self {
		if breakpoint == Breakpoint::Xs {
			block(&mut self.base);
			return self;
		}
		if let Some((_, existing)) = self.responsive.iter_mut().find(|(b, _)| *b == breakpoint) {
			block(existing);
		} else {
			let mut rule = RuleBlock::default();
			block(&mut rule);
			let index = Breakpoint::ALL.iter().position(|b| *b == breakpoint);
			let insert_at = self
				.responsive
				.iter()
				.position(|(b, _)| Breakpoint::ALL.iter().position(|x| x == b) > index)
				.unwrap_or(self.responsive.len());
			self.responsive.insert(insert_at, (breakpoint, rule));
		}
		self
	}

	/// Spread one property over a [`ResponsiveValue`]: the base lands in the
	/// base block, each override in its breakpoint's block.
	pub fn responsive(
		&mut self,
		name: impl Into<String>,
		value: ResponsiveValue<impl Into<String>>,
	) -> &mut Self {
		let name = name.into();
		let ResponsiveValue {
			xs,
			sm,
			md,
			lg,
			xl,
			xxl,
		} = value;
		self.prop(name.clone(), xs);
		for (breakpoint, over) in [
			(Breakpoint::Sm, sm),
			(Breakpoint::Md, md),
			(Breakpoint::Lg, lg),
			(Breakpoint::Xl, xl),
			(Breakpoint::Xxl, xxl),
		] {
			if let Some(over) = over {
				let name = name.clone();
				self.at(breakpoint, move |b| {
					b.prop(name, over);
				});
			}
		}
		self
	}

	/// Whether the declaration contains no properties at all.
	pub fn is_empty(&self) -> bool {
		self.base.is_empty()
			&& self.pseudo.iter().all(|(_, b)| b.is_empty())
			&& self.responsive.iter().all(|(_, b)| b.is_empty())
	}

	/// The declaration's rules, one [`CanonicalBlock`] per non-empty block,
	/// in stylesheet order.
	pub(crate) fn blocks(&self) -> Vec<CanonicalBlock> {
		let mut blocks = Vec::new();
		if !self.base.is_empty() {
			let mut body = String::new();
			self.base.serialize(&mut body);
			blocks.push(CanonicalBlock {
				media: None,
				suffix: String::new(),
				body,
			});
		}
		for (suffix, block) in &self.pseudo {
			if block.is_empty() {
				continue;
			}
			let mut body = String::new();
			block.serialize(&mut body);
			blocks.push(CanonicalBlock {
				media: None,
				suffix: suffix.clone(),
				body,
			});
		}
		for (breakpoint, block) in &self.responsive {
			if block.is_empty() {
				continue;
			}
			// Xs never lands here, so the media query always exists.
			let Some(query) = breakpoint.media_query() else {
				continue;
			};
			let mut body = String::new();
			block.serialize(&mut body);
			blocks.push(CanonicalBlock {
				media: Some(query),
				suffix: String::new(),
				body,
			});
		}
		blocks
	}

	/// Canonical CSS text with `&` standing for the class selector. This is
	/// the exact text the registry hashes, so structurally equal
	/// declarations produce byte-equal canonical forms.
	pub(crate) fn canonical(&self) -> String {
		Self::join_rendered(&self.blocks())
	}

	fn join_rendered(blocks: &[CanonicalBlock]) -> String {
		let rendered: Vec<String> = blocks.iter().map(|b| b.render("&")).collect();
		rendered.join("\n")
	}

	/// Resolve the declaration to its class name, registering the rule in
	/// the shared stylesheet on first sight. Idempotent: a structurally
	/// identical declaration returns the same class and registers nothing
	/// new.
	pub fn resolve(&self) -> ClassName {
		let blocks = self.blocks();
		registry::register(&Self::join_rendered(&blocks), &blocks)
	}
}
