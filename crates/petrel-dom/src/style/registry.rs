//! Process-wide stylesheet registry
//!
//! Style declarations resolve to class names through this registry. Rules are
//! keyed by their canonical CSS text, so resolving a semantically identical
//! declaration a second time is a cache hit: same class name, rule emitted
//! once.
//!
//! On wasm targets every new rule is appended to a dedicated
//! `<style data-petrel-styles>` element in the document head the moment it is
//! registered. On native targets the rules only accumulate in memory and
//! [`stylesheet_text`] renders the full sheet.

use core::cell::RefCell;
use std::collections::HashMap;

use crate::debug_log;

use super::declaration::{CanonicalBlock, ClassName};

const CLASS_PREFIX: &str = "pt-";

/// Attribute marking the injected `<style>` element.
#[cfg(target_arch = "wasm32")]
const STYLE_ELEMENT_ATTR: &str = "data-petrel-styles";

struct Registry {
	/// Canonical text -> assigned class, for declaration rules.
	by_canonical: HashMap<String, ClassName>,
	/// Raw blocks (theme variables) already emitted.
	raw_seen: HashMap<String, ()>,
	/// Every emitted rule, in registration order.
	rules: Vec<String>,
}

thread_local! {
	static REGISTRY: RefCell<Registry> = RefCell::new(Registry {
		by_canonical: HashMap::new(),
		raw_seen: HashMap::new(),
		rules: Vec::new(),
	});
}

/// FNV-1a, 64-bit.
fn fnv1a(text: &str) -> u64 {
	let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
	for byte in text.bytes() {
		hash ^= u64::from(byte);
		hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
	}
	hash
}

fn class_for(canonical: &str) -> ClassName {
	let hash = fnv1a(canonical);
	// Fold to 32 bits for a short, stable suffix.
	let folded = (hash >> 32) as u32 ^ hash as u32;
	ClassName::new(format!("{CLASS_PREFIX}{folded:08x}"))
}

/// Register a declaration and return its class name. `canonical` (the blocks
/// rendered with `&` in the selector position) is the dedup and hash key;
/// `blocks` carry selector and body separately so the class name lands only in
/// selector positions, never inside property values. Idempotent per canonical
/// text.
pub(crate) fn register(canonical: &str, blocks: &[CanonicalBlock]) -> ClassName {
	REGISTRY.with(|registry| {
		let mut registry = registry.borrow_mut();
		if let Some(existing) = registry.by_canonical.get(canonical) {
			return existing.clone();
		}

		let class = class_for(canonical);
		let selector = format!(".{}", class.as_str());
		let rendered: Vec<String> = blocks.iter().map(|b| b.render(&selector)).collect();
		let rule = rendered.join("\n");
		debug_log!("style registered: {}", class.as_str());

		#[cfg(target_arch = "wasm32")]
		append_to_document(&rule);

		registry.rules.push(rule);
		registry
			.by_canonical
			.insert(canonical.to_owned(), class.clone());
		class
	})
}

/// Register a raw CSS block (no class substitution), deduplicated by text.
/// Used for theme variable blocks.
pub(crate) fn register_raw(css: &str) {
	REGISTRY.with(|registry| {
		let mut registry = registry.borrow_mut();
		if registry.raw_seen.contains_key(css) {
			return;
		}

		#[cfg(target_arch = "wasm32")]
		append_to_document(css);

		registry.rules.push(css.to_owned());
		registry.raw_seen.insert(css.to_owned(), ());
	});
}

/// Render the full registered stylesheet, rules in registration order.
///
/// This is the native/server-side counterpart of the injected `<style>`
/// element and is what tests assert against.
pub fn stylesheet_text() -> String {
	REGISTRY.with(|registry| registry.borrow().rules.join("\n"))
}

/// Number of registered rules. Test hook.
#[doc(hidden)]
pub fn rule_count() -> usize {
	REGISTRY.with(|registry| registry.borrow().rules.len())
}

/// Clear the registry. Test hook; the registry is thread-local so tests that
/// use it run serially.
#[doc(hidden)]
pub fn reset() {
	REGISTRY.with(|registry| {
		let mut registry = registry.borrow_mut();
		registry.by_canonical.clear();
		registry.raw_seen.clear();
		registry.rules.clear();
	});
}

/// Append a rule to the `<style data-petrel-styles>` element, creating it in
/// the document head on first use.
#[cfg(target_arch = "wasm32")]
fn append_to_document(rule: &str) {
	use crate::warn_log;

	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		warn_log!("no document; stylesheet rule kept in memory only");
		return;
	};

	let selector = format!("style[{STYLE_ELEMENT_ATTR}]");
	let style = match document.query_selector(&selector) {
		Ok(Some(existing)) => existing,
		_ => {
			let Ok(created) = document.create_element("style") else {
				warn_log!("failed to create style element");
				return;
			};
			let _ = created.set_attribute(STYLE_ELEMENT_ATTR, "");
			if let Some(head) = document.head() {
				let _ = head.append_child(&created);
			}
			created
		}
	};

	let mut text = style.text_content().unwrap_or_default();
	if !text.is_empty() {
		text.push('\n');
	}
	text.push_str(rule);
	style.set_text_content(Some(&text));
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use serial_test::serial;

	use super::*;

	fn single(body: &str) -> (String, Vec<CanonicalBlock>) {
		let blocks = vec![CanonicalBlock {
			media: None,
			suffix: String::new(),
			body: body.to_owned(),
		}];
		let canonical = blocks[0].render("&");
		(canonical, blocks)
	}

	#[test]
	fn fnv1a_matches_known_vectors() {
		// Standard FNV-1a test vectors.
		assert_eq!(fnv1a(""), 0xcbf2_9ce4_8422_2325);
		assert_eq!(fnv1a("a"), 0xaf63_dc4c_8601_ec8c);
	}

	#[test]
	#[serial]
	fn register_is_idempotent() {
		reset();
		let (canonical, blocks) = single("color:red;");
		let first = register(&canonical, &blocks);
		let second = register(&canonical, &blocks);
		assert_eq!(first, second);
		assert_eq!(rule_count(), 1);
	}

	#[test]
	#[serial]
	fn distinct_declarations_get_distinct_classes() {
		reset();
		let (red_canonical, red_blocks) = single("color:red;");
		let (blue_canonical, blue_blocks) = single("color:blue;");
		let red = register(&red_canonical, &red_blocks);
		let blue = register(&blue_canonical, &blue_blocks);
		assert_ne!(red, blue);
		assert_eq!(rule_count(), 2);

		let sheet = stylesheet_text();
		assert!(sheet.contains(&format!(".{} {{ color:red; }}", red.as_str())));
		assert!(sheet.contains(&format!(".{} {{ color:blue; }}", blue.as_str())));
	}

	#[test]
	#[serial]
	fn ampersand_in_a_property_value_is_left_alone() {
		reset();
		let (canonical, blocks) = single("background:url(img.png?a=1&b=2);");
		let class = register(&canonical, &blocks);

		let sheet = stylesheet_text();
		assert_eq!(
			sheet,
			format!(
				".{} {{ background:url(img.png?a=1&b=2); }}",
				class.as_str()
			)
		);
	}

	#[test]
	#[serial]
	fn raw_blocks_deduplicate_by_text() {
		reset();
		register_raw(":root { --pt-primary: #fff; }");
		register_raw(":root { --pt-primary: #fff; }");
		register_raw(":root { --pt-primary: #000; }");
		assert_eq!(rule_count(), 2);
	}
}
