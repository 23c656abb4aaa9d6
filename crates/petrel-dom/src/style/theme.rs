//! Theme variables
//!
//! A [`Theme`] is a set of CSS custom properties (`--pt-*`) installed once at
//! the document root. Style declarations reference the variables
//! (`var(--pt-primary)`) instead of literal values, so restyling an
//! application means swapping the theme, not the components.

use super::registry;

/// Theme configuration.
///
/// The shipped values are placeholders a design system is expected to
/// override through the builder methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
	// Colors
	/// Primary accent color.
	pub primary: String,
	/// Secondary accent color.
	pub secondary: String,
	/// Success / confirmation color.
	pub success: String,
	/// Danger / destructive-action color.
	pub danger: String,
	/// Body foreground color.
	pub foreground: String,
	/// Body background color.
	pub background: String,

	// Typography
	/// Font family stack.
	pub font_family: String,
	/// Base font size.
	pub font_size: String,

	// Effects
	/// Corner radius applied to surfaces and controls.
	pub border_radius: String,
	/// Elevation shadow for raised surfaces.
	pub shadow: String,
}

impl Theme {
	/// Convert the theme to a `:root` CSS variable block.
	pub fn to_css_variables(&self) -> String {
		format!(
			":root {{\n  --pt-primary: {};\n  --pt-secondary: {};\n  --pt-success: {};\n  --pt-danger: {};\n  --pt-foreground: {};\n  --pt-background: {};\n  --pt-font-family: {};\n  --pt-font-size: {};\n  --pt-border-radius: {};\n  --pt-shadow: {};\n}}",
			self.primary,
			self.secondary,
			self.success,
			self.danger,
			self.foreground,
			self.background,
			self.font_family,
			self.font_size,
			self.border_radius,
			self.shadow,
		)
	}

	/// Install the theme into the shared stylesheet. Installing the same
	/// theme twice is a no-op; a different theme appends its own block.
	pub fn install(&self) {
		registry::register_raw(&self.to_css_variables());
	}

	/// Set the primary color.
	pub fn primary(mut self, color: impl Into<String>) -> Self {
		self.primary = color.into();
		self
	}

	/// Set the secondary color.
	pub fn secondary(mut self, color: impl Into<String>) -> Self {
		self.secondary = color.into();
		self
	}

	/// Set the success color.
	pub fn success(mut self, color: impl Into<String>) -> Self {
		self.success = color.into();
		self
	}

	/// Set the danger color.
	pub fn danger(mut self, color: impl Into<String>) -> Self {
		self.danger = color.into();
		self
	}

	/// Set the foreground color.
	pub fn foreground(mut self, color: impl Into<String>) -> Self {
		self.foreground = color.into();
		self
	}

	/// Set the background color.
	pub fn background(mut self, color: impl Into<String>) -> Self {
		self.background = color.into();
		self
	}

	/// Set the font family stack.
	pub fn font_family(mut self, family: impl Into<String>) -> Self {
		self.font_family = family.into();
		self
	}

	/// Set the base font size.
	pub fn font_size(mut self, size: impl Into<String>) -> Self {
		self.font_size = size.into();
		self
	}

	/// Set the border radius.
	pub fn border_radius(mut self, radius: impl Into<String>) -> Self {
		self.border_radius = radius.into();
		self
	}

	/// Set the elevation shadow.
	pub fn shadow(mut self, shadow: impl Into<String>) -> Self {
		self.shadow = shadow.into();
		self
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			primary: "#2563eb".into(),
			secondary: "#64748b".into(),
			success: "#16a34a".into(),
			danger: "#dc2626".into(),
			foreground: "#0f172a".into(),
			background: "#ffffff".into(),

			font_family: "system-ui, -apple-system, \"Segoe UI\", Roboto, sans-serif".into(),
			font_size: "1rem".into(),

			border_radius: "0.375rem".into(),
			shadow: "0 0.5rem 1rem rgba(0, 0, 0, 0.15)".into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_variables_carry_every_field() {
		let css = Theme::default().to_css_variables();
		assert!(css.starts_with(":root {"));
		assert!(css.contains("--pt-primary: #2563eb;"));
		assert!(css.contains("--pt-border-radius: 0.375rem;"));
		assert!(css.contains("--pt-shadow: 0 0.5rem 1rem rgba(0, 0, 0, 0.15);"));
	}

	#[test]
	fn builder_methods_override_defaults() {
		let theme = Theme::default()
			.primary("#007bff")
			.font_size("0.875rem")
			.border_radius("0.5rem");

		assert_eq!(theme.primary, "#007bff");
		assert_eq!(theme.font_size, "0.875rem");
		assert_eq!(theme.border_radius, "0.5rem");
	}
}
