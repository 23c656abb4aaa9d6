//! Responsive breakpoints
//!
//! Mobile-first breakpoints with minimum widths. A [`StyleDecl`] block can
//! scope properties to a breakpoint, and [`ResponsiveValue`] carries a single
//! value that varies across them.
//!
//! [`StyleDecl`]: super::StyleDecl

/// Responsive breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
	/// Extra small (< 576px), the mobile-first base
	Xs,
	/// Small (>= 576px)
	Sm,
	/// Medium (>= 768px)
	Md,
	/// Large (>= 992px)
	Lg,
	/// Extra large (>= 1200px)
	Xl,
	/// Extra extra large (>= 1400px)
	Xxl,
}

impl Breakpoint {
	/// All breakpoints in ascending width order.
	pub const ALL: [Breakpoint; 6] = [
		Self::Xs,
		Self::Sm,
		Self::Md,
		Self::Lg,
		Self::Xl,
		Self::Xxl,
	];

	/// Minimum width in pixels, `None` for the base breakpoint.
	pub fn min_width(&self) -> Option<u32> {
		match self {
			Self::Xs => None,
			Self::Sm => Some(576),
			Self::Md => Some(768),
			Self::Lg => Some(992),
			Self::Xl => Some(1200),
			Self::Xxl => Some(1400),
		}
	}

	/// Short suffix used in class names and debugging output.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Xs => "xs",
			Self::Sm => "sm",
			Self::Md => "md",
			Self::Lg => "lg",
			Self::Xl => "xl",
			Self::Xxl => "xxl",
		}
	}

	/// The `@media` condition for this breakpoint, `None` for the base.
	pub fn media_query(&self) -> Option<String> {
		self.min_width().map(|px| format!("(min-width: {px}px)"))
	}
}

/// A value that varies by breakpoint, mobile-first.
///
/// Unset breakpoints inherit from the nearest smaller one, so
/// `ResponsiveValue::new("1rem").md("2rem")` means `1rem` below 768px and
/// `2rem` from there up.
#[derive(Debug, Clone)]
pub struct ResponsiveValue<T> {
	/// Base value, always present.
	pub xs: T,
	/// Small (>= 576px) override.
	pub sm: Option<T>,
	/// Medium (>= 768px) override.
	pub md: Option<T>,
	/// Large (>= 992px) override.
	pub lg: Option<T>,
	/// Extra large (>= 1200px) override.
	pub xl: Option<T>,
	/// Extra extra large (>= 1400px) override.
	pub xxl: Option<T>,
}

impl<T> ResponsiveValue<T> {
	/// Create a responsive value with its base.
	pub fn new(base: T) -> Self {
		Self {
			xs: base,
			sm: None,
			md: None,
			lg: None,
			xl: None,
			xxl: None,
		}
	}

	/// Override from the small breakpoint up.
	pub fn sm(mut self, value: T) -> Self {
		self.sm = Some(value);
		self
	}

	/// Override from the medium breakpoint up.
	pub fn md(mut self, value: T) -> Self {
		self.md = Some(value);
		self
	}

	/// Override from the large breakpoint up.
	pub fn lg(mut self, value: T) -> Self {
		self.lg = Some(value);
		self
	}

	/// Override from the extra large breakpoint up.
	pub fn xl(mut self, value: T) -> Self {
		self.xl = Some(value);
		self
	}

	/// Override from the extra extra large breakpoint up.
	pub fn xxl(mut self, value: T) -> Self {
		self.xxl = Some(value);
		self
	}

	/// The explicit override at `breakpoint`, if any. The base has no
	/// override; read `xs` directly.
	pub fn override_at(&self, breakpoint: Breakpoint) -> Option<&T> {
		match breakpoint {
			Breakpoint::Xs => None,
			Breakpoint::Sm => self.sm.as_ref(),
			Breakpoint::Md => self.md.as_ref(),
			Breakpoint::Lg => self.lg.as_ref(),
			Breakpoint::Xl => self.xl.as_ref(),
			Breakpoint::Xxl => self.xxl.as_ref(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn min_widths_ascend() {
		assert_eq!(Breakpoint::Xs.min_width(), None);
		assert_eq!(Breakpoint::Sm.min_width(), Some(576));
		assert_eq!(Breakpoint::Md.min_width(), Some(768));
		assert_eq!(Breakpoint::Lg.min_width(), Some(992));
		assert_eq!(Breakpoint::Xl.min_width(), Some(1200));
		assert_eq!(Breakpoint::Xxl.min_width(), Some(1400));
	}

	#[test]
	fn media_queries() {
		assert_eq!(Breakpoint::Xs.media_query(), None);
		assert_eq!(
			Breakpoint::Md.media_query().as_deref(),
			Some("(min-width: 768px)")
		);
	}

	#[test]
	fn overrides_are_sparse() {
		let value = ResponsiveValue::new("1rem").md("2rem").xl("3rem");
		assert_eq!(value.xs, "1rem");
		assert_eq!(value.override_at(Breakpoint::Sm), None);
		assert_eq!(value.override_at(Breakpoint::Md), Some(&"2rem"));
		assert_eq!(value.override_at(Breakpoint::Lg), None);
		assert_eq!(value.override_at(Breakpoint::Xl), Some(&"3rem"));
	}
}
