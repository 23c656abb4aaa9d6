//! Per-field reactive bindings
//!
//! A binding connects one store stream to one DOM field: a text node, an
//! attribute, a class token, or a boolean property. On every emission only
//! that field is written, never the surrounding subtree.
//!
//! Each binding owns exactly one [`Subscription`], stored on the element it
//! writes to. Unbinding the element drops the subscriptions, after which no
//! emission touches the DOM again. Binding closures hold a [`WeakElement`],
//! so a subscription that outlives its element degrades to a no-op instead
//! of keeping the subtree alive.

use core::cell::RefCell;
use std::rc::Rc;

use petrel_reactive::{DerivedStore, Handler, Store, Subscription};

use crate::dom::Element;
use crate::error::Result;

#[cfg(doc)]
use crate::dom::WeakElement;
use crate::warn_log;

/// A readable value stream a binding can attach to.
///
/// Implemented by [`Store`] and [`DerivedStore`]; bindings are written
/// against this trait so either works as a binding source.
pub trait Observable<T: Clone + 'static> {
	/// The current value, synchronously.
	fn current(&self) -> T;

	/// Subscribe to the ordered update stream.
	fn observe(&self, callback: impl Fn(&T) + 'static) -> Subscription;
}

impl<T: Clone + 'static> Observable<T> for Store<T> {
	fn current(&self) -> T {
		self.get()
	}

	fn observe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
		self.subscribe(callback)
	}
}

impl<T: 'static, U: Clone + 'static> Observable<U> for DerivedStore<T, U> {
	fn current(&self) -> U {
		self.get()
	}

	fn observe(&self, callback: impl Fn(&U) + 'static) -> Subscription {
		self.subscribe(callback)
	}
}

/// Bind a text node to a string stream.
///
/// Appends a text node holding the current value and rewrites its character
/// data on every emission.
pub fn bind_text(element: &Element, source: &impl Observable<String>) -> Result<()> {
	let text = element.append_text(&source.current())?;
	let subscription = source.observe(move |value| {
		text.set_text(value);
	});
	element.push_binding(subscription);
	Ok(())
}

/// Bind an attribute to a stream through a formatting function.
///
/// `format` returning `None` removes the attribute, so optional attributes
/// and boolean attributes share one code path.
pub fn bind_attr<T: Clone + 'static>(
	element: &Element,
	name: impl Into<String>,
	source: &impl Observable<T>,
	format: impl Fn(&T) -> Option<String> + 'static,
) -> Result<()> {
	let name = name.into();
	apply_attr(element, &name, format(&source.current()).as_deref())?;

	let weak = element.downgrade();
	let subscription = source.observe(move |value| {
		let Some(element) = weak.upgrade() else {
			return;
		};
		if let Err(err) = apply_attr(&element, &name, format(value).as_deref()) {
			warn_log!("attribute binding failed: {err}");
		}
	});
	element.push_binding(subscription);
	Ok(())
}

/// Bind one class token to a stream.
///
/// `class_of` maps the value to the token that should currently be present.
/// The previously applied token is removed before the new one is added;
/// classes set statically on the element are untouched.
pub fn bind_class<T: Clone + 'static>(
	element: &Element,
	source: &impl Observable<T>,
	class_of: impl Fn(&T) -> Option<String> + 'static,
) -> Result<()> {
	let applied: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

	let apply = {
		let applied = applied.clone();
		move |element: &Element, value: &T| {
			let next = class_of(value);
			let mut applied = applied.borrow_mut();
			if *applied == next {
				return;
			}
			if let Some(old) = applied.take() {
				element.remove_class(&old);
			}
			if let Some(new) = &next {
				element.add_class(new);
			}
			*applied = next;
		}
	};

	apply(element, &source.current());

	let weak = element.downgrade();
	let subscription = source.observe(move |value| {
		if let Some(element) = weak.upgrade() {
			apply(&element, value);
		}
	});
	element.push_binding(subscription);
	Ok(())
}

/// Bind the `checked` state of an input to a boolean stream.
pub fn bind_checked(element: &Element, source: &impl Observable<bool>) -> Result<()> {
	set_checked(element, source.current())?;

	let weak = element.downgrade();
	let subscription = source.observe(move |value| {
		let Some(element) = weak.upgrade() else {
			return;
		};
		if let Err(err) = set_checked(&element, *value) {
			warn_log!("checked binding failed: {err}");
		}
	});
	element.push_binding(subscription);
	Ok(())
}

/// Bind the `disabled` attribute to a boolean stream.
pub fn bind_disabled(element: &Element, source: &impl Observable<bool>) -> Result<()> {
	bind_attr(element, "disabled", source, |disabled| {
		disabled.then(String::new)
	})
}

fn apply_attr(element: &Element, name: &str, value: Option<&str>) -> Result<()> {
	match value {
		Some(value) => element.set_attribute(name, value),
		None => {
			element.remove_attribute(name);
			Ok(())
		}
	}
}

fn set_checked(element: &Element, checked: bool) -> Result<()> {
	element.set_checked_property(checked);
	apply_attr(element, "checked", checked.then_some(""))
}

/// Wrap a handler so rapid calls collapse to the last one.
///
/// Each call supersedes a still-pending earlier call; only the value that
/// survives `delay_ms` of silence reaches the inner handler. On native
/// targets there is no event loop to defer to and calls pass straight
/// through.
#[cfg(target_arch = "wasm32")]
pub fn debounced<A: 'static>(handler: Handler<A>, delay_ms: u32) -> Handler<A> {
	use gloo_timers::callback::Timeout;

	let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
	Handler::from_fn(move |arg: A| {
		let handler = handler.clone();
		let slot = pending.clone();
		// Replacing the slot drops the superseded timeout, cancelling it.
		let timeout = Timeout::new(delay_ms, move || {
			slot.borrow_mut().take();
			handler.call(arg);
		});
		*pending.borrow_mut() = Some(timeout);
	})
}

/// Wrap a handler so rapid calls collapse to the last one (native
/// pass-through).
#[cfg(not(target_arch = "wasm32"))]
pub fn debounced<A: 'static>(handler: Handler<A>, _delay_ms: u32) -> Handler<A> {
	handler
}
