//! DOM event types and RAII listener handles

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;

/// Standard DOM event categories bridged into store updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
	/// Pointer click.
	Click,
	/// Double click.
	DblClick,
	/// Input value changed (fires per keystroke).
	Input,
	/// Committed value change (checkboxes, selects, blur of inputs).
	Change,
	/// Form submission.
	Submit,
	/// Key pressed down.
	KeyDown,
	/// Key released.
	KeyUp,
	/// Element gained focus.
	Focus,
	/// Element lost focus.
	Blur,
	/// Pointer pressed down.
	PointerDown,
	/// Pointer released.
	PointerUp,
	/// Pointer entered the element.
	PointerEnter,
	/// Pointer left the element.
	PointerLeave,
}

impl EventType {
	/// The DOM event name (`addEventListener` spelling).
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Click => "click",
			Self::DblClick => "dblclick",
			Self::Input => "input",
			Self::Change => "change",
			Self::Submit => "submit",
			Self::KeyDown => "keydown",
			Self::KeyUp => "keyup",
			Self::Focus => "focus",
			Self::Blur => "blur",
			Self::PointerDown => "pointerdown",
			Self::PointerUp => "pointerup",
			Self::PointerEnter => "pointerenter",
			Self::PointerLeave => "pointerleave",
		}
	}
}

/// The event value passed to listeners.
///
/// On wasm this is the real `web_sys::Event`; on native targets it is a
/// [`StubEvent`] so listener wiring stays testable off-browser.
#[cfg(target_arch = "wasm32")]
pub type DomEvent = web_sys::Event;

/// The event value passed to listeners (native stand-in).
#[cfg(not(target_arch = "wasm32"))]
pub type DomEvent = StubEvent;

/// Placeholder event delivered by the native virtual backend.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone)]
pub struct StubEvent {
	/// The event category that was fired.
	pub event_type: Option<EventType>,
}

/// RAII handle for a registered event listener.
///
/// Dropping the handle removes the listener. Handles are owned by the element
/// they were registered on and dropped when the element is unbound.
#[cfg(target_arch = "wasm32")]
pub struct EventHandle {
	target: web_sys::EventTarget,
	event_type: EventType,
	closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

#[cfg(target_arch = "wasm32")]
impl EventHandle {
	/// Register `callback` on `target` and return the owning handle.
	pub(crate) fn attach(
		target: web_sys::EventTarget,
		event_type: EventType,
		callback: impl FnMut(web_sys::Event) + 'static,
	) -> Self {
		let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
		// A failure here means the browser environment is unusable; there is
		// nothing sensible to propagate to.
		let _ = target
			.add_event_listener_with_callback(event_type.as_str(), closure.as_ref().unchecked_ref());
		Self {
			target,
			event_type,
			closure: Some(closure),
		}
	}
}

#[cfg(target_arch = "wasm32")]
impl Drop for EventHandle {
	fn drop(&mut self) {
		if let Some(closure) = self.closure.take() {
			let _ = self.target.remove_event_listener_with_callback(
				self.event_type.as_str(),
				closure.as_ref().unchecked_ref(),
			);
		}
	}
}

/// RAII handle for a registered event listener (native virtual backend).
#[cfg(not(target_arch = "wasm32"))]
pub struct EventHandle {
	pub(crate) id: u64,
	pub(crate) listeners: std::rc::Weak<core::cell::RefCell<Vec<super::element::ListenerEntry>>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Drop for EventHandle {
	fn drop(&mut self) {
		if let Some(listeners) = self.listeners.upgrade() {
			listeners.borrow_mut().retain(|entry| entry.id != self.id);
		}
	}
}

impl core::fmt::Debug for EventHandle {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("EventHandle").finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn event_names_match_dom_spelling() {
		assert_eq!(EventType::Click.as_str(), "click");
		assert_eq!(EventType::Change.as_str(), "change");
		assert_eq!(EventType::PointerDown.as_str(), "pointerdown");
		assert_eq!(EventType::KeyDown.as_str(), "keydown");
	}
}
