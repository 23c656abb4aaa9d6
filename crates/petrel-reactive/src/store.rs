//! Store - observable state holder with an ordered update stream
//!
//! `Store<T>` is the single-writer home of a piece of UI state. It is cheap to
//! clone (all clones share the value and the subscriber list), readable
//! synchronously, and every applied update is delivered to subscribers exactly
//! once, in order, through the thread-local emission scheduler.
//!
//! ## Example
//!
//! ```
//! use petrel_reactive::Store;
//!
//! let toggled = Store::new(false);
//! let flip = toggled.handle(|state, _: ()| *state = !*state);
//!
//! flip.call(());
//! assert!(toggled.get());
//! ```

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use crate::runtime::{self, SubscriptionId};

type SubscriberFn<T> = Box<dyn FnMut(&T)>;

struct SubEntry<T> {
	id: SubscriptionId,
	// Taken out of the slot while the callback runs, so a callback may
	// unsubscribe itself (or others) without a re-borrow.
	callback: Option<SubscriberFn<T>>,
}

/// Ordered subscriber list shared by [`Store`] and [`Emitter`].
struct SubscriberList<T> {
	entries: Rc<RefCell<Vec<SubEntry<T>>>>,
}

impl<T> Clone for SubscriberList<T> {
	fn clone(&self) -> Self {
		Self {
			entries: Rc::clone(&self.entries),
		}
	}
}

impl<T: 'static> SubscriberList<T> {
	fn new() -> Self {
		Self {
			entries: Rc::new(RefCell::new(Vec::new())),
		}
	}

	fn subscribe(&self, callback: SubscriberFn<T>) -> Subscription {
		let id = SubscriptionId::next();
		self.entries.borrow_mut().push(SubEntry {
			id,
			callback: Some(callback),
		});

		let entries = Rc::downgrade(&self.entries);
		Subscription::new(move || {
			if let Some(entries) = entries.upgrade() {
				entries.borrow_mut().retain(|e| e.id != id);
			}
		})
	}

	/// Queue one emission carrying `snapshot`. Subscribers present at delivery
	/// time are notified in subscription order.
	fn emit(&self, snapshot: T) {
		let entries = Rc::clone(&self.entries);
		runtime::enqueue(Box::new(move || {
			let ids: Vec<SubscriptionId> = entries.borrow().iter().map(|e| e.id).collect();
			for id in ids {
				let taken = {
					let mut list = entries.borrow_mut();
					list.iter_mut()
						.find(|e| e.id == id)
						.and_then(|e| e.callback.take())
				};
				if let Some(mut callback) = taken {
					callback(&snapshot);
					let mut list = entries.borrow_mut();
					// The callback may have dropped its own Subscription; only
					// restore the slot if it still exists.
					if let Some(entry) = list.iter_mut().find(|e| e.id == id) {
						entry.callback = Some(callback);
					}
				}
			}
		}));
	}

	fn len(&self) -> usize {
		self.entries.borrow().len()
	}
}

/// RAII handle for one stream subscription.
///
/// Dropping the handle removes the subscriber; no notification is delivered
/// after that point. Each DOM binding owns exactly one `Subscription`.
pub struct Subscription {
	cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	pub(crate) fn new(cancel: impl FnOnce() + 'static) -> Self {
		Self {
			cancel: Some(Box::new(cancel)),
		}
	}

	/// Cancel the subscription now. Equivalent to dropping the handle.
	pub fn cancel(mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}

	/// Keep the subscription alive for the rest of the program without
	/// holding on to the handle. Used for app-lifetime bindings at the
	/// composition root.
	pub fn forget(mut self) {
		self.cancel = None;
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.cancel.is_some())
			.finish()
	}
}

/// A reactive store holding a current value and an ordered update stream.
///
/// All clones of a `Store` share the same value and subscriber list. The store
/// is created at component construction and its subscriptions are torn down
/// when the owning component unmounts.
///
/// ## Update discipline
///
/// `set` and `update` apply the mutation immediately (so `get()` is always
/// current) and queue one emission carrying a snapshot of the new value. The
/// stream therefore reflects every applied update exactly once, in order,
/// even when updates are issued from inside another store's handler.
pub struct Store<T: 'static> {
	value: Rc<RefCell<T>>,
	subscribers: SubscriberList<T>,
}

impl<T: 'static> Clone for Store<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			subscribers: self.subscribers.clone(),
		}
	}
}

impl<T: 'static> Store<T> {
	/// Create a new store with the given initial value.
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			subscribers: SubscriberList::new(),
		}
	}

	/// Get the current value (synchronous).
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Read the current value through a borrow, without cloning.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Replace the value and emit it on the update stream.
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.value.borrow_mut() = value;
		self.emit_current();
	}

	/// Mutate the value in place and emit the result on the update stream.
	pub fn update(&self, f: impl FnOnce(&mut T))
	where
		T: Clone,
	{
		f(&mut self.value.borrow_mut());
		self.emit_current();
	}

	fn emit_current(&self)
	where
		T: Clone,
	{
		let snapshot = self.value.borrow().clone();
		self.subscribers.emit(snapshot);
	}

	/// Subscribe to the update stream.
	///
	/// The callback observes every update applied after this call, in order.
	/// It is *not* invoked with the current value; callers that need an
	/// initial application read `get()` first (the binding layer does).
	pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
		self.subscribers.subscribe(Box::new(callback))
	}

	/// Derive a handler that applies `f` against the current value.
	///
	/// The handler is cloneable and independent of the store's lifetime
	/// handle; invoking it routes through the same update path as
	/// [`Store::update`].
	pub fn handle<A, F>(&self, f: F) -> Handler<A>
	where
		T: Clone,
		A: 'static,
		F: Fn(&mut T, A) + 'static,
	{
		let store = self.clone();
		Handler {
			apply: Rc::new(move |action| store.update(|value| f(value, action))),
		}
	}

	/// Derive a handler that updates the value and optionally emits a side
	/// value, distinct from the stored value, through `emitter`.
	pub fn handle_emit<A, E, F>(&self, emitter: Emitter<E>, f: F) -> Handler<A>
	where
		T: Clone,
		A: 'static,
		E: Clone + 'static,
		F: Fn(&mut T, A) -> Option<E> + 'static,
	{
		let store = self.clone();
		Handler {
			apply: Rc::new(move |action| {
				let mut side = None;
				store.update(|value| side = f(value, action));
				if let Some(side) = side {
					emitter.emit(side);
				}
			}),
		}
	}

	/// Derive a read-only mapped sub-stream.
	///
	/// Subscribers of the derived store observe `project` applied to every
	/// parent emission. Writes always go through handlers on the parent,
	/// preserving the single-writer discipline.
	pub fn map<U, F>(&self, project: F) -> DerivedStore<T, U>
	where
		F: Fn(&T) -> U + 'static,
	{
		DerivedStore {
			parent: self.clone(),
			project: Rc::new(project),
		}
	}

	/// Number of live subscriptions. Test hook.
	#[doc(hidden)]
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.len()
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Store<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Store")
			.field("value", &*self.value.borrow())
			.field("subscribers", &self.subscribers.len())
			.finish()
	}
}

/// A cloneable update handler derived from a store.
///
/// Invoking the handler applies the captured updating function against the
/// store's current value. Handlers are what event listeners are wired to.
pub struct Handler<A: 'static = ()> {
	apply: Rc<dyn Fn(A)>,
}

impl<A: 'static> Handler<A> {
	/// Wrap an arbitrary function as a handler. Used for listeners that do
	/// not target a store.
	pub fn from_fn(f: impl Fn(A) + 'static) -> Self {
		Self { apply: Rc::new(f) }
	}

	/// Invoke the handler with `action`.
	pub fn call(&self, action: A) {
		(self.apply)(action);
	}

	/// Adapt the handler's action type.
	pub fn adapt<B: 'static>(&self, f: impl Fn(B) -> A + 'static) -> Handler<B> {
		let inner = Rc::clone(&self.apply);
		Handler {
			apply: Rc::new(move |b| inner(f(b))),
		}
	}
}

impl<A: 'static> Clone for Handler<A> {
	fn clone(&self) -> Self {
		Self {
			apply: Rc::clone(&self.apply),
		}
	}
}

impl<A: 'static> fmt::Debug for Handler<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Handler").field("apply", &"<fn>").finish()
	}
}

/// A standalone stream of side values, produced by emitting handlers.
///
/// An `Emitter` carries values that are distinct from any stored value, e.g.
/// a "submitted" event carrying the validated form payload. Delivery uses the
/// same ordered emission queue as store updates.
pub struct Emitter<E: 'static> {
	subscribers: SubscriberList<E>,
}

impl<E: 'static> Clone for Emitter<E> {
	fn clone(&self) -> Self {
		Self {
			subscribers: self.subscribers.clone(),
		}
	}
}

impl<E: 'static> Default for Emitter<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E: 'static> Emitter<E> {
	/// Create an emitter with no subscribers.
	pub fn new() -> Self {
		Self {
			subscribers: SubscriberList::new(),
		}
	}

	/// Emit one side value to all subscribers, in order.
	pub fn emit(&self, value: E) {
		self.subscribers.emit(value);
	}

	/// Subscribe to the side-value stream.
	pub fn subscribe(&self, callback: impl FnMut(&E) + 'static) -> Subscription {
		self.subscribers.subscribe(Box::new(callback))
	}
}

impl<E: 'static> fmt::Debug for Emitter<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Emitter")
			.field("subscribers", &self.subscribers.len())
			.finish()
	}
}

/// A read-only projection of a parent store's stream.
///
/// Created by [`Store::map`]. Reads compute the projection on demand;
/// subscriptions observe the projection of every parent emission. A derived
/// store has no update operations - mutate the parent instead.
pub struct DerivedStore<T: 'static, U> {
	parent: Store<T>,
	project: Rc<dyn Fn(&T) -> U>,
}

impl<T: 'static, U> Clone for DerivedStore<T, U> {
	fn clone(&self) -> Self {
		Self {
			parent: self.parent.clone(),
			project: Rc::clone(&self.project),
		}
	}
}

impl<T: 'static, U: 'static> DerivedStore<T, U> {
	/// Compute the projection of the parent's current value.
	pub fn get(&self) -> U {
		self.parent.with(|value| (self.project)(value))
	}

	/// Subscribe to the projected stream.
	pub fn subscribe(&self, mut callback: impl FnMut(&U) + 'static) -> Subscription {
		let project = Rc::clone(&self.project);
		self.parent
			.subscribe(move |value| callback(&project(value)))
	}

	/// Chain a further projection.
	pub fn map<V: 'static>(&self, f: impl Fn(&U) -> V + 'static) -> DerivedStore<T, V> {
		let project = Rc::clone(&self.project);
		DerivedStore {
			parent: self.parent.clone(),
			project: Rc::new(move |value| f(&project(value))),
		}
	}
}

impl<T: 'static, U: fmt::Debug + 'static> fmt::Debug for DerivedStore<T, U> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DerivedStore")
			.field("value", &self.get())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn store_get_and_set() {
		let store = Store::new(1);
		assert_eq!(store.get(), 1);
		store.set(5);
		assert_eq!(store.get(), 5);
	}

	#[test]
	fn store_update_in_place() {
		let store = Store::new(String::from("a"));
		store.update(|s| s.push('b'));
		assert_eq!(store.get(), "ab");
	}

	#[test]
	fn clones_share_value() {
		let a = Store::new(0);
		let b = a.clone();
		a.set(7);
		assert_eq!(b.get(), 7);
	}

	#[test]
	fn subscription_drop_stops_delivery() {
		let store = Store::new(0);
		let seen = Rc::new(RefCell::new(Vec::new()));

		let sub = store.subscribe({
			let seen = seen.clone();
			move |n| seen.borrow_mut().push(*n)
		});
		store.set(1);
		drop(sub);
		store.set(2);

		assert_eq!(*seen.borrow(), vec![1]);
		assert_eq!(store.subscriber_count(), 0);
	}

	#[test]
	fn handler_applies_updating_function() {
		let store = Store::new(10);
		let add = store.handle(|value, amount: i32| *value += amount);
		add.call(5);
		add.call(1);
		assert_eq!(store.get(), 16);
	}

	#[test]
	fn handler_adapt_changes_action_type() {
		let store = Store::new(0usize);
		let set_len = store.handle(|value, len: usize| *value = len);
		let set_from_str = set_len.adapt(|s: &str| s.len());
		set_from_str.call("abcd");
		assert_eq!(store.get(), 4);
	}

	#[test]
	fn emitting_handler_produces_side_values() {
		let store = Store::new(0);
		let emitter = Emitter::new();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let _sub = emitter.subscribe({
			let seen = seen.clone();
			move |e: &i32| seen.borrow_mut().push(*e)
		});

		// Emits the previous value whenever it changes.
		let swap = store.handle_emit(emitter, |value, next: i32| {
			let previous = *value;
			*value = next;
			(previous != next).then_some(previous)
		});

		swap.call(3);
		swap.call(3);
		swap.call(9);

		assert_eq!(store.get(), 9);
		assert_eq!(*seen.borrow(), vec![0, 3]);
	}

	#[test]
	fn derived_store_projects_reads_and_stream() {
		let store = Store::new(vec![1, 2, 3]);
		let len = store.map(|v| v.len());
		assert_eq!(len.get(), 3);

		let seen = Rc::new(RefCell::new(Vec::new()));
		let _sub = len.subscribe({
			let seen = seen.clone();
			move |n| seen.borrow_mut().push(*n)
		});

		store.update(|v| v.push(4));
		store.update(|v| v.clear());

		assert_eq!(*seen.borrow(), vec![4, 0]);
	}

	#[test]
	fn derived_store_chains() {
		let store = Store::new(2);
		let doubled_string = store.map(|n| n * 2).map(|n| n.to_string());
		assert_eq!(doubled_string.get(), "4");
	}

	#[test]
	fn unsubscribe_from_inside_callback() {
		let store = Store::new(0);
		let seen = Rc::new(RefCell::new(0));
		let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

		let sub = store.subscribe({
			let seen = seen.clone();
			let slot = slot.clone();
			move |_| {
				*seen.borrow_mut() += 1;
				// Drop our own subscription on first delivery.
				slot.borrow_mut().take();
			}
		});
		*slot.borrow_mut() = Some(sub);

		store.set(1);
		store.set(2);
		assert_eq!(*seen.borrow(), 1);
	}
}
