//! Petrel Reactive - Observable State Stores
//!
//! The reactive foundation of the Petrel UI library. A [`Store`] owns a current
//! value and exposes a live, ordered stream of updates; DOM bindings and other
//! consumers subscribe to that stream and receive every applied update exactly
//! once, in order.
//!
//! ## Key Features
//!
//! - **Synchronous reads**: `Store::get()` always returns the current value.
//! - **Ordered update stream**: subscribers are notified in subscription order,
//!   one emission at a time. Re-entrant updates issued from inside a handler are
//!   queued, never processed recursively.
//! - **Handlers**: [`Store::handle`] derives a cloneable [`Handler`] that applies
//!   an updating function against the current value; [`Store::handle_emit`]
//!   additionally emits a side value through an [`Emitter`].
//! - **Derived streams**: [`Store::map`] produces a read-only [`DerivedStore`]
//!   whose subscribers observe a projection of every parent emission.
//! - **RAII teardown**: dropping a [`Subscription`] removes the subscriber.
//!
//! ## Concurrency model
//!
//! Single-threaded and cooperative. All scheduler state is thread-local; an
//! emission's handlers run to completion before the next emission is processed.
//! Failures inside a handler are not caught - they surface as panics at the
//! point of emission.
//!
//! ## Example
//!
//! ```
//! use petrel_reactive::Store;
//!
//! let count = Store::new(0);
//! let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
//!
//! let _sub = count.subscribe({
//!     let seen = seen.clone();
//!     move |n| seen.borrow_mut().push(*n)
//! });
//!
//! count.set(1);
//! count.update(|n| *n += 1);
//! assert_eq!(*seen.borrow(), vec![1, 2]);
//! assert_eq!(count.get(), 2);
//! ```

#![warn(missing_docs)]

pub mod runtime;
pub mod store;

pub use runtime::SubscriptionId;
pub use store::{DerivedStore, Emitter, Handler, Store, Subscription};
