//! Emission scheduler - thread-local, run-to-completion
//!
//! Every store update is delivered through this scheduler. An update enqueues
//! an emission job; if no emission is currently being processed the queue is
//! drained immediately, otherwise the job waits its turn. This gives the two
//! guarantees the binding layer relies on:
//!
//! - Handlers run to completion before the next emission is processed.
//! - Emissions are delivered in the order their updates were applied, even
//!   when a handler re-entrantly updates a store mid-notification.
//!
//! All state is thread-local: the library is single-threaded and cooperative,
//! so no locking is involved anywhere.

use core::cell::{Cell, RefCell};
use core::fmt;
use std::collections::VecDeque;

/// Identifier for a single stream subscription.
///
/// Allocated from a thread-local counter. Used by the store layer to locate
/// and remove subscribers, and by RAII [`Subscription`](crate::Subscription)
/// handles on drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
	/// Allocate the next free id.
	pub fn next() -> Self {
		NEXT_ID.with(|n| {
			let id = n.get();
			n.set(id + 1);
			Self(id)
		})
	}
}

impl fmt::Display for SubscriptionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "sub#{}", self.0)
	}
}

thread_local! {
	static NEXT_ID: Cell<u64> = const { Cell::new(1) };
	static SCHEDULER: RefCell<Scheduler> = RefCell::new(Scheduler::new());
}

type Job = Box<dyn FnOnce()>;

struct Scheduler {
	queue: VecDeque<Job>,
	draining: bool,
}

impl Scheduler {
	fn new() -> Self {
		Self {
			queue: VecDeque::new(),
			draining: false,
		}
	}
}

/// Enqueue an emission job.
///
/// If the scheduler is idle the queue is drained before this call returns, so
/// a top-level `set()` delivers its notifications synchronously. If a drain is
/// already in progress (the update was issued from inside a handler) the job
/// is left in the queue and picked up by the active drain loop.
pub(crate) fn enqueue(job: Job) {
	let drain_here = SCHEDULER.with(|s| {
		let mut s = s.borrow_mut();
		s.queue.push_back(job);
		if s.draining {
			false
		} else {
			s.draining = true;
			true
		}
	});
	if drain_here {
		drain();
	}
}

fn drain() {
	// The flag must come back down even if a job panics and the panic is
	// caught upstream, or every later emission on this thread would queue
	// without ever draining.
	struct DrainGuard;
	impl Drop for DrainGuard {
		fn drop(&mut self) {
			SCHEDULER.with(|s| s.borrow_mut().draining = false);
		}
	}
	let _guard = DrainGuard;

	// Jobs are popped one at a time with the scheduler borrow released before
	// the job runs, because a handler may enqueue further emissions.
	loop {
		let job = SCHEDULER.with(|s| s.borrow_mut().queue.pop_front());
		match job {
			Some(job) => job(),
			None => break,
		}
	}
}

/// Number of emissions currently waiting in the queue. Test hook.
#[doc(hidden)]
pub fn pending_emissions() -> usize {
	SCHEDULER.with(|s| s.borrow().queue.len())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::rc::Rc;

	#[test]
	fn ids_are_unique_and_increasing() {
		let a = SubscriptionId::next();
		let b = SubscriptionId::next();
		assert!(b > a);
		assert_ne!(a, b);
	}

	#[test]
	fn idle_scheduler_runs_jobs_synchronously() {
		let ran = Rc::new(Cell::new(false));
		let ran_clone = ran.clone();
		enqueue(Box::new(move || ran_clone.set(true)));
		assert!(ran.get());
		assert_eq!(pending_emissions(), 0);
	}

	#[test]
	fn scheduler_recovers_after_a_panicking_job() {
		let caught = std::panic::catch_unwind(|| {
			enqueue(Box::new(|| panic!("handler failed")));
		});
		assert!(caught.is_err());

		// The next emission must still drain synchronously.
		let ran = Rc::new(Cell::new(false));
		let ran_clone = ran.clone();
		enqueue(Box::new(move || ran_clone.set(true)));
		assert!(ran.get());
		assert_eq!(pending_emissions(), 0);
	}

	#[test]
	fn reentrant_jobs_are_deferred_in_order() {
		let log = Rc::new(RefCell::new(Vec::new()));

		let log_a = log.clone();
		enqueue(Box::new(move || {
			log_a.borrow_mut().push("outer");
			let log_b = log_a.clone();
			enqueue(Box::new(move || log_b.borrow_mut().push("inner")));
			// The inner job must not have run yet.
			log_a.borrow_mut().push("outer-end");
		}));

		assert_eq!(*log.borrow(), vec!["outer", "outer-end", "inner"]);
	}
}
