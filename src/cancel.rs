//! Generation-tagged cancellation scope shared by all in-flight requests.
//!
//! A naive "global kill switch" stays cancelled forever and permanently
//! disables the client after a single abort. [`CancelScope`] instead tags the
//! live [`CancellationToken`] with a monotonically increasing generation:
//! [`CancelScope::abort_all`] cancels the current generation's token and
//! atomically mints the next one, so requests issued afterwards proceed
//! normally while everything bound to the old generation observes
//! cancellation.

// self
use crate::_prelude::*;

/// Owns the live cancellation token and its generation counter.
#[derive(Debug, Default)]
pub struct CancelScope {
	inner: RwLock<ScopeState>,
}
impl CancelScope {
	/// Creates a scope at generation zero with a fresh token.
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshots the active generation's token.
	///
	/// Callers must capture the snapshot before dispatching a request so the
	/// request stays bound to exactly one generation for its whole lifetime.
	pub fn current(&self) -> ScopedToken {
		let state = self.inner.read();

		ScopedToken { generation: state.generation, token: state.token.clone() }
	}

	/// Returns the active generation number.
	pub fn generation(&self) -> u64 {
		self.inner.read().generation
	}

	/// Cancels every request bound to the current generation and mints the
	/// next one. Returns the new generation number.
	///
	/// Requests that snapshot the scope after this call are unaffected.
	pub fn abort_all(&self) -> u64 {
		let mut state = self.inner.write();

		state.token.cancel();

		state.generation += 1;
		state.token = CancellationToken::new();

		state.generation
	}
}

#[derive(Debug)]
struct ScopeState {
	generation: u64,
	token: CancellationToken,
}
impl Default for ScopeState {
	fn default() -> Self {
		Self { generation: 0, token: CancellationToken::new() }
	}
}

/// Token snapshot bound to the generation that was active when it was taken.
#[derive(Clone, Debug)]
pub struct ScopedToken {
	/// Generation the token belongs to.
	pub generation: u64,
	/// Cancellation handle for that generation.
	pub token: CancellationToken,
}
impl ScopedToken {
	/// Returns true once the owning generation has been aborted.
	pub fn is_cancelled(&self) -> bool {
		self.token.is_cancelled()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn abort_invalidates_only_the_captured_generation() {
		let scope = CancelScope::new();
		let before = scope.current();

		assert_eq!(before.generation, 0);
		assert!(!before.is_cancelled());

		let next = scope.abort_all();

		assert_eq!(next, 1);
		assert!(before.is_cancelled());

		let after = scope.current();

		assert_eq!(after.generation, 1);
		assert!(!after.is_cancelled(), "A freshly minted generation must never be pre-cancelled.");
	}

	#[test]
	fn generations_increase_monotonically() {
		let scope = CancelScope::new();

		for expected in 1..=3 {
			assert_eq!(scope.abort_all(), expected);
		}
		assert_eq!(scope.generation(), 3);
	}

	#[test]
	fn snapshots_share_the_live_token_until_abort() {
		let scope = CancelScope::new();
		let a = scope.current();
		let b = scope.current();

		scope.abort_all();

		assert!(a.is_cancelled());
		assert!(b.is_cancelled());
	}
}
