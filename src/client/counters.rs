// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for refresh operations.
///
/// `joined` counts callers that queued on an in-flight refresh and adopted
/// its settlement instead of performing their own exchange; `attempts`
/// counts every caller, so `attempts - joined` is the number of actual
/// network exchanges started.
#[derive(Debug, Default)]
pub struct RefreshCounters {
	attempts: AtomicU64,
	joined: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
}
impl RefreshCounters {
	/// Returns the total number of refresh requests observed.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of callers that adopted another caller's settlement.
	pub fn joined(&self) -> u64 {
		self.joined.load(Ordering::Relaxed)
	}

	/// Returns the number of refresh exchanges that restored a credential.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of refresh exchanges that settled with failure.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_joined(&self) {
		self.joined.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn counters_accumulate_independently() {
		let counters = RefreshCounters::default();

		counters.record_attempt();
		counters.record_attempt();
		counters.record_joined();
		counters.record_success();
		counters.record_failure();

		assert_eq!(counters.attempts(), 2);
		assert_eq!(counters.joined(), 1);
		assert_eq!(counters.successes(), 1);
		assert_eq!(counters.failures(), 1);
	}
}
