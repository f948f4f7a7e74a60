//! Optional observability helpers for the session lifecycle.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `heimdall_client.op` with the `op` and
//!   `stage` (call site) fields.
//! - Enable `metrics` to increment the `heimdall_client_op_total` counter for every
//!   attempt/success/failure, labeled by `op` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Lifecycle operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// An ordinary authenticated service call.
	Request,
	/// The single-flight credential refresh.
	Refresh,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::Request => "request",
			OpKind::Refresh => "refresh",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to a lifecycle helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller (or a settled-failed refresh).
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(OpKind::Request.as_str(), "request");
		assert_eq!(OpKind::Refresh.as_str(), "refresh");
		assert_eq!(OpOutcome::Attempt.as_str(), "attempt");
		assert_eq!(OpOutcome::Success.to_string(), "success");
		assert_eq!(OpOutcome::Failure.to_string(), "failure");
	}
}
