//! Request middleware.
//!
//! [`Trace`] correlates logs with responses; [`FaultInterceptor`] is the
//! last-resort error boundary.

pub mod fault;
pub mod trace;

pub use fault::FaultInterceptor;
pub use trace::Trace;
