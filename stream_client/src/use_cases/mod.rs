// Use cases layer: the client-side connect/poll/reconnect lifecycle.

pub mod lifecycle;
pub mod metrics;
pub mod retry;

#[cfg(test)]
pub(crate) mod test_support;

pub use metrics::MetricsSampler;
pub use retry::{PollCanceller, PollError, PollPolicy, poll_until};
