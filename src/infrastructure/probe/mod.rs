//! Outbound URL probes.

pub mod http_probe;

pub use http_probe::{DEFAULT_PROBE_TIMEOUT, HttpUrlProbe};
