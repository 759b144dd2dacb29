use schoolid_core::domain::{LookupQuery, LookupResult};

/// A resolution backend. Deployments use exactly one; the UI layers hold it
/// as a trait object so backends can be swapped without touching them.
///
/// `resolve` never returns an `Err`: every failure mode is an in-band
/// `LookupResult` variant, terminal for the attempt. Implementations must be
/// callable from a worker thread.
pub trait LookupStrategy: Send + Sync {
    fn source_name(&self) -> &'static str;

    fn resolve(&self, query: &LookupQuery) -> LookupResult;
}
