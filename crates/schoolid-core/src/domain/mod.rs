pub mod query;
pub mod record;
pub mod result;

pub use query::LookupQuery;
pub use record::AccountRecord;
pub use result::{reason, LookupResult};
