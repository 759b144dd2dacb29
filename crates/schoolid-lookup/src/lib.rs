pub mod error;
pub mod factory;
pub mod local;
pub mod remote;
pub mod strategy;

pub use error::{LookupError, Result};
pub use factory::build_strategy;
pub use local::LocalTable;
pub use remote::{decode_body, RemoteEndpoint};
pub use strategy::LookupStrategy;
