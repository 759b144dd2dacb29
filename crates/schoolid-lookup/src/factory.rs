use std::sync::Arc;
use std::time::Duration;

use schoolid_config::{AppConfig, Strategy};

use crate::error::Result;
use crate::local::LocalTable;
use crate::remote::RemoteEndpoint;
use crate::strategy::LookupStrategy;

/// Builds the resolution backend a deployment configured. An empty local
/// table stays empty; every lookup against it misses.
pub fn build_strategy(config: &AppConfig) -> Result<Arc<dyn LookupStrategy>> {
    match config.strategy {
        Strategy::Remote => {
            let remote = RemoteEndpoint::new(config.remote.endpoint.clone())?;
            Ok(Arc::new(remote))
        }
        Strategy::Local => {
            let mut table = LocalTable::new(Duration::from_millis(config.local.delay_ms));
            for entry in &config.local.entries {
                table.insert(&entry.student_no, &entry.name, &entry.id);
            }
            Ok(Arc::new(table))
        }
    }
}
