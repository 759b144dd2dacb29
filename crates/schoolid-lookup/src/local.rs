use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use schoolid_core::domain::{AccountRecord, LookupQuery, LookupResult};

use crate::strategy::LookupStrategy;

/// Fixed in-memory mapping keyed by `"{student_number}|{name}"`. Exact match
/// only. The optional delay simulates a network round trip so the UI behaves
/// like the remote deployment.
#[derive(Debug, Clone, Default)]
pub struct LocalTable {
    entries: HashMap<String, AccountRecord>,
    delay: Duration,
}

impl LocalTable {
    pub fn new(delay: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            delay,
        }
    }

    pub fn insert(&mut self, student_no: &str, name: &str, id: &str) {
        self.entries
            .insert(format!("{student_no}|{name}"), AccountRecord::new(id));
    }
}

impl LookupStrategy for LocalTable {
    fn source_name(&self) -> &'static str {
        "local"
    }

    fn resolve(&self, query: &LookupQuery) -> LookupResult {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match self.entries.get(&query.table_key()) {
            Some(record) => LookupResult::Found(record.clone()),
            None => LookupResult::NotFound,
        }
    }
}
