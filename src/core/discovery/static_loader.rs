use std::cell::{Cell, RefCell};

use crate::core::errors::{LsgoError, Result};

use super::{LoadConfig, PackageLoader, PackageRecord};

/// Serves a fixed load result from memory, recording how it was called.
///
/// Useful for embedding the pipeline where packages are already known, and
/// for exercising discovery without a Go toolchain.
#[derive(Debug)]
pub struct StaticPackageLoader {
    outcome: std::result::Result<Vec<PackageRecord>, String>,
    calls: Cell<usize>,
    last_patterns: RefCell<Vec<String>>,
}

impl StaticPackageLoader {
    pub fn new(records: Vec<PackageRecord>) -> Self {
        Self {
            outcome: Ok(records),
            calls: Cell::new(0),
            last_patterns: RefCell::new(Vec::new()),
        }
    }

    /// A loader whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            calls: Cell::new(0),
            last_patterns: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.get()
    }

    pub fn last_patterns(&self) -> Vec<String> {
        self.last_patterns.borrow().clone()
    }
}

impl PackageLoader for StaticPackageLoader {
    fn load(&self, config: &LoadConfig, patterns: &[String]) -> Result<Vec<PackageRecord>> {
        self.calls.set(self.calls.get() + 1);
        *self.last_patterns.borrow_mut() = patterns.to_vec();

        let records = self
            .outcome
            .as_ref()
            .map_err(|message| LsgoError::discovery(message.clone(), patterns))?;

        Ok(records
            .iter()
            .map(|record| PackageRecord {
                name: if config.need_name {
                    record.name.clone()
                } else {
                    String::new()
                },
                files: if config.need_files {
                    record.files.clone()
                } else {
                    Vec::new()
                },
                ..record.clone()
            })
            .collect())
    }
}
