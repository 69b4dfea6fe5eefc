/*! Logical query execution

Parts of a [LogicalQuery] are run in order and their records are appended to each other.
The snapshot is rewritten after each part so that an interrupted run keeps what was already merged.

A failure on the first part is returned as is: the caller decides whether to queue it again.
A failure on a later part is retried right away, since earlier parts are already merged.
If it keeps failing, the remaining parts are dropped and the records merged so far are returned.
!*/
use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, error, warn};

use super::LogicalQuery;
use crate::error::Error;
use crate::io::Persister;
use crate::lang;
use crate::sparql::{Binding, QueryService};

/// A binding reduced to plain strings.
pub type Record = BTreeMap<String, String>;

const AUXILIARY_VERB: &str = "auxiliaryVerb";

/// Drop the value wrappers of a binding.
pub fn to_record(binding: Binding) -> Record {
    binding.into_iter().map(|(k, t)| (k, t.value)).collect()
}

pub struct Executor<'a, S: QueryService + ?Sized> {
    service: &'a S,
    persister: &'a Persister,
    max_attempts: usize,
}

impl<'a, S: QueryService + ?Sized> Executor<'a, S> {
    pub fn new(service: &'a S, persister: &'a Persister, max_attempts: usize) -> Self {
        Self {
            service,
            persister,
            max_attempts,
        }
    }

    /// Run every part of `query` and return the merged records.
    pub fn execute(&self, query: &LogicalQuery) -> Result<Vec<Record>, Error> {
        let parts = query.parts();
        let (first, rest) = parts
            .split_first()
            .ok_or_else(|| Error::Custom(format!("no query file for {}", query)))?;

        let mut records = self.run_part(first)?;
        self.persister
            .checkpoint(query.language(), query.category(), &records)?;

        let auxiliary_split = lang::uses_auxiliary_split(query.language());
        for part in rest {
            let mut more = match self.run_part_with_retries(part) {
                Ok(more) => more,
                Err(e @ Error::RetryExhausted { .. }) => {
                    // later parts are dropped, what is merged so far is kept.
                    error!("[{}] {}, keeping {} records", query, e, records.len());
                    break;
                }
                Err(e) => return Err(e),
            };
            if auxiliary_split {
                for r in more.iter_mut() {
                    r.entry(AUXILIARY_VERB.to_string()).or_default();
                }
            }

            debug!("[{}] {:?}: {} more records", query, part, more.len());
            records.append(&mut more);
            self.persister
                .checkpoint(query.language(), query.category(), &records)?;
        }

        Ok(records)
    }

    /// Run one physical file.
    ///
    /// A service error or an empty answer are both errors. Use [Error::is_retryable] to tell them apart from local ones.
    pub fn run_part(&self, part: &Path) -> Result<Vec<Record>, Error> {
        let text = std::fs::read_to_string(part)?;
        let bindings = self.service.run(&text).map_err(|e| {
            warn!("Service error with {:?}: {}", part, e);
            Error::Service(e)
        })?;

        if bindings.is_empty() {
            warn!("Nothing returned by the server for {:?}", part);
            return Err(Error::EmptyResult(part.to_path_buf()));
        }

        Ok(bindings.into_iter().map(to_record).collect())
    }

    fn run_part_with_retries(&self, part: &Path) -> Result<Vec<Record>, Error> {
        let mut attempt = 1;
        loop {
            match self.run_part(part) {
                Ok(records) => return Ok(records),
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    attempt += 1;
                    debug!("retrying {:?} (attempt {})", part, attempt);
                }
                Err(e) if e.is_retryable() => {
                    return Err(Error::RetryExhausted {
                        query: part.to_path_buf(),
                        attempts: attempt,
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }
}
