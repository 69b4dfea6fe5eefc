//! FIFO worklist of logical queries, with a per-query attempt counter.
use std::collections::VecDeque;

use super::LogicalQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub query: LogicalQuery,
    /// 1 for the first run.
    pub attempt: usize,
}

#[derive(Debug)]
pub struct RetryQueue {
    queue: VecDeque<Pending>,
    max_attempts: usize,
}

impl RetryQueue {
    pub fn new(queries: impl IntoIterator<Item = LogicalQuery>, max_attempts: usize) -> Self {
        let queue = queries
            .into_iter()
            .map(|query| Pending { query, attempt: 1 })
            .collect();
        Self {
            queue,
            max_attempts,
        }
    }

    pub fn pop(&mut self) -> Option<Pending> {
        self.queue.pop_front()
    }

    /// Put a failed query back at the end of the queue.
    ///
    /// Returns `false` (and drops the query) once it has used its `max_attempts`.
    pub fn requeue(&mut self, pending: Pending) -> bool {
        if pending.attempt >= self.max_attempts {
            return false;
        }
        self.queue.push_back(Pending {
            query: pending.query,
            attempt: pending.attempt + 1,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
