/*! Query orchestration

- [resolver] finds which logical queries to run,
- [executor] runs them and merges their parts,
- [retry] holds the worklist of queries to (re-)run.
!*/
pub mod executor;
pub mod logical;
pub mod resolver;
pub mod retry;

pub use executor::{Executor, Record};
pub use logical::LogicalQuery;
pub use resolver::resolve;
pub use retry::{Pending, RetryQueue};
