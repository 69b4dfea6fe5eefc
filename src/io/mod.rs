/*!
# IO utilities

Saving of query results, and handling of previously exported files.
!*/
pub mod persist;
pub mod reconcile;

pub use persist::Persister;
pub use reconcile::{reconcile, Action, Decide, Fixed, Prompt, Reconciled};
