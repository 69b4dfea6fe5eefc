//! # Lexidata
//!
//! Queries lexicographical data (nouns, verbs, prepositions) from Wikidata
//! for a set of languages, and exports it as JSON files.
//!
//! The [pipelines::QueryData] pipeline can be used as a library,
//! with any [sparql::QueryService] implementation.
pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod lang;
pub mod pipelines;
pub mod query;
pub mod sparql;
