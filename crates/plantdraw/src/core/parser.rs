//! Core parser trait for diagram notation
//!
//! This trait defines the interface for turning notation text into the
//! intermediate model stored in a database.

use anyhow::Result;

use super::Database;

/// Core trait for diagram parsers
///
/// Parsers are lenient: lines they cannot make sense of are skipped and
/// parsing continues. An error is only returned when the database refuses
/// a construct.
///
/// # Example
/// ```
/// use plantdraw::core::{Database, Parser};
/// use plantdraw::plugins::sequence::{SequenceDatabase, SequenceParser};
///
/// let parser = SequenceParser::new();
/// let mut db = SequenceDatabase::new();
/// parser.parse("@startuml\nAlice -> Bob: hi\n@enduml", &mut db).unwrap();
/// assert_eq!(db.edge_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse notation text into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;
}
