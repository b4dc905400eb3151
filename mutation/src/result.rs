//! Mutation result types.

use trellis_core::Record;

/// Outcome of a mutation operation.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Inserted a record; carries the record as stored.
    Inserted(Record),
    /// Updated a record; carries the record after the merge.
    Updated(Record),
    /// Deleted records; carries the first match as it was before removal.
    Deleted {
        record: Record,
        /// Number of records removed (more than one only when duplicate
        /// identities were accepted).
        removed: usize,
    },
    /// No record held the requested identity.
    NotFound,
}

impl MutationOutcome {
    /// The affected record, if any.
    pub fn record(&self) -> Option<&Record> {
        match self {
            MutationOutcome::Inserted(r) | MutationOutcome::Updated(r) => Some(r),
            MutationOutcome::Deleted { record, .. } => Some(record),
            MutationOutcome::NotFound => None,
        }
    }

    /// Consume the outcome, returning the affected record.
    pub fn into_record(self) -> Option<Record> {
        match self {
            MutationOutcome::Inserted(r) | MutationOutcome::Updated(r) => Some(r),
            MutationOutcome::Deleted { record, .. } => Some(record),
            MutationOutcome::NotFound => None,
        }
    }

    /// Returns true unless nothing matched.
    pub fn is_found(&self) -> bool {
        !matches!(self, MutationOutcome::NotFound)
    }

    /// Number of records removed by a delete.
    pub fn removed(&self) -> usize {
        match self {
            MutationOutcome::Deleted { removed, .. } => *removed,
            _ => 0,
        }
    }
}
