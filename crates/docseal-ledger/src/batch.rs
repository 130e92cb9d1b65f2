use docseal_types::{Commitment, Digest};
use tracing::debug;

use crate::ledger::Ledger;

/// One candidate item handed to the ingestor by a batch producer.
///
/// A producer that failed to read a document (permissions, I/O) hands over a
/// `Failed` marker instead of aborting the batch; the failure travels through
/// the outcome report rather than the error channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchItem {
    /// The document was read and digested upstream.
    Ready { identifier: String, digest: Digest },
    /// The document could not be read upstream; carried for reporting only.
    Failed { identifier: String, error: String },
}

impl BatchItem {
    /// The caller-supplied identifier (typically a file path).
    pub fn identifier(&self) -> &str {
        match self {
            Self::Ready { identifier, .. } | Self::Failed { identifier, .. } => identifier,
        }
    }
}

/// Per-item result of a batch run, in input order.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchOutcome {
    /// The digest was appended to the ledger.
    Accepted {
        identifier: String,
        index: u64,
        commitment: Commitment,
        created_at: f64,
    },
    /// The item was not appended; `reason` explains why.
    Rejected { identifier: String, reason: String },
}

impl BatchOutcome {
    /// Returns `true` if the item was appended.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// The caller-supplied identifier.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Accepted { identifier, .. } | Self::Rejected { identifier, .. } => identifier,
        }
    }
}

/// Folds a sequence of candidate items into the ledger.
///
/// Per-item failures never abort the batch: every input item produces exactly
/// one outcome, in input order. Accepted items receive strictly increasing,
/// contiguous ledger indices (rejected items consume none). The ingestor
/// never persists; the caller saves the ledger once after the whole batch,
/// so a batch of N items costs one durable write, not N. A batch abandoned
/// before that save leaves durable state untouched.
pub struct BatchIngestor;

impl BatchIngestor {
    /// Run the batch, returning one outcome per input item.
    pub fn run(
        ledger: &mut Ledger,
        items: impl IntoIterator<Item = BatchItem>,
    ) -> Vec<BatchOutcome> {
        let mut outcomes = Vec::new();

        for item in items {
            let outcome = match item {
                BatchItem::Ready { identifier, digest } => match ledger.append(&digest) {
                    Ok(entry) => BatchOutcome::Accepted {
                        identifier,
                        index: entry.index(),
                        commitment: *entry.commitment(),
                        created_at: entry.created_at(),
                    },
                    Err(e) => BatchOutcome::Rejected {
                        identifier,
                        reason: e.to_string(),
                    },
                },
                BatchItem::Failed { identifier, error } => BatchOutcome::Rejected {
                    identifier,
                    reason: error,
                },
            };
            outcomes.push(outcome);
        }

        let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
        debug!(
            total = outcomes.len(),
            accepted,
            rejected = outcomes.len() - accepted,
            "batch ingestion complete"
        );
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(id: &str, digest: &str) -> BatchItem {
        BatchItem::Ready {
            identifier: id.into(),
            digest: Digest::new(digest),
        }
    }

    fn failed(id: &str, error: &str) -> BatchItem {
        BatchItem::Failed {
            identifier: id.into(),
            error: error.into(),
        }
    }

    #[test]
    fn all_ready_items_are_accepted_in_order() {
        let mut ledger = Ledger::genesis().unwrap();
        let outcomes = BatchIngestor::run(
            &mut ledger,
            vec![ready("a.txt", "d1"), ready("b.txt", "d2"), ready("c.txt", "d3")],
        );

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(BatchOutcome::is_accepted));
        let ids: Vec<_> = outcomes.iter().map(BatchOutcome::identifier).collect();
        assert_eq!(ids, ["a.txt", "b.txt", "c.txt"]);
        assert_eq!(ledger.latest().index(), 3);
        ledger.verify().unwrap();
    }

    #[test]
    fn failed_item_is_rejected_without_consuming_an_index() {
        let mut ledger = Ledger::genesis().unwrap();
        let outcomes = BatchIngestor::run(
            &mut ledger,
            vec![
                ready("a.txt", "d1"),
                failed("b.txt", "permission denied"),
                ready("c.txt", "d3"),
            ],
        );

        // Outcomes in input order: accepted, rejected, accepted.
        assert!(outcomes[0].is_accepted());
        assert!(!outcomes[1].is_accepted());
        assert!(outcomes[2].is_accepted());

        // Exactly two new entries, contiguous in ledger-index space.
        assert_eq!(ledger.len(), 3);
        match (&outcomes[0], &outcomes[2]) {
            (
                BatchOutcome::Accepted { index: first, .. },
                BatchOutcome::Accepted { index: third, .. },
            ) => {
                assert_eq!(*first, 1);
                assert_eq!(*third, 2);
            }
            _ => unreachable!(),
        }

        match &outcomes[1] {
            BatchOutcome::Rejected { identifier, reason } => {
                assert_eq!(identifier, "b.txt");
                assert_eq!(reason, "permission denied");
            }
            _ => unreachable!(),
        }
        ledger.verify().unwrap();
    }

    #[test]
    fn empty_batch_produces_no_outcomes_and_no_entries() {
        let mut ledger = Ledger::genesis().unwrap();
        let outcomes = BatchIngestor::run(&mut ledger, vec![]);
        assert!(outcomes.is_empty());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn accepted_outcome_reports_the_appended_entry() {
        let mut ledger = Ledger::genesis().unwrap();
        let outcomes = BatchIngestor::run(&mut ledger, vec![ready("doc.pdf", "digest-1")]);

        match &outcomes[0] {
            BatchOutcome::Accepted {
                identifier,
                index,
                commitment,
                created_at,
            } => {
                assert_eq!(identifier, "doc.pdf");
                let tail = ledger.latest();
                assert_eq!(*index, tail.index());
                assert_eq!(commitment, tail.commitment());
                assert_eq!(*created_at, tail.created_at());
            }
            _ => unreachable!(),
        }
    }
}
