//! # Royalty Statements
//!
//! Aggregates every stored publishing record of a book into one statement,
//! re-running the calculator on each stored order.
//!
//! ## Statement Flow
//! ```text
//! RecordSource::book(id) ─────────────┐
//! RecordSource::records_for_book(id) ─┼──► for each record:
//! RecordSource::person(record.person) ┘       breakdown(order) ──► StatementLine
//!                                                       │
//!                                                       ▼
//!                                      totals = Σ line results
//! ```
//!
//! Rendering (text, PDF) is left to the presentation layer.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculator::breakdown;
use crate::error::{CoreError, CoreResult};
use crate::source::RecordSource;
use crate::types::{
    Book, ContributorRole, OrderType, Person, PublishingOrder, PublishingRecord,
    RoyaltyBreakdown, RoyaltyResult,
};

/// One row of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatementLine {
    /// `None` for an order that has not been stored yet.
    pub record_id: Option<String>,
    #[ts(as = "Option<String>")]
    pub recorded_at: Option<DateTime<Utc>>,
    pub contributor_name: String,
    pub contributor_role: ContributorRole,
    pub order_type: OrderType,
    pub number_of_copies: i64,
    pub description: String,
    /// `None` when the stored order cannot be computed.
    pub breakdown: Option<RoyaltyBreakdown>,
    pub result: RoyaltyResult,
}

impl StatementLine {
    fn new(
        record_id: Option<String>,
        recorded_at: Option<DateTime<Utc>>,
        person: &Person,
        order: &PublishingOrder,
    ) -> Self {
        let computed = breakdown(order);
        let description = match &computed {
            Some(b) => b.describe(),
            None => format!("{} · not computable", order.order_type.label()),
        };
        let result = computed
            .as_ref()
            .map(|b| b.result)
            .unwrap_or(RoyaltyResult::ZERO);

        StatementLine {
            record_id,
            recorded_at,
            contributor_name: person.name.clone(),
            contributor_role: order.contributor_role,
            order_type: order.order_type,
            number_of_copies: order.number_of_copies,
            description,
            breakdown: computed,
            result,
        }
    }

    /// Whether the line could be computed.
    pub fn is_computed(&self) -> bool {
        self.breakdown.is_some()
    }
}

/// A multi-line royalty statement for one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub book: Book,
    /// Set when the statement is restricted to one contributor.
    pub contributor: Option<Person>,
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
    pub lines: Vec<StatementLine>,
    /// Sum of every line's result.
    pub totals: RoyaltyResult,
    /// Lines that fell back to the zero result.
    pub uncomputed_lines: usize,
}

impl Statement {
    /// Builds the statement for a book from its stored records.
    ///
    /// `contributor_id` restricts the statement to one person's records.
    /// `generated_at` is passed in so the build stays a pure function of
    /// its inputs.
    ///
    /// ## Errors
    /// - `BookNotFound` / `PersonNotFound` for the requested ids
    /// - `SourceUnavailable` when a stored record references a missing person
    pub fn for_book<S>(
        source: &S,
        book_id: &str,
        contributor_id: Option<&str>,
        generated_at: DateTime<Utc>,
    ) -> CoreResult<Statement>
    where
        S: RecordSource + ?Sized,
    {
        let book = source.book(book_id)?;
        let contributor = contributor_id.map(|id| source.person(id)).transpose()?;

        let records: Vec<PublishingRecord> = source
            .records_for_book(book_id)?
            .into_iter()
            .filter(|r| contributor_id.map_or(true, |id| r.person_id == id))
            .collect();

        let mut persons: HashMap<String, Person> = HashMap::new();
        if let Some(person) = &contributor {
            persons.insert(person.id.clone(), person.clone());
        }

        let mut lines = Vec::with_capacity(records.len());
        for record in records {
            if !persons.contains_key(&record.person_id) {
                let person = source.person(&record.person_id).map_err(|err| match err {
                    CoreError::PersonNotFound(id) => CoreError::SourceUnavailable {
                        reason: format!("record {} references unknown person {}", record.id, id),
                    },
                    other => other,
                })?;
                persons.insert(record.person_id.clone(), person);
            }
            let person = &persons[&record.person_id];
            lines.push(StatementLine::new(
                Some(record.id.clone()),
                Some(record.recorded_at),
                person,
                &record.order,
            ));
        }

        let mut statement = Statement {
            book,
            contributor,
            generated_at,
            lines,
            totals: RoyaltyResult::ZERO,
            uncomputed_lines: 0,
        };
        statement.recalculate_totals();
        Ok(statement)
    }

    /// Appends an order that is about to be stored.
    pub fn with_pending_order(mut self, person: &Person, order: &PublishingOrder) -> Self {
        self.lines.push(StatementLine::new(None, None, person, order));
        self.recalculate_totals();
        self
    }

    fn recalculate_totals(&mut self) {
        self.totals = RoyaltyResult {
            total_amount: self.lines.iter().map(|l| l.result.total_amount).sum(),
            royalty_amount: self.lines.iter().map(|l| l.result.royalty_amount).sum(),
            company_amount: self.lines.iter().map(|l| l.result.company_amount).sum(),
        };
        self.uncomputed_lines = self.lines.iter().filter(|l| !l.is_computed()).count();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
