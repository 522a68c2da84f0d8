//! # Quote Command
//!
//! Assembles an order from a stored book, a stored person and the entered
//! fields, the way the entry form does, then computes it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use royalty_core::{Book, OrderEntry, Person, PublishingOrder, RecordSource, Statement};

use super::compute::{compute_order, ComputeResponse};
use super::statement::StatementResponse;
use crate::error::AppError;
use crate::state::ConfigState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub book: Book,
    pub person: Person,
    pub order: PublishingOrder,
    #[serde(flatten)]
    pub computed: ComputeResponse,
    /// Prior records of the book plus this order, with `--with-history`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<StatementResponse>,
}

impl QuoteResponse {
    pub fn render_text(&self, config: &ConfigState) -> String {
        let mut out = format!(
            "{} ({}) · {} · {}\n",
            self.book.name,
            self.book.edition_year,
            self.person.name,
            config.format_currency(self.book.unit_price)
        );
        out.push_str(&self.computed.render_text(config));
        if let Some(history) = &self.history {
            out.push('\n');
            out.push_str(&history.render_text(config));
        }
        out
    }
}

pub fn quote<S>(
    source: &S,
    book_id: &str,
    person_id: &str,
    entry: &OrderEntry,
    with_history: bool,
    now: DateTime<Utc>,
) -> Result<QuoteResponse, AppError>
where
    S: RecordSource + ?Sized,
{
    debug!(book_id, person_id, order_type = ?entry.order_type, "quote");

    let book = source.book(book_id)?;
    let person = source.person(person_id)?;
    let order = PublishingOrder::assemble(&book, &person, entry);
    let computed = compute_order(&order)?;

    let history = if with_history {
        let statement = Statement::for_book(source, book_id, None, now)?
            .with_pending_order(&person, &order);
        Some(StatementResponse::new(statement))
    } else {
        None
    };

    info!(
        book = %book.name,
        person = %person.name,
        royalty = %computed.result.royalty_amount,
        "quote computed"
    );

    Ok(QuoteResponse {
        book,
        person,
        order,
        computed,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::TimeZone;
    use royalty_core::{
        ContributorRole, Discount, DiscountTier, MemorySource, Money, OrderType, PublishingRecord,
    };

    fn source() -> MemorySource {
        let mut s = MemorySource::new();
        s.insert_book(Book {
            id: "b1".to_string(),
            name: "Circular Looms".to_string(),
            edition_year: 2021,
            unit_price: Money::from_major(200),
        })
        .unwrap();
        s.insert_person(Person {
            id: "p1".to_string(),
            name: "R. Iyer".to_string(),
            role: ContributorRole::Author,
        })
        .unwrap();
        s.insert_record(PublishingRecord {
            id: "r1".to_string(),
            book_id: "b1".to_string(),
            person_id: "p1".to_string(),
            order: PublishingOrder {
                order_type: OrderType::Library,
                contributor_role: ContributorRole::Author,
                number_of_copies: 100,
                unit_price: Money::from_major(200),
                discount: Discount::default(),
                royalty_override: None,
                received_amount: Money::zero(),
            },
            recorded_at: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
        })
        .unwrap();
        s
    }

    fn entry(tier: DiscountTier) -> OrderEntry {
        OrderEntry {
            order_type: OrderType::Normal,
            number_of_copies: 100,
            discount: Discount::Fixed { tier },
            royalty_override: None,
            received_amount: Money::zero(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_quote_uses_book_price_and_person_role() {
        let response = quote(&source(), "b1", "p1", &entry(DiscountTier::Forty), false, now()).unwrap();
        assert_eq!(response.order.unit_price, Money::from_major(200));
        assert_eq!(response.order.contributor_role, ContributorRole::Author);
        assert_eq!(response.computed.result.royalty_amount, Money::from_major(1_200));
        assert!(response.history.is_none());
    }

    #[test]
    fn test_quote_with_history() {
        let response =
            quote(&source(), "b1", "p1", &entry(DiscountTier::ThirtyFive), true, now()).unwrap();
        let history = response.history.unwrap();
        assert_eq!(history.statement.lines.len(), 2);
        // 1600 (library record) + 1950 (this order)
        assert_eq!(history.statement.totals.royalty_amount, Money::from_major(3_550));
    }

    #[test]
    fn test_quote_unknown_person() {
        let err = quote(&source(), "b1", "nobody", &entry(DiscountTier::Forty), false, now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Person not found: nobody");
    }
}
