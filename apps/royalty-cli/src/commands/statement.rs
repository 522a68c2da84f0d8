//! # Statement Command

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use royalty_core::{RecordSource, Statement};

use crate::error::AppError;
use crate::state::ConfigState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementResponse {
    pub statement_number: String,
    pub statement: Statement,
}

impl StatementResponse {
    pub fn new(statement: Statement) -> Self {
        StatementResponse {
            statement_number: generate_statement_number(statement.generated_at),
            statement,
        }
    }

    /// Printable statement.
    ///
    /// ```text
    /// Royalty Desk · Royalty Statement ST-20240601-1A2B3C4D
    /// Book: Circular Looms (2021)
    /// Generated: 2024-06-01
    ///
    /// Date        Contributor     Copies  Basis                          Total  Royalty  Company
    /// ...
    /// ```
    pub fn render_text(&self, config: &ConfigState) -> String {
        let s = &self.statement;
        let mut out = format!(
            "{} · Royalty Statement {}\n",
            config.publisher_name, self.statement_number
        );
        out.push_str(&format!("Book: {} ({})\n", s.book.name, s.book.edition_year));
        if let Some(person) = &s.contributor {
            out.push_str(&format!("Contributor: {} ({})\n", person.name, person.role));
        }
        out.push_str(&format!("Generated: {}\n\n", s.generated_at.format("%Y-%m-%d")));

        if s.lines.is_empty() {
            out.push_str("No publishing records.\n");
            return out;
        }

        out.push_str(&format!(
            "{:<10}  {:<20}  {:>6}  {:<42}  {:>14}  {:>14}  {:>14}\n",
            "Date", "Contributor", "Copies", "Basis", "Total", "Royalty", "Company"
        ));
        for line in &s.lines {
            let date = match line.recorded_at {
                Some(at) => at.format("%Y-%m-%d").to_string(),
                None => "pending".to_string(),
            };
            out.push_str(&format!(
                "{:<10}  {:<20}  {:>6}  {:<42}  {:>14}  {:>14}  {:>14}\n",
                date,
                truncate(&line.contributor_name, 20),
                line.number_of_copies,
                truncate(&line.description, 42),
                config.format_currency(line.result.total_amount),
                config.format_currency(line.result.royalty_amount),
                config.format_currency(line.result.company_amount),
            ));
        }
        out.push_str(&format!(
            "{:<10}  {:<20}  {:>6}  {:<42}  {:>14}  {:>14}  {:>14}\n",
            "TOTAL",
            "",
            "",
            "",
            config.format_currency(s.totals.total_amount),
            config.format_currency(s.totals.royalty_amount),
            config.format_currency(s.totals.company_amount),
        ));
        if s.uncomputed_lines > 0 {
            out.push_str(&format!(
                "\n{} record(s) could not be computed and are shown as zero.\n",
                s.uncomputed_lines
            ));
        }
        out
    }
}

pub fn statement<S>(
    source: &S,
    book_id: &str,
    person_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<StatementResponse, AppError>
where
    S: RecordSource + ?Sized,
{
    debug!(book_id, ?person_id, "statement");

    let statement = Statement::for_book(source, book_id, person_id, now)?;
    if statement.uncomputed_lines > 0 {
        warn!(
            book_id,
            uncomputed = statement.uncomputed_lines,
            "statement has records that cannot be computed"
        );
    }
    info!(
        book_id,
        lines = statement.lines.len(),
        royalty = %statement.totals.royalty_amount,
        "statement built"
    );

    Ok(StatementResponse::new(statement))
}

/// Statement number: `ST-YYYYMMDD-XXXXXXXX`.
fn generate_statement_number(at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("ST-{}-{}", at.format("%Y%m%d"), suffix)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
