//! # Record Source
//!
//! The data-fetch boundary: books, persons and stored publishing records
//! come in through [`RecordSource`]. The calculator never calls it; callers
//! fetch first, then compute.
//!
//! ```text
//! ┌──────────────────┐   book / person / records   ┌──────────────────┐
//! │  RecordSource    │ ──────────────────────────► │  caller          │
//! │  (impl owns I/O) │                             │  assemble+compute│
//! └──────────────────┘                             └──────────────────┘
//! ```
//!
//! [`MemorySource`] is the in-process implementation. The CLI fills one from
//! a JSON file; tests fill one by hand.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Book, Person, PublishingRecord};

/// Read access to the records collaborators.
pub trait RecordSource {
    /// Fetches a book by id.
    fn book(&self, id: &str) -> CoreResult<Book>;

    /// Fetches a person by id.
    fn person(&self, id: &str) -> CoreResult<Person>;

    /// Every stored publishing record of a book, oldest first.
    fn records_for_book(&self, book_id: &str) -> CoreResult<Vec<PublishingRecord>>;
}

/// A [`RecordSource`] backed by hash maps.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    books: HashMap<String, Book>,
    persons: HashMap<String, Person>,
    records: Vec<PublishingRecord>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a book. Fails on a duplicate id.
    pub fn insert_book(&mut self, book: Book) -> Result<(), ValidationError> {
        if self.books.contains_key(&book.id) {
            return Err(duplicate("book id", &book.id));
        }
        self.books.insert(book.id.clone(), book);
        Ok(())
    }

    /// Adds a person. Fails on a duplicate id.
    pub fn insert_person(&mut self, person: Person) -> Result<(), ValidationError> {
        if self.persons.contains_key(&person.id) {
            return Err(duplicate("person id", &person.id));
        }
        self.persons.insert(person.id.clone(), person);
        Ok(())
    }

    /// Adds a publishing record. Fails on a duplicate id.
    pub fn insert_record(&mut self, record: PublishingRecord) -> Result<(), ValidationError> {
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(duplicate("record id", &record.id));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl RecordSource for MemorySource {
    fn book(&self, id: &str) -> CoreResult<Book> {
        self.books
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::BookNotFound(id.to_string()))
    }

    fn person(&self, id: &str) -> CoreResult<Person> {
        self.persons
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::PersonNotFound(id.to_string()))
    }

    fn records_for_book(&self, book_id: &str) -> CoreResult<Vec<PublishingRecord>> {
        if !self.books.contains_key(book_id) {
            return Err(CoreError::BookNotFound(book_id.to_string()));
        }
        let mut records: Vec<PublishingRecord> = self
            .records
            .iter()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}

fn duplicate(field: &str, value: &str) -> ValidationError {
    ValidationError::Duplicate {
        field: field.to_string(),
        value: value.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
