//! # Records State
//!
//! Loads the records file into a [`MemorySource`].
//!
//! ## File Shape
//! ```json
//! {
//!   "books":   [{ "id": "...", "name": "...", "editionYear": 2021, "unitPrice": 20000 }],
//!   "persons": [{ "id": "...", "name": "...", "role": "AUTHOR" }],
//!   "records": [{ "id": "...", "bookId": "...", "personId": "...",
//!                 "order": { ... }, "recordedAt": "2024-05-01T09:00:00Z" }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use royalty_core::validation::{
    validate_book, validate_person, validate_record, validate_record_role,
};
use royalty_core::{Book, MemorySource, Person, PublishingRecord, RecordSource, ValidationError};

use crate::error::AppError;

/// On-disk layout of the records file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsFile {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub records: Vec<PublishingRecord>,
}

impl RecordsFile {
    /// Reads and parses a records file.
    pub fn read(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|e| AppError::parse(path, e))
    }

    /// Validates every entry and builds the in-memory source.
    ///
    /// Errors name the offending entry so the file can be fixed by hand.
    pub fn into_source(self) -> Result<MemorySource, AppError> {
        let mut source = MemorySource::new();

        for book in self.books {
            let id = book.id.clone();
            validate_book(&book)
                .and_then(|_| source.insert_book(book))
                .map_err(|e| entry_error("book", &id, e))?;
        }

        for person in self.persons {
            let id = person.id.clone();
            validate_person(&person)
                .and_then(|_| source.insert_person(person))
                .map_err(|e| entry_error("person", &id, e))?;
        }

        for record in self.records {
            let id = record.id.clone();
            validate_record(&record)
                .and_then(|_| match source.person(&record.person_id) {
                    Ok(person) => validate_record_role(&record, &person),
                    // Dangling references surface when a statement is built
                    Err(_) => Ok(()),
                })
                .and_then(|_| source.insert_record(record))
                .map_err(|e| entry_error("record", &id, e))?;
        }

        Ok(source)
    }
}

/// Loads the records file at `path`.
pub fn load_records(path: &Path) -> Result<MemorySource, AppError> {
    debug!(path = %path.display(), "loading records");
    let source = RecordsFile::read(path)?.into_source()?;
    info!(
        books = source.book_count(),
        persons = source.person_count(),
        records = source.record_count(),
        "records loaded"
    );
    Ok(source)
}

fn entry_error(kind: &str, id: &str, err: ValidationError) -> AppError {
    let mut app = AppError::from(err);
    app.message = format!("{} '{}': {}", kind, id, app.message);
    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const BOOK: &str = "6f1c1a52-2d7e-4d4f-9d0e-0b1f6c7d8e01";
    const PERSON: &str = "6f1c1a52-2d7e-4d4f-9d0e-0b1f6c7d8e02";
    const RECORD: &str = "6f1c1a52-2d7e-4d4f-9d0e-0b1f6c7d8e03";

    fn sample_json() -> String {
        format!(
            r#"{{
                "books": [{{ "id": "{BOOK}", "name": "Circular Looms", "editionYear": 2021, "unitPrice": 20000 }}],
                "persons": [{{ "id": "{PERSON}", "name": "R. Iyer", "role": "AUTHOR" }}],
                "records": [{{
                    "id": "{RECORD}", "bookId": "{BOOK}", "personId": "{PERSON}",
                    "recordedAt": "2024-05-01T09:00:00Z",
                    "order": {{ "orderType": "LIBRARY", "contributorRole": "AUTHOR",
                               "numberOfCopies": 100, "unitPrice": 20000 }}
                }}]
            }}"#
        )
    }

    #[test]
    fn test_into_source() {
        let file: RecordsFile = serde_json::from_str(&sample_json()).unwrap();
        let source = file.into_source().unwrap();
        assert_eq!(source.book(BOOK).unwrap().name, "Circular Looms");
        assert_eq!(source.records_for_book(BOOK).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_entry_is_named() {
        let mut file: RecordsFile = serde_json::from_str(&sample_json()).unwrap();
        file.persons[0].name = "  ".to_string();
        let err = file.into_source().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, format!("person '{}': name is required", PERSON));
    }

    #[test]
    fn test_record_role_must_match_person() {
        let mut file: RecordsFile = serde_json::from_str(&sample_json()).unwrap();
        file.records[0].order.contributor_role = royalty_core::ContributorRole::Agency;
        let err = file.into_source().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.starts_with(&format!("record '{}': ", RECORD)));
        assert!(err.message.contains("Agency does not match"));
    }

    #[test]
    fn test_duplicate_book_rejected() {
        let mut file: RecordsFile = serde_json::from_str(&sample_json()).unwrap();
        let book = file.books[0].clone();
        file.books.push(book);
        assert!(file.into_source().is_err());
    }

    #[test]
    fn test_load_records_from_disk() {
        let path = std::env::temp_dir().join(format!("royalty-records-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, sample_json()).unwrap();
        let source = load_records(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(source.record_count(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("royalty-missing-{}.json", uuid::Uuid::new_v4()));
        let err = load_records(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::IoError);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let path = std::env::temp_dir().join(format!("royalty-bad-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_records(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(err.code, ErrorCode::ParseError);
    }
}
