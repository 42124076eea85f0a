use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::BookStatus;
use crate::utils::date::serializer;

// BookEntity abstracts a single physical copy in the library, so an issued
// book is unavailable to everybody else until it is returned.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub issued: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(book_id: i64, title: &str, author: &str) -> Self {
        Self {
            book_id,
            title: title.to_string(),
            author: author.to_string(),
            issued: false,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // preconditions are checked by the catalog
    pub fn issue(&mut self) {
        self.issued = true;
        self.updated_at = Utc::now().naive_utc();
    }

    pub fn returned(&mut self) {
        self.issued = false;
        self.updated_at = Utc::now().naive_utc();
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }
}

impl Book for BookEntity {
    fn is_issued(&self) -> bool {
        self.issued
    }

    fn status(&self) -> BookStatus {
        BookStatus::from(self.issued)
    }
}
