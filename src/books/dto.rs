use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;
use crate::core::library::BookStatus;
use crate::utils::date::serializer;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub book_status: BookStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookDto {
    pub fn new(book_id: i64, title: &str, author: &str) -> BookDto {
        BookDto::from(&BookEntity::new(book_id, title, author))
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> i64 {
        self.book_id
    }
}

impl Book for BookDto {
    fn is_issued(&self) -> bool {
        self.book_status == BookStatus::Issued
    }

    fn status(&self) -> BookStatus {
        self.book_status
    }
}

impl Display for BookDto {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Book ID: {}, Title: {}, Author: {}, Status: {}",
               self.book_id, self.title, self.author, self.book_status)
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            book_status: other.status(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.book_id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            issued: other.is_issued(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
