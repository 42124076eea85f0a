use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::users::dto::UserDto;
use crate::utils::date::serializer;

// LendingDto is the outcome of an issue or return, carrying both sides of the
// transaction as they look after it was applied.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LendingDto {
    pub book: BookDto,
    pub user: UserDto,
    // set on a return whose book was not flagged as issued
    pub inconsistent: bool,
    #[serde(with = "serializer")]
    pub recorded_at: NaiveDateTime,
}

impl LendingDto {
    pub fn new(book: BookDto, user: UserDto, inconsistent: bool) -> Self {
        Self {
            book,
            user,
            inconsistent,
            recorded_at: Utc::now().naive_utc(),
        }
    }
}
