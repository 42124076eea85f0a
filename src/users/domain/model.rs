use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::users::domain::User;
use crate::utils::date::serializer;

// UserEntity abstracts a registered library member and the ids of the books
// currently lent to them.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct UserEntity {
    pub user_id: i64,
    pub name: String,
    pub borrowed_book_ids: Vec<i64>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl UserEntity {
    pub fn new(user_id: i64, name: &str) -> Self {
        Self {
            user_id,
            name: name.to_string(),
            borrowed_book_ids: vec![],
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn add_borrowed(&mut self, book_id: i64) {
        self.borrowed_book_ids.push(book_id);
        self.updated_at = Utc::now().naive_utc();
    }

    // removes a single matching id, looked up by value
    pub fn remove_borrowed(&mut self, book_id: i64) {
        if let Some(pos) = self.borrowed_book_ids.iter().position(|id| *id == book_id) {
            self.borrowed_book_ids.remove(pos);
            self.updated_at = Utc::now().naive_utc();
        }
    }
}

impl Identifiable for UserEntity {
    fn id(&self) -> i64 {
        self.user_id
    }
}

impl User for UserEntity {
    fn has_borrowed(&self, book_id: i64) -> bool {
        self.borrowed_book_ids.contains(&book_id)
    }

    fn borrowed_count(&self) -> usize {
        self.borrowed_book_ids.len()
    }
}
