use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::users::domain::User;
use crate::users::domain::model::UserEntity;
use crate::utils::date::serializer;


// UserDto is a data transfer object for a library member.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub user_id: i64,
    pub name: String,
    pub borrowed_book_ids: Vec<i64>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl UserDto {
    pub fn new(user_id: i64, name: &str) -> Self {
        UserDto::from(&UserEntity::new(user_id, name))
    }
}

impl Identifiable for UserDto {
    fn id(&self) -> i64 {
        self.user_id
    }
}

impl User for UserDto {
    fn has_borrowed(&self, book_id: i64) -> bool {
        self.borrowed_book_ids.contains(&book_id)
    }

    fn borrowed_count(&self) -> usize {
        self.borrowed_book_ids.len()
    }
}

impl Display for UserDto {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.borrowed_book_ids.iter().map(|id| id.to_string()).collect();
        write!(f, "User ID: {}, Name: {}, Borrowed Books: [{}]",
               self.user_id, self.name, ids.join(", "))
    }
}

impl From<&UserEntity> for UserDto {
    fn from(other: &UserEntity) -> Self {
        Self {
            user_id: other.user_id,
            name: other.name.to_string(),
            borrowed_book_ids: other.borrowed_book_ids.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&UserDto> for UserEntity {
    fn from(other: &UserDto) -> Self {
        Self {
            user_id: other.user_id,
            name: other.name.to_string(),
            borrowed_book_ids: other.borrowed_book_ids.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
