pub mod service;

use crate::books::dto::BookDto;
use crate::catalog::dto::LendingDto;
use crate::core::library::LibraryResult;
use crate::users::dto::UserDto;

pub trait CatalogService {
    fn add_book(&mut self, book: &BookDto) -> LibraryResult<BookDto>;
    fn add_user(&mut self, user: &UserDto) -> LibraryResult<UserDto>;
    fn issue_book(&mut self, book_id: i64, user_id: i64) -> LibraryResult<LendingDto>;
    fn return_book(&mut self, book_id: i64, user_id: i64) -> LibraryResult<LendingDto>;
    fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto>;
    fn find_user_by_id(&self, id: i64) -> LibraryResult<UserDto>;
    fn list_books(&self) -> Box<dyn Iterator<Item = BookDto> + '_>;
    fn list_users(&self) -> Box<dyn Iterator<Item = UserDto> + '_>;
}
