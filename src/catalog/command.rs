pub mod add_book_cmd;
pub mod add_user_cmd;
pub mod issue_book_cmd;
pub mod return_book_cmd;
pub mod list_books_cmd;
pub mod list_users_cmd;
