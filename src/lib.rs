pub mod books;
pub mod catalog;
pub mod core;
pub mod gateway;
pub mod shell;
pub mod users;
pub mod utils;
