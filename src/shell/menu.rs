use std::fmt;
use std::fmt::{Display, Formatter};
use crate::core::library::{LibraryError, LibraryResult};

pub const MALFORMED_INPUT: &str = "MalformedInput";

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum MenuOption {
    AddBook,
    AddUser,
    IssueBook,
    ReturnBook,
    ViewBooks,
    ViewUsers,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 7] = [
        MenuOption::AddBook,
        MenuOption::AddUser,
        MenuOption::IssueBook,
        MenuOption::ReturnBook,
        MenuOption::ViewBooks,
        MenuOption::ViewUsers,
        MenuOption::Exit,
    ];

    pub fn code(&self) -> i64 {
        match self {
            MenuOption::AddBook => 1,
            MenuOption::AddUser => 2,
            MenuOption::IssueBook => 3,
            MenuOption::ReturnBook => 4,
            MenuOption::ViewBooks => 5,
            MenuOption::ViewUsers => 6,
            MenuOption::Exit => 0,
        }
    }

    pub fn parse(line: &str) -> LibraryResult<MenuOption> {
        let code = parse_number(line, "Invalid input. Please enter a number.")?;
        MenuOption::ALL.iter().find(|option| option.code() == code).copied()
            .ok_or_else(|| LibraryError::validation("Invalid choice. Please choose a valid option.", None))
    }
}

impl Display for MenuOption {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            MenuOption::AddBook => write!(f, "Add Book"),
            MenuOption::AddUser => write!(f, "Add User"),
            MenuOption::IssueBook => write!(f, "Issue Book"),
            MenuOption::ReturnBook => write!(f, "Return Book"),
            MenuOption::ViewBooks => write!(f, "View Books"),
            MenuOption::ViewUsers => write!(f, "View Users"),
            MenuOption::Exit => write!(f, "Exit"),
        }
    }
}

// Parses an integer typed at the console, reporting `message` when it is malformed.
pub fn parse_number(line: &str, message: &str) -> LibraryResult<i64> {
    line.trim().parse::<i64>()
        .map_err(|_| LibraryError::validation(message, Some(MALFORMED_INPUT.to_string())))
}
