pub mod menu;

use std::io::{BufRead, Write};
use tracing::debug;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::add_user_cmd::{AddUserCommand, AddUserCommandRequest};
use crate::catalog::command::issue_book_cmd::{IssueBookCommand, IssueBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::list_users_cmd::{ListUsersCommand, ListUsersCommandRequest};
use crate::catalog::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::{LibraryError, LibraryResult};
use crate::shell::menu::{parse_number, MenuOption};

#[derive(Debug, PartialEq, Clone, Copy)]
enum Flow {
    Continue,
    Exit,
}

/// Console front end of the catalog.
///
/// The shell reads menu selections and arguments from `input`, runs the matching
/// catalog command and writes the outcome to `output`. Business failures and
/// malformed numbers are printed and the menu is shown again; the loop ends on
/// the exit option or at end of input. Only console I/O failures are returned.
pub struct Shell<R, W> {
    catalog_service: Box<dyn CatalogService>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(catalog_service: Box<dyn CatalogService>, input: R, output: W) -> Self {
        Self {
            catalog_service,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> LibraryResult<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                return self.exit();
            };
            let option = match MenuOption::parse(line.as_str()) {
                Ok(option) => option,
                Err(err) => {
                    self.report(CommandError::from(err))?;
                    continue;
                }
            };
            debug!(option = %option, "menu option selected");
            if self.dispatch(option)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    pub fn into_parts(self) -> (Box<dyn CatalogService>, R, W) {
        (self.catalog_service, self.input, self.output)
    }

    fn dispatch(&mut self, option: MenuOption) -> LibraryResult<Flow> {
        match option {
            MenuOption::AddBook => self.add_book(),
            MenuOption::AddUser => self.add_user(),
            MenuOption::IssueBook => self.issue_book(),
            MenuOption::ReturnBook => self.return_book(),
            MenuOption::ViewBooks => self.view_books(),
            MenuOption::ViewUsers => self.view_users(),
            MenuOption::Exit => self.finish(),
        }
    }

    fn add_book(&mut self) -> LibraryResult<Flow> {
        let Some(book_id) = self.prompt_number("Enter Book ID: ",
                                               "Invalid input for Book ID. Please enter an integer.")? else {
            return self.finish();
        };
        let book_id = match book_id {
            Ok(id) => id,
            Err(err) => return self.fail(err),
        };
        let Some(title) = self.prompt("Enter Title: ")? else {
            return self.finish();
        };
        let Some(author) = self.prompt("Enter Author: ")? else {
            return self.finish();
        };

        let req = AddBookCommandRequest::new(book_id, title.as_str(), author.as_str());
        let res = AddBookCommand::new(self.catalog_service.as_mut()).execute(req);
        match res {
            Ok(res) => self.say(format!("Book '{}' added successfully.", res.book.title).as_str()),
            Err(err) => self.report(err),
        }
    }

    fn add_user(&mut self) -> LibraryResult<Flow> {
        let Some(user_id) = self.prompt_number("Enter User ID: ",
                                               "Invalid input for User ID. Please enter an integer.")? else {
            return self.finish();
        };
        let user_id = match user_id {
            Ok(id) => id,
            Err(err) => return self.fail(err),
        };
        let Some(name) = self.prompt("Enter Name: ")? else {
            return self.finish();
        };

        let req = AddUserCommandRequest::new(user_id, name.as_str());
        let res = AddUserCommand::new(self.catalog_service.as_mut()).execute(req);
        match res {
            Ok(res) => self.say(format!("User '{}' registered successfully.", res.user.name).as_str()),
            Err(err) => self.report(err),
        }
    }

    fn issue_book(&mut self) -> LibraryResult<Flow> {
        let Some(ids) = self.prompt_ids("Enter Book ID to issue: ", "Enter User ID to issue to: ")? else {
            return self.finish();
        };
        let (book_id, user_id) = match ids {
            Ok(ids) => ids,
            Err(err) => return self.fail(err),
        };

        let req = IssueBookCommandRequest::new(book_id, user_id);
        let res = IssueBookCommand::new(self.catalog_service.as_mut()).execute(req);
        match res {
            Ok(_) => self.say("Book issued successfully."),
            Err(err) => self.report(err),
        }
    }

    fn return_book(&mut self) -> LibraryResult<Flow> {
        let Some(ids) = self.prompt_ids("Enter Book ID to return: ", "Enter User ID returning: ")? else {
            return self.finish();
        };
        let (book_id, user_id) = match ids {
            Ok(ids) => ids,
            Err(err) => return self.fail(err),
        };

        let req = ReturnBookCommandRequest::new(book_id, user_id);
        let res = ReturnBookCommand::new(self.catalog_service.as_mut()).execute(req);
        match res {
            Ok(res) => {
                if res.lending.inconsistent {
                    writeln!(self.output, "Warning: Book was not marked as issued, but is being returned.")?;
                }
                self.say("Book returned successfully.")
            }
            Err(err) => self.report(err),
        }
    }

    fn view_books(&mut self) -> LibraryResult<Flow> {
        let res = ListBooksCommand::new(self.catalog_service.as_ref())
            .execute(ListBooksCommandRequest::default());
        match res {
            Ok(res) if res.books.is_empty() => self.say("No books available."),
            Ok(res) => {
                for book in res.books {
                    writeln!(self.output, "{}", book)?;
                }
                Ok(Flow::Continue)
            }
            Err(err) => self.report(err),
        }
    }

    fn view_users(&mut self) -> LibraryResult<Flow> {
        let res = ListUsersCommand::new(self.catalog_service.as_ref())
            .execute(ListUsersCommandRequest::default());
        match res {
            Ok(res) if res.users.is_empty() => self.say("No users registered."),
            Ok(res) => {
                for user in res.users {
                    writeln!(self.output, "{}", user)?;
                }
                Ok(Flow::Continue)
            }
            Err(err) => self.report(err),
        }
    }

    fn finish(&mut self) -> LibraryResult<Flow> {
        self.exit()?;
        Ok(Flow::Exit)
    }

    fn exit(&mut self) -> LibraryResult<()> {
        writeln!(self.output, "Exiting...")?;
        self.output.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> LibraryResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Library Menu ---")?;
        for option in MenuOption::ALL {
            writeln!(self.output, "{}. {}", option.code(), option)?;
        }
        write!(self.output, "Choose option: ")?;
        self.output.flush()?;
        Ok(())
    }

    // None once the input is exhausted. Bytes that are not utf-8 are replaced so the
    // line is reported as malformed rather than ending the session.
    fn read_line(&mut self) -> LibraryResult<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt(&mut self, text: &str) -> LibraryResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    fn prompt_number(&mut self, text: &str, invalid: &str) -> LibraryResult<Option<LibraryResult<i64>>> {
        Ok(self.prompt(text)?.map(|line| parse_number(line.as_str(), invalid)))
    }

    // The user id is only asked for once the book id parsed.
    fn prompt_ids(&mut self, book_text: &str, user_text: &str) -> LibraryResult<Option<LibraryResult<(i64, i64)>>> {
        let invalid = "Invalid input. Please enter integers for IDs.";
        let Some(book_id) = self.prompt_number(book_text, invalid)? else {
            return Ok(None);
        };
        let book_id = match book_id {
            Ok(id) => id,
            Err(err) => return Ok(Some(Err(err))),
        };
        let Some(user_id) = self.prompt_number(user_text, invalid)? else {
            return Ok(None);
        };
        Ok(Some(user_id.map(|user_id| (book_id, user_id))))
    }

    fn say(&mut self, message: &str) -> LibraryResult<Flow> {
        writeln!(self.output, "{}", message)?;
        Ok(Flow::Continue)
    }

    fn fail(&mut self, err: LibraryError) -> LibraryResult<Flow> {
        self.report(CommandError::from(err))
    }

    fn report(&mut self, err: CommandError) -> LibraryResult<Flow> {
        match &err {
            CommandError::Runtime { .. } | CommandError::Serialization { .. } => {
                Err(LibraryError::runtime(err.message(), None))
            }
            _ => {
                debug!(error = ?err, "request rejected");
                self.say(err.message())
            }
        }
    }
}
