use std::collections::HashMap;
use tracing::{debug, info, warn};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::LendingDto;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::gateway::events::EventPublisher;
use crate::users::domain::User;
use crate::users::domain::model::UserEntity;
use crate::users::dto::UserDto;

pub struct CatalogServiceImpl {
    branch_id: String,
    reject_inconsistent_returns: bool,
    book_repository: Box<dyn Repository<BookEntity>>,
    user_repository: Box<dyn Repository<UserEntity>>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub fn new(config: &Configuration, book_repository: Box<dyn Repository<BookEntity>>,
               user_repository: Box<dyn Repository<UserEntity>>,
               events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            reject_inconsistent_returns: config.reject_inconsistent_returns,
            book_repository,
            user_repository,
            events_publisher,
        }
    }

    fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([("branch_id".to_string(), self.branch_id.to_string())])
    }

    // The catalog state is already committed when an event is published, so a
    // publishing failure is logged and does not fail the operation.
    fn publish(&mut self, event: serde_json::Result<DomainEvent>) {
        let res = event.map_err(LibraryError::from)
            .and_then(|event| self.events_publisher.publish(&event));
        if let Err(err) = res {
            warn!(error = %err, "failed to publish domain event");
        }
    }
}

impl CatalogService for CatalogServiceImpl {
    fn add_book(&mut self, book: &BookDto) -> LibraryResult<BookDto> {
        if book.is_issued() {
            return Err(LibraryError::validation(
                format!("Error: Book with ID {} cannot be added as issued.", book.book_id).as_str(), None));
        }
        self.book_repository.create(BookEntity::from(book))?;
        info!(book_id = book.book_id, title = %book.title, "book added");
        let event = DomainEvent::added(
            "books", "books", book.book_id.to_string().as_str(), &self.metadata(), book);
        self.publish(event);
        Ok(book.clone())
    }

    fn add_user(&mut self, user: &UserDto) -> LibraryResult<UserDto> {
        if user.borrowed_count() > 0 {
            return Err(LibraryError::validation(
                format!("Error: User with ID {} cannot be added with borrowed books.", user.user_id).as_str(), None));
        }
        self.user_repository.create(UserEntity::from(user))?;
        info!(user_id = user.user_id, name = %user.name, "user added");
        let event = DomainEvent::added(
            "users", "users", user.user_id.to_string().as_str(), &self.metadata(), user);
        self.publish(event);
        Ok(user.clone())
    }

    fn issue_book(&mut self, book_id: i64, user_id: i64) -> LibraryResult<LendingDto> {
        let mut book = self.book_repository.get(book_id)?.clone();
        let mut user = self.user_repository.get(user_id)?.clone();
        if book.is_issued() {
            debug!(book_id, user_id, "book already issued");
            return Err(LibraryError::already_issued("Book is already issued."));
        }

        book.issue();
        user.add_borrowed(book_id);
        self.book_repository.update(&book)?;
        self.user_repository.update(&user)?;
        info!(book_id, user_id, "book issued");

        let lending = LendingDto::new(BookDto::from(&book), UserDto::from(&user), false);
        let mut metadata = self.metadata();
        metadata.insert("user_id".to_string(), user_id.to_string());
        let event = DomainEvent::issued(
            "book_issued", "lending", book_id.to_string().as_str(), &metadata, &lending);
        self.publish(event);
        Ok(lending)
    }

    fn return_book(&mut self, book_id: i64, user_id: i64) -> LibraryResult<LendingDto> {
        if !self.book_repository.exists(book_id) || !self.user_repository.exists(user_id) {
            debug!(book_id, user_id, "return with unknown book or user");
            return Err(LibraryError::invalid_reference("Invalid book or user."));
        }
        let mut book = self.book_repository.get(book_id)?.clone();
        let mut user = self.user_repository.get(user_id)?.clone();
        if !user.has_borrowed(book_id) {
            debug!(book_id, user_id, "book not borrowed by user");
            return Err(LibraryError::not_borrowed(
                format!("Error: Book ID {} was not borrowed by User ID {}.", book_id, user_id).as_str()));
        }

        let inconsistent = !book.is_issued();
        if inconsistent {
            if self.reject_inconsistent_returns {
                warn!(book_id, user_id, "rejecting return of book that is not marked as issued");
                return Err(LibraryError::inconsistent_state(
                    format!("Error: Book ID {} is borrowed by User ID {} but not marked as issued.", book_id, user_id).as_str()));
            }
            warn!(book_id, user_id, "book was not marked as issued, but is being returned");
        }

        book.returned();
        user.remove_borrowed(book_id);
        self.book_repository.update(&book)?;
        self.user_repository.update(&user)?;
        info!(book_id, user_id, "book returned");

        let lending = LendingDto::new(BookDto::from(&book), UserDto::from(&user), inconsistent);
        let mut metadata = self.metadata();
        metadata.insert("user_id".to_string(), user_id.to_string());
        let event = DomainEvent::returned(
            "book_returned", "lending", book_id.to_string().as_str(), &metadata, &lending);
        self.publish(event);
        Ok(lending)
    }

    fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(id).map(BookDto::from)
    }

    fn find_user_by_id(&self, id: i64) -> LibraryResult<UserDto> {
        self.user_repository.get(id).map(UserDto::from)
    }

    fn list_books(&self) -> Box<dyn Iterator<Item = BookDto> + '_> {
        Box::new(self.book_repository.iter().map(BookDto::from))
    }

    fn list_users(&self) -> Box<dyn Iterator<Item = UserDto> + '_> {
        Box::new(self.user_repository.iter().map(UserDto::from))
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use crate::books::domain::model::BookEntity;
    use crate::books::dto::BookDto;
    use crate::books::factory::create_book_repository;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::domain::service::CatalogServiceImpl;
    use crate::core::domain::Configuration;
    use crate::core::events::DomainEventType;
    use crate::core::library::{BookStatus, LibraryError};
    use crate::core::repository::Repository;
    use crate::gateway::memory::MemoryPublisher;
    use crate::users::domain::User;
    use crate::users::domain::model::UserEntity;
    use crate::users::dto::UserDto;
    use crate::users::factory::create_user_repository;

    fn build_service(config: &Configuration) -> (CatalogServiceImpl, MemoryPublisher) {
        let publisher = MemoryPublisher::new();
        let svc = CatalogServiceImpl::new(config, create_book_repository(),
                                          create_user_repository(), Box::new(publisher.clone()));
        (svc, publisher)
    }

    fn seeded_service() -> (CatalogServiceImpl, MemoryPublisher) {
        let (mut svc, publisher) = build_service(&Configuration::new("test"));
        svc.add_book(&BookDto::new(1, "Dune", "Herbert")).expect("should add book");
        svc.add_book(&BookDto::new(2, "Emma", "Austen")).expect("should add book");
        svc.add_user(&UserDto::new(10, "Alice")).expect("should add user");
        svc.add_user(&UserDto::new(11, "Bob")).expect("should add user");
        (svc, publisher)
    }

    // a book is issued iff exactly one user holds it
    fn assert_consistent(svc: &CatalogServiceImpl) {
        for book in svc.list_books() {
            let holders = svc.list_users().filter(|u| u.has_borrowed(book.book_id)).count();
            if book.book_status == BookStatus::Issued {
                assert_eq!(1, holders, "book {} should have one holder", book.book_id);
            } else {
                assert_eq!(0, holders, "book {} should have no holder", book.book_id);
            }
        }
    }

    #[test]
    fn test_should_add_book() {
        let (mut svc, publisher) = build_service(&Configuration::new("test"));
        let book = BookDto::new(1, "Dune", "Herbert");
        let _ = svc.add_book(&book).expect("should add book");

        let loaded = svc.find_book_by_id(1).expect("should return book");
        assert_eq!(book.title, loaded.title);
        assert_eq!(BookStatus::Available, loaded.book_status);
        assert_eq!(1, publisher.len());
        assert_eq!(DomainEventType::Added, publisher.events()[0].kind);
    }

    #[test]
    fn test_should_not_add_duplicate_book() {
        let (mut svc, publisher) = build_service(&Configuration::new("test"));
        svc.add_book(&BookDto::new(1, "Dune", "Herbert")).expect("should add book");
        let res = svc.add_book(&BookDto::new(1, "Other", "Someone"));
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));

        let loaded = svc.find_book_by_id(1).expect("should return book");
        assert_eq!("Dune", loaded.title.as_str());
        assert_eq!("Herbert", loaded.author.as_str());
        assert_eq!(1, publisher.len());
    }

    #[test]
    fn test_should_not_add_issued_book() {
        let (mut svc, _) = build_service(&Configuration::new("test"));
        let mut book = BookDto::new(1, "Dune", "Herbert");
        book.book_status = BookStatus::Issued;
        let res = svc.add_book(&book);
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
        assert!(svc.find_book_by_id(1).is_err());
    }

    #[test]
    fn test_should_add_user() {
        let (mut svc, _) = build_service(&Configuration::new("test"));
        svc.add_user(&UserDto::new(10, "Alice")).expect("should add user");
        let loaded = svc.find_user_by_id(10).expect("should return user");
        assert_eq!("Alice", loaded.name.as_str());
        assert!(loaded.borrowed_book_ids.is_empty());
    }

    #[test]
    fn test_should_not_add_duplicate_user() {
        let (mut svc, _) = build_service(&Configuration::new("test"));
        svc.add_user(&UserDto::new(10, "Alice")).expect("should add user");
        let res = svc.add_user(&UserDto::new(10, "Mallory"));
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        assert_eq!("Alice", svc.find_user_by_id(10).expect("should return user").name.as_str());
    }

    #[test]
    fn test_should_not_add_user_with_borrowed_books() {
        let (mut svc, _) = build_service(&Configuration::new("test"));
        let mut user = UserDto::new(10, "Alice");
        user.borrowed_book_ids = vec![1];
        let res = svc.add_user(&user);
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
    }

    #[test]
    fn test_should_issue_book() {
        let (mut svc, publisher) = seeded_service();
        let lending = svc.issue_book(1, 10).expect("should issue");
        assert_eq!(BookStatus::Issued, lending.book.book_status);
        assert!(lending.user.has_borrowed(1));
        assert!(!lending.inconsistent);

        assert_eq!(BookStatus::Issued, svc.find_book_by_id(1).expect("book").book_status);
        assert!(svc.find_user_by_id(10).expect("user").has_borrowed(1));
        let events = publisher.events();
        assert_eq!(DomainEventType::Issued, events[events.len() - 1].kind);
        assert_consistent(&svc);
    }

    #[test]
    fn test_should_not_issue_twice() {
        let (mut svc, publisher) = seeded_service();
        svc.issue_book(1, 10).expect("should issue");
        let before = publisher.len();
        for user_id in [10, 11] {
            let res = svc.issue_book(1, user_id);
            assert!(matches!(res, Err(LibraryError::AlreadyIssued { .. })));
        }
        assert_eq!(vec![1], svc.find_user_by_id(10).expect("user").borrowed_book_ids);
        assert!(svc.find_user_by_id(11).expect("user").borrowed_book_ids.is_empty());
        assert_eq!(before, publisher.len());
        assert_consistent(&svc);
    }

    #[test]
    fn test_should_not_issue_unknown() {
        let (mut svc, publisher) = seeded_service();
        let before = publisher.len();
        let res = svc.issue_book(99, 10);
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
        if let Err(err) = res {
            assert_eq!("Book not found.", err.to_string());
        }
        let res = svc.issue_book(1, 99);
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
        if let Err(err) = res {
            assert_eq!("User not found.", err.to_string());
        }
        assert_eq!(BookStatus::Available, svc.find_book_by_id(1).expect("book").book_status);
        assert_eq!(before, publisher.len());
    }

    #[test]
    fn test_should_return_book() {
        let (mut svc, publisher) = seeded_service();
        svc.issue_book(1, 10).expect("should issue");
        let lending = svc.return_book(1, 10).expect("should return");
        assert_eq!(BookStatus::Available, lending.book.book_status);
        assert!(!lending.user.has_borrowed(1));
        assert!(!lending.inconsistent);

        assert_eq!(BookStatus::Available, svc.find_book_by_id(1).expect("book").book_status);
        assert!(!svc.find_user_by_id(10).expect("user").has_borrowed(1));
        let events = publisher.events();
        assert_eq!(DomainEventType::Returned, events[events.len() - 1].kind);
        assert_consistent(&svc);
    }

    #[test]
    fn test_should_cycle_issue_and_return() {
        let (mut svc, _) = seeded_service();
        for user_id in [10, 11, 10] {
            svc.issue_book(2, user_id).expect("should issue");
            assert_consistent(&svc);
            svc.return_book(2, user_id).expect("should return");
            assert_consistent(&svc);
        }
        assert_eq!(BookStatus::Available, svc.find_book_by_id(2).expect("book").book_status);
    }

    #[test]
    fn test_should_not_return_unborrowed() {
        let (mut svc, _) = seeded_service();
        let res = svc.return_book(1, 10);
        assert!(matches!(res, Err(LibraryError::NotBorrowed { .. })));

        // issued to somebody else
        svc.issue_book(1, 11).expect("should issue");
        let res = svc.return_book(1, 10);
        assert!(matches!(res, Err(LibraryError::NotBorrowed { .. })));
        if let Err(err) = res {
            assert_eq!("Error: Book ID 1 was not borrowed by User ID 10.", err.to_string());
        }
        assert_eq!(BookStatus::Issued, svc.find_book_by_id(1).expect("book").book_status);
        assert!(svc.find_user_by_id(11).expect("user").has_borrowed(1));
    }

    #[test]
    fn test_should_not_return_unknown() {
        let (mut svc, publisher) = seeded_service();
        svc.issue_book(1, 10).expect("should issue");
        let before = publisher.len();
        assert!(matches!(svc.return_book(99, 10), Err(LibraryError::InvalidReference { .. })));
        assert!(matches!(svc.return_book(1, 99), Err(LibraryError::InvalidReference { .. })));
        assert_eq!(BookStatus::Issued, svc.find_book_by_id(1).expect("book").book_status);
        assert!(svc.find_user_by_id(10).expect("user").has_borrowed(1));
        assert_eq!(before, publisher.len());
    }

    fn inconsistent_service(config: &Configuration) -> (CatalogServiceImpl, MemoryPublisher) {
        let publisher = MemoryPublisher::new();
        let mut books = create_book_repository();
        let mut users = create_user_repository();
        books.create(BookEntity::new(1, "Dune", "Herbert")).expect("should create book");
        let mut user = UserEntity::new(10, "Alice");
        user.add_borrowed(1);
        users.create(user).expect("should create user");
        let svc = CatalogServiceImpl::new(config, books, users, Box::new(publisher.clone()));
        (svc, publisher)
    }

    #[test]
    fn test_should_warn_on_inconsistent_return() {
        let (mut svc, publisher) = inconsistent_service(&Configuration::new("test"));
        let lending = svc.return_book(1, 10).expect("should return");
        assert!(lending.inconsistent);
        assert_eq!(BookStatus::Available, lending.book.book_status);
        assert!(!svc.find_user_by_id(10).expect("user").has_borrowed(1));
        assert_eq!(1, publisher.len());
    }

    #[test]
    fn test_should_reject_inconsistent_return_when_strict() {
        let config = Configuration::new("test").with_strict_returns(true);
        let (mut svc, publisher) = inconsistent_service(&config);
        let res = svc.return_book(1, 10);
        assert!(matches!(res, Err(LibraryError::InconsistentState { .. })));
        assert!(svc.find_user_by_id(10).expect("user").has_borrowed(1));
        assert!(publisher.is_empty());
    }

    #[test]
    fn test_should_list_books_and_users() {
        let (svc, _) = seeded_service();
        let books: HashSet<i64> = svc.list_books().map(|b| b.book_id).collect();
        assert_eq!(HashSet::from([1, 2]), books);
        let users: HashSet<i64> = svc.list_users().map(|u| u.user_id).collect();
        assert_eq!(HashSet::from([10, 11]), users);
    }

    #[test]
    fn test_should_list_empty() {
        let (svc, _) = build_service(&Configuration::new("test"));
        assert_eq!(0, svc.list_books().count());
        assert_eq!(0, svc.list_users().count());
    }

    #[test]
    fn test_should_run_lending_scenario() {
        let (mut svc, _) = build_service(&Configuration::new("test"));
        svc.add_book(&BookDto::new(1, "Dune", "Herbert")).expect("should add book");
        svc.add_user(&UserDto::new(10, "Alice")).expect("should add user");

        svc.issue_book(1, 10).expect("should issue");
        assert_eq!("Book ID: 1, Title: Dune, Author: Herbert, Status: Issued",
                   svc.find_book_by_id(1).expect("book").to_string());
        assert!(matches!(svc.issue_book(1, 10), Err(LibraryError::AlreadyIssued { .. })));

        svc.return_book(1, 10).expect("should return");
        assert_eq!("Book ID: 1, Title: Dune, Author: Herbert, Status: Available",
                   svc.find_book_by_id(1).expect("book").to_string());
        assert!(matches!(svc.return_book(1, 10), Err(LibraryError::NotBorrowed { .. })));
        assert_consistent(&svc);
    }
}
