use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::LendingDto;
use crate::core::command::{Command, CommandError};

pub struct IssueBookCommand<'a> {
    catalog_service: &'a mut dyn CatalogService,
}

impl<'a> IssueBookCommand<'a> {
    pub fn new(catalog_service: &'a mut dyn CatalogService) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IssueBookCommandRequest {
    book_id: i64,
    user_id: i64,
}

impl IssueBookCommandRequest {
    pub fn new(book_id: i64, user_id: i64) -> Self {
        Self {
            book_id,
            user_id,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct IssueBookCommandResponse {
    pub lending: LendingDto,
}

impl IssueBookCommandResponse {
    pub fn new(lending: LendingDto) -> Self {
        Self {
            lending,
        }
    }
}

impl<'a> Command<IssueBookCommandRequest, IssueBookCommandResponse> for IssueBookCommand<'a> {
    fn execute(&mut self, req: IssueBookCommandRequest) -> Result<IssueBookCommandResponse, CommandError> {
        self.catalog_service.issue_book(req.book_id, req.user_id)
            .map_err(CommandError::from).map(IssueBookCommandResponse::new)
    }
}
