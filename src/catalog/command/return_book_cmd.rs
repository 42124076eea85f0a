use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::LendingDto;
use crate::core::command::{Command, CommandError};

pub struct ReturnBookCommand<'a> {
    catalog_service: &'a mut dyn CatalogService,
}

impl<'a> ReturnBookCommand<'a> {
    pub fn new(catalog_service: &'a mut dyn CatalogService) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReturnBookCommandRequest {
    book_id: i64,
    user_id: i64,
}

impl ReturnBookCommandRequest {
    pub fn new(book_id: i64, user_id: i64) -> Self {
        Self {
            book_id,
            user_id,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct ReturnBookCommandResponse {
    pub lending: LendingDto,
}

impl ReturnBookCommandResponse {
    pub fn new(lending: LendingDto) -> Self {
        Self {
            lending,
        }
    }
}

impl<'a> Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand<'a> {
    fn execute(&mut self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.catalog_service.return_book(req.book_id, req.user_id)
            .map_err(CommandError::from).map(ReturnBookCommandResponse::new)
    }
}
