use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::users::dto::UserDto;

pub struct ListUsersCommand<'a> {
    catalog_service: &'a dyn CatalogService,
}

impl<'a> ListUsersCommand<'a> {
    pub fn new(catalog_service: &'a dyn CatalogService) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListUsersCommandRequest {}


#[derive(Debug, Serialize)]
pub struct ListUsersCommandResponse {
    pub users: Vec<UserDto>,
}

impl ListUsersCommandResponse {
    pub fn new(users: Vec<UserDto>) -> Self {
        Self {
            users,
        }
    }
}

impl<'a> Command<ListUsersCommandRequest, ListUsersCommandResponse> for ListUsersCommand<'a> {
    fn execute(&mut self, _req: ListUsersCommandRequest) -> Result<ListUsersCommandResponse, CommandError> {
        Ok(ListUsersCommandResponse::new(self.catalog_service.list_users().collect()))
    }
}
