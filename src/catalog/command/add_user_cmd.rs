use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::users::dto::UserDto;

pub struct AddUserCommand<'a> {
    catalog_service: &'a mut dyn CatalogService,
}

impl<'a> AddUserCommand<'a> {
    pub fn new(catalog_service: &'a mut dyn CatalogService) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddUserCommandRequest {
    pub user_id: i64,
    pub name: String,
}

impl AddUserCommandRequest {
    pub fn new(user_id: i64, name: &str) -> Self {
        Self {
            user_id,
            name: name.to_string(),
        }
    }
    pub fn build_user(&self) -> UserDto {
        UserDto::new(self.user_id, self.name.as_str())
    }
}


#[derive(Debug, Serialize)]
pub struct AddUserCommandResponse {
    pub user: UserDto,
}

impl AddUserCommandResponse {
    pub fn new(user: UserDto) -> Self {
        Self {
            user,
        }
    }
}

impl<'a> Command<AddUserCommandRequest, AddUserCommandResponse> for AddUserCommand<'a> {
    fn execute(&mut self, req: AddUserCommandRequest) -> Result<AddUserCommandResponse, CommandError> {
        let user = req.build_user();
        self.catalog_service.add_user(&user).map_err(CommandError::from).map(AddUserCommandResponse::new)
    }
}
