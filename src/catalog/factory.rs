use crate::books::factory::create_book_repository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::gateway::factory::create_publisher;
use crate::gateway::GatewayPublisherVia;
use crate::users::factory::create_user_repository;

pub fn create_catalog_service(config: &Configuration, via: GatewayPublisherVia) -> Box<dyn CatalogService> {
    let book_repo = create_book_repository();
    let user_repo = create_user_repository();
    let publisher = create_publisher(via, config.branch_id.as_str());
    Box::new(CatalogServiceImpl::new(config, book_repo, user_repo, publisher))
}
