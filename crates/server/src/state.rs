use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::company::{repo::seaorm::SeaOrmCompanyRepository, CompanyService};

pub type Companies = CompanyService<SeaOrmCompanyRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub companies: Arc<Companies>,
}

impl ServerState {
    /// Wire the store connection into the repository and service.
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmCompanyRepository::new(db));
        Self { companies: Arc::new(CompanyService::new(repo)) }
    }
}
