use async_trait::async_trait;
use models::company::{self, CompanyStatus};

use super::domain::NewCompany;
use crate::errors::ServiceError;

/// Repository abstraction over the company store.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert with status `PENDING`; a taken tax id yields `ServiceError::Conflict`.
    async fn insert(&self, new: NewCompany) -> Result<company::Model, ServiceError>;
    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<company::Model>, ServiceError>;
    /// All rows in insertion order.
    async fn list(&self) -> Result<Vec<company::Model>, ServiceError>;
    async fn set_status(&self, existing: company::Model, status: CompanyStatus) -> Result<company::Model, ServiceError>;
    /// Returns true if a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockCompanyRepository {
        rows: Mutex<BTreeMap<i32, company::Model>>, // key: id
        next_id: Mutex<i32>,
    }

    fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, ServiceError> {
        m.lock().map_err(|_| ServiceError::Db("mock repository lock poisoned".into()))
    }

    #[async_trait]
    impl CompanyRepository for MockCompanyRepository {
        async fn insert(&self, new: NewCompany) -> Result<company::Model, ServiceError> {
            let mut rows = lock(&self.rows)?;
            if rows.values().any(|m| m.tax_id == new.tax_id) {
                return Err(ServiceError::duplicate_tax_id(&new.tax_id));
            }
            let mut next = lock(&self.next_id)?;
            *next += 1;
            let m = company::Model {
                id: *next,
                tax_id: new.tax_id,
                name: new.name,
                status: CompanyStatus::Pending,
                data: new.data,
            };
            rows.insert(m.id, m.clone());
            Ok(m)
        }

        async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<company::Model>, ServiceError> {
            let rows = lock(&self.rows)?;
            Ok(rows.values().find(|m| m.tax_id == tax_id).cloned())
        }

        async fn list(&self) -> Result<Vec<company::Model>, ServiceError> {
            let rows = lock(&self.rows)?;
            Ok(rows.values().cloned().collect())
        }

        async fn set_status(&self, existing: company::Model, status: CompanyStatus) -> Result<company::Model, ServiceError> {
            let mut rows = lock(&self.rows)?;
            let row = rows.get_mut(&existing.id).ok_or_else(|| ServiceError::not_found("company"))?;
            row.status = status;
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut rows = lock(&self.rows)?;
            Ok(rows.remove(&id).is_some())
        }
    }
}
