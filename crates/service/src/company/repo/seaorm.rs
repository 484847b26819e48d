use async_trait::async_trait;
use models::company::{self, CompanyStatus, Entity as CompanyEntity};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};

use crate::company::domain::NewCompany;
use crate::company::repository::CompanyRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn db_err(e: DbErr) -> ServiceError { ServiceError::Db(e.to_string()) }

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn insert(&self, new: NewCompany) -> Result<company::Model, ServiceError> {
        let am = company::ActiveModel {
            tax_id: Set(new.tax_id.clone()),
            name: Set(new.name),
            status: Set(CompanyStatus::Pending),
            data: Set(new.data),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::duplicate_tax_id(&new.tax_id),
            _ => db_err(e),
        })
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<company::Model>, ServiceError> {
        CompanyEntity::find()
            .filter(company::Column::TaxId.eq(tax_id))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    async fn list(&self) -> Result<Vec<company::Model>, ServiceError> {
        CompanyEntity::find()
            .order_by_asc(company::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn set_status(&self, existing: company::Model, status: CompanyStatus) -> Result<company::Model, ServiceError> {
        let mut am: company::ActiveModel = existing.into();
        am.status = Set(status);
        am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ServiceError::not_found("company"),
            other => db_err(other),
        })
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = CompanyEntity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }
}
