use std::sync::Arc;

use models::company::{self, CompanyStatus};
use tracing::{debug, info, instrument};

use super::domain::{CompanyRecord, CreateCompanyRequest, NewCompany, UpdateStatusRequest};
use super::repository::CompanyRepository;
use crate::errors::ServiceError;

const MISSING_REQUIRED: &str = "the 'tax_id' and 'name' fields are required";

/// Company business service independent of web framework
pub struct CompanyService<R: CompanyRepository> {
    repo: Arc<R>,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Store a new company with status `PENDING`.
    ///
    /// Only presence of `tax_id` and `name` is checked here; the stricter
    /// digit/length rule applies to status updates alone. Empty `data` is dropped.
    ///
    /// # Examples
    /// ```
    /// use service::company::{CompanyService, domain::CreateCompanyRequest, repository::mock::MockCompanyRepository};
    /// use std::sync::Arc;
    /// let svc = CompanyService::new(Arc::new(MockCompanyRepository::default()));
    /// let req = CreateCompanyRequest { tax_id: Some("900123456".into()), name: Some("Acme".into()), data: None };
    /// let rec = tokio_test::block_on(svc.create(req)).unwrap();
    /// assert_eq!(rec.status.as_str(), "PENDING");
    /// ```
    #[instrument(skip(self, req), fields(tax_id = req.tax_id.as_deref().unwrap_or_default()))]
    pub async fn create(&self, req: CreateCompanyRequest) -> Result<CompanyRecord, ServiceError> {
        let (tax_id, name) = match (req.tax_id, req.name) {
            (Some(t), Some(n)) if !t.is_empty() && !n.is_empty() => (t, n),
            _ => return Err(ServiceError::Validation(MISSING_REQUIRED.into())),
        };

        if self.repo.find_by_tax_id(&tax_id).await?.is_some() {
            debug!("company exists");
            return Err(ServiceError::duplicate_tax_id(&tax_id));
        }

        let new = NewCompany { tax_id, name, data: company::normalize_data(req.data) };
        let created = self.repo.insert(new).await?;
        info!(id = created.id, tax_id = %created.tax_id, "company_created");
        Ok(created.into())
    }

    /// Change the status of an existing company. Any transition is allowed.
    #[instrument(skip(self, req), fields(tax_id = req.tax_id.as_deref().unwrap_or_default()))]
    pub async fn update_status(&self, req: UpdateStatusRequest) -> Result<CompanyRecord, ServiceError> {
        let tax_id = req.tax_id.unwrap_or_default();
        company::validate_tax_id(&tax_id)?;
        let status: CompanyStatus = req.status.unwrap_or_default().parse()?;

        let existing = self
            .repo
            .find_by_tax_id(&tax_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("company"))?;
        let previous = existing.status;
        let updated = self.repo.set_status(existing, status).await?;
        info!(tax_id = %updated.tax_id, from = %previous, to = %updated.status, "company_status_updated");
        Ok(updated.into())
    }

    /// Every stored company in insertion order.
    pub async fn list(&self) -> Result<Vec<CompanyRecord>, ServiceError> {
        let rows = self.repo.list().await?;
        debug!(count = rows.len(), "list companies");
        Ok(rows.into_iter().map(CompanyRecord::from).collect())
    }

    pub async fn get(&self, tax_id: &str) -> Result<CompanyRecord, ServiceError> {
        self.repo
            .find_by_tax_id(tax_id)
            .await?
            .map(CompanyRecord::from)
            .ok_or_else(|| ServiceError::not_found("company"))
    }

    /// Hard delete by tax id.
    #[instrument(skip(self))]
    pub async fn delete(&self, tax_id: &str) -> Result<(), ServiceError> {
        let existing = self
            .repo
            .find_by_tax_id(tax_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("company"))?;
        if !self.repo.delete(existing.id).await? {
            // removed by a concurrent request between lookup and delete
            return Err(ServiceError::not_found("company"));
        }
        info!(id = existing.id, "company_deleted");
        Ok(())
    }
}
