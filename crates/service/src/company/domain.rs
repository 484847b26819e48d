use models::company::{self, CompanyStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /process-data`.
///
/// Fields are optional here so a missing field is reported by the service with
/// its own message. The legacy Spanish field names are accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCompanyRequest {
    #[serde(default, alias = "nit")]
    pub tax_id: Option<String>,
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "datos")]
    pub data: Option<Value>,
}

/// Body of `POST /update-status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateStatusRequest {
    #[serde(default, alias = "nit")]
    pub tax_id: Option<String>,
    #[serde(default, alias = "estado")]
    pub status: Option<String>,
}

/// Validated input handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub tax_id: String,
    pub name: String,
    pub data: Option<Value>,
}

/// Serialized view of a company; `data` is omitted when it has no content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: i32,
    pub tax_id: String,
    pub name: String,
    pub status: CompanyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl From<company::Model> for CompanyRecord {
    fn from(m: company::Model) -> Self {
        Self {
            id: m.id,
            tax_id: m.tax_id,
            name: m.name,
            status: m.status,
            data: company::normalize_data(m.data),
        }
    }
}
