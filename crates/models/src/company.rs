use std::{fmt, str::FromStr};

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

/// A company record keyed by its tax id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub tax_id: String,
    pub name: String,
    pub status: CompanyStatus,
    #[sea_orm(column_type = "Json", nullable)]
    pub data: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Processing status. Any state may move to any other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum CompanyStatus {
    #[default]
    #[sea_orm(string_value = "PENDING")]
    #[serde(rename = "PENDING", alias = "PENDIENTE")]
    Pending,
    #[sea_orm(string_value = "PROCESSED")]
    #[serde(rename = "PROCESSED", alias = "PROCESADO")]
    Processed,
    #[sea_orm(string_value = "ERROR")]
    #[serde(rename = "ERROR")]
    Error,
}

impl CompanyStatus {
    pub const ALL: [CompanyStatus; 3] = [CompanyStatus::Pending, CompanyStatus::Processed, CompanyStatus::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Pending => "PENDING",
            CompanyStatus::Processed => "PROCESSED",
            CompanyStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanyStatus {
    type Err = errors::ModelError;

    /// Canonical names plus the Spanish labels of the legacy API. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" | "PENDIENTE" => Ok(CompanyStatus::Pending),
            "PROCESSED" | "PROCESADO" => Ok(CompanyStatus::Processed),
            "ERROR" => Ok(CompanyStatus::Error),
            _ => Err(errors::ModelError::Validation(
                "invalid status: expected one of PENDING, PROCESSED, ERROR".into(),
            )),
        }
    }
}

/// Strict tax id rule: ASCII digits only, 6 to 15 of them.
pub fn is_valid_tax_id(tax_id: &str) -> bool {
    (6..=15).contains(&tax_id.len()) && tax_id.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_tax_id(tax_id: &str) -> Result<(), errors::ModelError> {
    if !is_valid_tax_id(tax_id) {
        return Err(errors::ModelError::Validation(
            "invalid tax_id: must be numeric with 6-15 digits".into(),
        ));
    }
    Ok(())
}

/// Falsy payloads carry no content: `null`, `false`, zero, `""`, `[]` and `{}`.
pub fn is_empty_data(data: &Json) -> bool {
    match data {
        Json::Null => true,
        Json::Bool(b) => !*b,
        Json::Number(n) => n.as_f64() == Some(0.0),
        Json::Object(m) => m.is_empty(),
        Json::Array(a) => a.is_empty(),
        Json::String(s) => s.is_empty(),
    }
}

/// Drop empty payloads so they are stored as SQL NULL.
pub fn normalize_data(data: Option<Json>) -> Option<Json> {
    data.filter(|d| !is_empty_data(d))
}
