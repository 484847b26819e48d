//! Company records: three-layer architecture (domain, repository, service).
//!
//! The repository is the store seam; `CompanyService` owns validation and
//! normalization and is constructed with an explicit repository handle.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::CompanyService;
