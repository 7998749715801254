//! Student module: three-layer architecture (domain, repository, service).
//!
//! The service enforces email uniqueness on registration and existence
//! before mutation; persistence sits behind `StudentRepository`.

pub mod domain;
pub mod repository;
pub mod service;
#[cfg(feature = "seaorm")]
pub mod repo;

pub use domain::{Gender, Student};
pub use service::StudentService;
