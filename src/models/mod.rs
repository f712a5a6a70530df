//! Core data models for the Compensation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod breakdown;
mod compensation;
mod employee;
mod revision;

pub use breakdown::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, CompensationBreakdown, ComponentKind,
    LineItem, RevisionResult,
};
pub use compensation::{CompensationInput, SalaryBasis};
pub use employee::{EmployeeRecord, RevisionSummary};
pub use revision::{SalaryRevision, SalaryRevisionRequest};
