//! Domain model for employee records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep wire (JSON) and stored shapes separate with explicit conversions.
//!
//! # Invariants
//! - Every stored employee is identified by a storage-assigned `EmployeeId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod employee;
pub mod wire;
