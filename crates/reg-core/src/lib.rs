//! # reg-core
//!
//! Core types, ID prefixes, and error types for Registrar.
//!
//! This crate provides the foundational types shared across all Registrar crates:
//! - Entity structs for all domain objects (departments, courses, students, ...)
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - The domain error taxonomy
//! - The prerequisite graph engine (cycle checking, closure, chain building)
//! - The enrollment state machine (pure transition planning)
//! - Response types returned by the service layer

pub mod enrollment;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod graph;
pub mod ids;
pub mod responses;
pub mod validation;
