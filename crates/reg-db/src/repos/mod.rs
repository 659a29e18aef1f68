//! Repository modules implementing the operations for all Registrar entities.
//!
//! Each module exposes connection-level functions that run inside an open
//! transaction, and adds methods to `RegistrarService` via
//! `impl RegistrarService` blocks that wrap them in one.

pub mod course;
pub mod department;
pub mod enrollment;
pub mod prerequisite;
pub mod student;
