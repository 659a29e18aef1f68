//! Entity structs for all Registrar domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `reg-db` migrations).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON output
//! and schema generation.

mod course;
mod department;
mod enrollment;
mod prerequisite;
mod student;

pub use course::{Course, NewCourse};
pub use department::Department;
pub use enrollment::Enrollment;
pub use prerequisite::PrerequisiteEdge;
pub use student::{NewStudent, Student};
