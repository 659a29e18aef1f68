pub mod course;
pub mod department;
pub mod dispatch;
pub mod enrollment;
pub mod prereq;
pub mod schema;
pub mod shared;
pub mod student;
