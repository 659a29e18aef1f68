mod course;
mod department;
mod enrollment;
mod prereq;
mod student;

pub use course::CourseCommands;
pub use department::DepartmentCommands;
pub use enrollment::EnrollmentCommands;
pub use prereq::PrereqCommands;
pub use student::StudentCommands;
