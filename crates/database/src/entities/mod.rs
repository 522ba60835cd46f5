pub mod courses;
pub mod faculties;
pub mod notifications;
pub mod prerequisites;
pub mod section_space_times;
pub mod section_teachers;
pub mod sections;
pub mod space_times;
pub mod students;
pub mod subjects;
pub mod trimesters;
