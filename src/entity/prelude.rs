pub use super::departments::Entity as Departments;
pub use super::sections::Entity as Sections;
pub use super::student_profiles::Entity as StudentProfiles;
pub use super::subject_teacher_sections::Entity as SubjectTeacherSections;
pub use super::subjects::Entity as Subjects;
pub use super::submissions::Entity as Submissions;
pub use super::teacher_profiles::Entity as TeacherProfiles;
pub use super::users::Entity as Users;
pub use super::work_items::Entity as WorkItems;
