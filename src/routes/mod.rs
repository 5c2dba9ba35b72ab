pub mod auth;

pub mod users;

pub mod departments;

pub mod students;

pub mod courses;

pub mod grades;

pub mod reports;

pub mod content;

pub mod media;

pub use auth::configure_auth_routes;
pub use content::configure_content_routes;
pub use courses::configure_course_routes;
pub use departments::configure_department_routes;
pub use grades::configure_grade_routes;
pub use media::configure_media_routes;
pub use reports::configure_report_routes;
pub use students::configure_student_routes;
pub use users::configure_user_routes;
