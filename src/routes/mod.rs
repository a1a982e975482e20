pub mod course_assignments;

pub mod submissions;

pub mod work_items;

pub use course_assignments::configure_course_assignments_routes;
pub use submissions::configure_submissions_routes;
pub use work_items::configure_work_items_routes;
