// Profile records: work history, education, certifications, skills and
// personal info. The optimization pipeline reads them through `ProfileStore`.

pub mod handlers;
pub mod store;
