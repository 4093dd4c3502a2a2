pub mod career;
pub mod query;

pub use career::{CareerRecord, EducationPath};
pub use query::{ProfileFields, QueryContext};
