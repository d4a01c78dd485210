pub mod error;
pub mod models;
pub mod utils;

pub use error::{ErrorKind, GradebookError};
pub use models::{Assignment, Category, FinalGrade};
pub use utils::gradebook::{parse_number, Gradebook};
