pub mod cli;
pub mod privacy;
pub mod utils;

pub use privacy::catalog::Category;
pub use privacy::redaction::{mask_personal_info, Masker};
