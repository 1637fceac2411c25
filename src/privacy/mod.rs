pub mod catalog;
pub mod config;
pub mod redaction;
pub mod resolver;
pub mod scanner;
pub mod span;

pub use catalog::{Catalog, Category, Gazetteer, PatternKind};
pub use config::{LogConfig, NikkiConfig, OutputConfig};
pub use redaction::{mask_personal_info, MaskEvent, MaskResult, Masker};
pub use span::{Detection, Span};
