pub mod date;
pub mod document;
pub mod id_number;
pub mod name;
pub mod phone;

pub use date::{parse_date, DateMatcher, DateRule};
pub use document::DocumentClassifier;
pub use id_number::IdNumberMatcher;
pub use name::NameMatcher;
pub use phone::PhoneMatcher;
