pub mod category;
pub mod error;
