pub mod category;
pub mod common;
pub mod error;
pub mod genre;
pub mod use_case;

pub use error::{Error, Result};
pub use use_case::UseCase;
