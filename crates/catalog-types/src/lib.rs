pub mod category;
pub mod config;
pub mod error;
pub mod genre;
pub mod validation;

pub use category::Category;
pub use error::ValidationError;
pub use genre::Genre;
