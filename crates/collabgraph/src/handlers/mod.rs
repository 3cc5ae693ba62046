pub mod collaborations;
pub mod error;
pub mod health;
pub mod projects;
pub mod publications;
pub mod researchers;

pub use error::AppError;
