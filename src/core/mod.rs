pub mod allocator;
pub mod engine;
pub mod reporter;
pub mod validator;

pub use crate::domain::model::{Assignment, LoadReport, RaffleInput};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
