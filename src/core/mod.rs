pub mod persistence;
pub mod registry;
pub mod shell;

pub use crate::domain::model::{Consultation, Owner, Pet};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
