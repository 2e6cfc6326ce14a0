#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;

mod error;
mod history;
mod personal_record;
mod rotation;
mod schedule;
mod service;
mod snapshot;
mod workout;

pub use error::*;
pub use history::*;
pub use personal_record::*;
pub use rotation::*;
pub use schedule::*;
pub use service::*;
pub use snapshot::*;
pub use workout::*;
