#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
mod food;
mod id;
mod membership;
mod name;
mod nutrition_plan;
mod recipe;
mod service;
mod training_program;

pub use error::*;
pub use exercise::*;
pub use food::*;
pub use membership::*;
pub use name::*;
pub use nutrition_plan::*;
pub use recipe::*;
pub use service::*;
pub use training_program::*;
