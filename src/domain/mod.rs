pub mod availability;
pub mod commands;
pub mod errors;
pub mod rental;
pub mod value_objects;

pub use errors::*;
pub use rental::{Customer, Rental, RentalDraft};
pub use value_objects::*;
