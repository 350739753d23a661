pub mod rental_repository;

pub use rental_repository::RentalRepository as InMemoryRentalRepository;
