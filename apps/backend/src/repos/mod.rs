//! Persistence port traits for the domain layer.
//!
//! All reads return an explicit `Option` rather than erroring on absence;
//! `require_*` helpers convert `None` into the matching `DomainError`.

pub mod catalog;
pub mod players;
pub mod rooms;

pub use catalog::CatalogRepo;
pub use players::PlayerRepo;
pub use rooms::RoomRepo;
