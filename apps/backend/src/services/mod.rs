//! Service layer: orchestrates domain logic over the persistence and
//! broadcast ports, under per-room write serialization.

pub mod catalog;
pub mod rooms;
pub mod rounds;
pub mod voting;

pub use catalog::CatalogService;
pub use rooms::RoomService;
pub use rounds::RoundService;
pub use voting::VotingService;
