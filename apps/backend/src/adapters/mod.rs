//! In-process adapters for the persistence ports.
//!
//! Rooms are short-lived and durability across restarts is explicitly not
//! required, so the shipped adapters keep everything in process memory
//! behind `parking_lot` locks. A database-backed adapter would slot in
//! behind the same traits.

pub mod catalog_mem;
pub mod players_mem;
pub mod rooms_mem;

pub use catalog_mem::MemCatalogRepo;
pub use players_mem::MemPlayerRepo;
pub use rooms_mem::MemRoomRepo;
