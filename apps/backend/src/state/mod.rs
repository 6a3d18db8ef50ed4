pub mod app_state;
pub mod room_locks;

pub use app_state::AppState;
pub use room_locks::RoomLocks;
