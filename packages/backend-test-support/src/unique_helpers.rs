//! Test helpers for generating unique test data
//!
//! This module provides utilities to help generate unique test data using ULIDs
//! to ensure test isolation and avoid conflicts between test runs.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Arguments
/// * `prefix` - The prefix to use for the unique string
///
/// # Returns
/// A unique string in the format `{prefix}-{ulid}`
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("room");
/// let id2 = unique_str("room");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("room-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique player display name with the given prefix
///
/// # Arguments
/// * `prefix` - The prefix to use for the name
///
/// # Returns
/// A unique name in the format `{prefix}-{ulid}`, safe to join into any room
/// without tripping the duplicate-name conflict check.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_player_name;
///
/// let name1 = unique_player_name("alice");
/// let name2 = unique_player_name("alice");
/// assert_ne!(name1, name2);
/// ```
pub fn unique_player_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
