//! Project-specific utilities live here.

use uuid::Uuid;

/// New record identifier. UUIDv7 with a monotonic counter, so lexical order
/// follows creation order within the process, even inside one millisecond.
pub fn new_record_id() -> String {
    Uuid::now_v7().to_string()
}
