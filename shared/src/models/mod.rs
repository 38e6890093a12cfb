//! Data models
//!
//! Shared between station-server and frontend (via API).
//! All IDs are `i64`, assigned per collection as max(existing)+1.
//! Timestamps are RFC 3339 UTC (`chrono::DateTime<Utc>`).

pub mod department;
pub mod notification;
pub mod task;
pub mod user;

// Re-exports
pub use department::*;
pub use notification::*;
pub use task::*;
pub use user::*;

/// Stored record with a collection-unique integer id.
pub trait Record {
    fn id(&self) -> i64;
}

/// Next id for a collection: max(existing ids) + 1, or 1 when empty.
pub fn next_id<T: Record>(records: &[T]) -> i64 {
    records.iter().map(Record::id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rec(i64);
    impl Record for Rec {
        fn id(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn next_id_is_one_for_empty_collection() {
        assert_eq!(next_id::<Rec>(&[]), 1);
    }

    #[test]
    fn next_id_is_max_plus_one() {
        // Gaps from purged records must not be reused
        assert_eq!(next_id(&[Rec(1), Rec(7), Rec(3)]), 8);
    }
}
