//! Notification Fan-out (通知)
//!
//! Notifications are append-only rows in `notifications.json`. A row with
//! `userId: null` is a broadcast visible to everyone.

pub mod fanout;

pub use fanout::NotificationFanout;
