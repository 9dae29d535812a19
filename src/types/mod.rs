//! Discord API entities.
//!
//! Layout and naming follow `twilight-model`: typed IDs with marker types,
//! open value enums with an `Unknown` variant, and hand-written error types.
//! Unlike twilight every entity also implements the streaming codec in
//! [`crate::codec`].

pub mod channel;
pub mod emoji;
pub mod id;
pub mod user;
pub mod util;
