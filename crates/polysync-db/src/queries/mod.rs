//! Read-only source queries for the sync pipeline.
//!
//! Every function here decodes rows into the typed records of
//! `polysync-core` at the boundary; nothing downstream touches raw rows.

pub mod friendships;
pub mod posts;
pub mod users;
