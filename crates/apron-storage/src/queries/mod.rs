//! Per-table query functions. Every function takes the connection or
//! transaction handle it runs on; callers own the transactional boundary.

pub mod attachments;
pub mod employees;
pub mod incidents;
pub mod locations;
pub mod responses;
pub mod sources;
pub mod statuses;
