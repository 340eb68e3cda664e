//! Domain rules for the movie review catalog.
//!
//! Everything here is pure logic without I/O: the shared error taxonomy,
//! movie query semantics (filter, sort, paginate), read-time rating
//! aggregation, and review ownership checks.

pub mod error;
pub mod movie;
pub mod review;
pub mod types;
