//! `fm-traffic`: the vertex reservation service ("traffic manager").
//!
//! # Crate layout
//!
//! | Module      | Contents                                           |
//! |-------------|----------------------------------------------------|
//! | [`manager`] | `TrafficManager`: test-and-set reservation table  |
//! | [`error`]   | `TrafficError`, `TrafficResult<T>`                 |
//!
//! # Serialization
//!
//! `TrafficManager` mutates through `&mut self` only.  The coordinator owns
//! the single instance and fires every robot timer from one loop, so each
//! `request`/`release` completes before the next begins; two requesters can
//! never both see a vertex as free.

pub mod error;
pub mod manager;


pub use error::{TrafficError, TrafficResult};
pub use manager::{Owner, TrafficManager};
