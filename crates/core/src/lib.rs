//! `crudkit-core` — building blocks shared by the three backends.
//!
//! This crate has no IO: it holds the error model, typed identifiers and the
//! query component (pagination, search, filtering, grouping, random pick).

pub mod entity;
pub mod error;
pub mod id;
pub mod query;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use query::{PAGE_SIZE, Page, PageNumber, Pick};
