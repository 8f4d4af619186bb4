//! Infrastructure layer: persistence for the three backends.
//!
//! Every app talks to its data through an async store trait. Two
//! implementations exist per trait: an in-memory one (dev runs and tests) and
//! a Postgres one built on `sqlx`.

pub mod booking;
pub mod db;
pub mod drinks;
pub mod error;
pub mod trivia;

mod memory;

pub use booking::{BookingStore, InMemoryBookingStore, PostgresBookingStore};
pub use drinks::{DrinkStore, InMemoryDrinkStore, PostgresDrinkStore};
pub use error::StoreError;
pub use trivia::{InMemoryTriviaStore, PostgresTriviaStore, TriviaStore};
