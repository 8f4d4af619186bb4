pub mod artists;
pub mod coffee;
pub mod shows;
pub mod system;
pub mod trivia;
pub mod venues;
