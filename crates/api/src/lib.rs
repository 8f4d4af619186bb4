//! HTTP API: the coffee-shop, fyyur and trivia routers, plus the pieces they
//! share (error envelope, permission guard, config, server bootstrap).

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
pub mod server;
