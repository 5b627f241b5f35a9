pub mod announce;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod matches;
pub mod persist;
pub mod roster;
pub mod session;
pub mod sheet;
pub mod state;
pub mod validate;
