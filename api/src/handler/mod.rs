pub mod appointment;
pub mod availability;
pub mod client;
pub mod health;
pub mod stats;
