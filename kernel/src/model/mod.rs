pub mod appointment;
pub mod availability;
pub mod client;
pub mod id;
pub mod role;
pub mod slot;
pub mod stats;
pub mod time_range;
