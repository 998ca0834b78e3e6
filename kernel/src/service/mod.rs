pub mod availability;
pub mod booking;
pub mod lifecycle;
pub mod stats;
pub mod task;

#[cfg(test)]
mod test_support;
