pub mod calendar;
pub mod database;
pub mod messaging;
pub mod repository;
