pub mod model;
pub mod port;
pub mod repository;
pub mod service;
