//! Bid fee domain: value types, fee policy, and pure calculation services

pub mod model;
pub mod repository;
pub mod service;
