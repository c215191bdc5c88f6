//! Backend services

pub mod greeting;
