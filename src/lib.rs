pub mod app;
pub mod auth;
pub mod config;
pub mod courses;
pub mod db;
pub mod error;
pub mod profile;
pub mod seed;
pub mod state;
pub mod telemetry;
pub mod tutors;
