pub mod converter;
pub mod runner;
