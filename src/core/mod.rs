pub mod config;
pub mod deployment;
pub mod diagnosis;
pub mod project;
pub mod report;
