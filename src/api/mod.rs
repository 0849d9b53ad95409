pub mod client;
pub mod error;
#[cfg(test)]
pub mod fake;
pub mod traits;
