pub mod components;
pub mod connections;
pub mod errors;
pub mod execution;
pub mod output;
pub mod trace;
pub mod transcript;
pub mod types;

#[cfg(test)]
mod tests;
