pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod output;
pub mod render;
pub mod runner;
pub mod view;

#[cfg(test)]
mod tests;
