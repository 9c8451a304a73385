pub mod ai;
pub mod calculators;
pub mod engine;
pub mod rng;
pub mod runner;
pub mod state;
pub mod type_chart;

#[cfg(test)]
mod tests;
