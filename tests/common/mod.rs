pub mod recording;
pub mod strategies;
