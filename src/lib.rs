pub mod algo;
pub mod cloud;
pub mod utils;
