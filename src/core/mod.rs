pub mod alphabet;
pub mod config;
pub mod sort;
pub mod uint128;
