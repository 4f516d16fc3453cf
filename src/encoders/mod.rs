pub mod algorithms;
pub mod codec;

// Re-export commonly used items
pub use algorithms::{base57, radix};
