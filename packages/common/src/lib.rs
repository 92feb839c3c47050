pub mod injectable;

pub use injectable::*;
