pub mod stages;

mod adapter;
pub use adapter::*;

mod weights;
