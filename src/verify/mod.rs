pub mod claim;
pub mod quote;

pub use claim::*;
pub use quote::*;
