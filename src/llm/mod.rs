pub mod client;
pub mod gateway;
pub mod prompts;
pub mod recovery;

pub use client::*;
pub use gateway::*;
pub use prompts::*;
pub use recovery::*;
