pub mod fact_check;
pub mod quotes;
pub mod summary;
pub mod tags;
pub mod takeaways;

pub use fact_check::*;
pub use quotes::*;
pub use summary::*;
pub use tags::*;
pub use takeaways::*;
