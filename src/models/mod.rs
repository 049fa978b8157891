pub mod format;
pub mod outcome;
pub mod work_item;

pub use format::InputFormat;
pub use outcome::ExecutionResult;
pub use work_item::{TaskHandle, WorkItem};
