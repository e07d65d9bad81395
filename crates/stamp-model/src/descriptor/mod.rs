mod bag;
pub use bag::ConfigBag;

mod task;
pub use task::{TaskDescriptor, TaskId};
