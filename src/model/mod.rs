pub mod correlation_id;
pub mod priority;
pub mod task;

pub use correlation_id::CorrelationId;
pub use priority::Priority;
pub use task::{Field, NewTask, Status, Task, TaskId, TaskPatch};
