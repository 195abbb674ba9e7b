pub mod task;
pub mod task_list;
pub mod user;

pub use task::{StatusChange, Task, TaskInput, TaskPriority, TaskQuery, TaskStatus, TaskUpdate};
pub use task_list::{TaskList, TaskListFilteredResponse, TaskListInput, TaskListUpdate};
pub use user::User;
