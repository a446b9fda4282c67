//! Shared building blocks for the tasktrack application.
//!
//! - **Domain**: task model, query and update types ([`task`])
//! - **Errors**: the store error taxonomy ([`error`])
//! - **Configuration**: environment and flag resolution ([`config`])
//! - **Output**: user-facing messages and terminal rendering ([`messages`], [`view`])
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasktrack::db::tasks::Tasks;
//! use tasktrack::libs::task::{Task, TaskQuery};
//!
//! let mut tasks = Tasks::open("tasks.db").unwrap();
//! tasks.add(&Task::new("Water the plants").with_priority(2)).unwrap();
//! let open = tasks.list(&TaskQuery::new()).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod messages;
pub mod task;
pub mod view;
