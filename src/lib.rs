//! Single-user TODO list served over HTTP, persisted as a JSON file
//!
//! The file on disk is the sole unit of durable state: every request
//! performs a full load -> mutate -> persist cycle against it, guarded
//! by an in-process mutex so concurrent mutations cannot lose updates.
//! Writes go through a temp-file-and-rename so a crash mid-write cannot
//! corrupt the file.
//!
//! ## HTTP surface
//!
//! - `GET /` — plain-text greeting (liveness probe)
//! - `GET /todo` — all tasks, wrapped in `{results, date, total_results}`
//! - `POST /todo` — create a task from `{"task": "..."}`; 201
//! - `GET /todo/{n}` — single task at 1-based position `n`
//! - `PATCH /todo/{n}?complete` — mark complete; 204
//! - `DELETE /todo/{n}` — delete and renumber; 204
//!
//! ## Basic Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_server::{server, TodoStorage};
//!
//! # async fn example() -> todo_server::Result<()> {
//! let storage = Arc::new(TodoStorage::new("todoServer.json"));
//!
//! // Bind a random port and serve in the background
//! let (addr, handle) = server::start_server(storage, "127.0.0.1:0").await?;
//! println!("listening on {addr}");
//!
//! // Shutdown when done
//! handle.abort();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod server;
pub mod storage;
pub mod types;

// Re-exports
pub use error::{Result, TodoError};
pub use server::{router, start_server, TodoResponse};
pub use storage::TodoStorage;
pub use types::{Task, TaskList};
