//! Page Pipeline
//!
//! Everything that sequences work over time, and the mount that wires it
//! to the document.
//!
//! ```text
//! load event → LoaderSequencer → PageHost (hide, scroll, animations, typing)
//!                    │
//!                    └── Scheduler (timeouts, animation frames)
//! ```
//!
//! - **scheduler** - The `Scheduler` seam and a virtual clock for tests
//! - **loader** - Loader overlay reveal sequence
//! - **mount** - `PageController`: listeners, observers and reactive effects

pub mod loader;
pub mod mount;
pub mod scheduler;

// Re-exports
pub use loader::{LoaderPhase, LoaderSequencer, PageHost};
pub use mount::{mount, page, start, PageController};
pub use scheduler::{Scheduler, SharedScheduler, Task, VirtualScheduler};
