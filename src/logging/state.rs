use once_cell::sync::{Lazy, OnceCell};
use std::sync::{Mutex, Once};
use tracing_appender::non_blocking::WorkerGuard;

// Held until shutdown() so buffered file lines are flushed before exit
pub static LOG_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));
pub static INIT_ONCE: Once = Once::new();
pub static INIT_ERROR: OnceCell<String> = OnceCell::new();
