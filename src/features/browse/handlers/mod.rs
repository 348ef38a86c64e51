mod browse_handler;
mod notify_handler;
pub mod ui_handler;

pub use browse_handler::*;
pub use notify_handler::*;
