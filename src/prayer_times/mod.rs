pub mod countdown;
pub mod loader;
pub mod mock;
pub mod resolver;

pub use countdown::live_countdown;
pub use loader::{load_weekly, next_prayer};
pub use resolver::resolve;
