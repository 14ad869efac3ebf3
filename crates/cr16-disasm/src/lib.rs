pub mod listing;
pub mod model;

// Re-export commonly used types/functions for consumers
pub use listing::{build_listing, render_text, Entry};
pub use model::{load_image, parse_image, Image};
