pub mod loader;

pub use loader::{BitmapLoader, parse_text_bitmap};
