pub mod config;
pub mod delivery;
pub mod dispatcher;
pub mod error;
pub mod formatters;
pub mod payload;
pub mod text;
pub mod utils;

pub use config::{AppConfig, OutputMode, Palette};
pub use dispatcher::{Dispatcher, EventKind};
pub use error::FormatError;
pub use formatters::{Attachment, Formatter, Notification};
