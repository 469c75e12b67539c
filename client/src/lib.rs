pub mod api;
pub mod clipboard;
pub mod controller;
pub mod error;
pub mod health;
pub mod model;
pub mod render;
pub mod runtime;
pub mod validate;

pub use api::ClassifierClient;
pub use controller::{Controller, Effect, Event, Notice, NoticeLevel, Snapshot, ViewState};
pub use error::{ClientError, ClientErrorType, ValidationError};
pub use model::{Category, ClassificationRequest, ClassificationResult, ServiceStatus};
pub use render::{Band, ResultView, sanitize_terminal};
pub use runtime::{Frontend, Runtime, RuntimeConfig};
pub use validate::{FileRef, validate_file_selection, validate_text_submission};
