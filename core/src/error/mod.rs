#[allow(clippy::module_inception)]
pub mod error;
pub mod transport;

pub use error::{AnalyzeError, CliError, IntakeError};
pub use transport::{TransportError, TransportErrorKind};
