/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (CLI, menu)
/// use to interact with the application core.
pub mod sheets_application_port;

pub use sheets_application_port::{RowWriteOutcome, SheetsApplicationPort};
