/// Shared helpers for integration tests
pub mod fake_sheets_server;
pub mod mocks;
