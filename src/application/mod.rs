/// Application layer - Use cases and DTOs
///
/// This layer orchestrates the inventory domain through the ports.
pub mod dto;
pub mod use_cases;
