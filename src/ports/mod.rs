/// Ports: the seams between the inventory core and the outside world
///
/// Inbound ports are driven by the CLI and the menu; outbound ports are
/// implemented by the Sheets API, OAuth, XLSX and console adapters.
pub mod inbound;
pub mod outbound;
