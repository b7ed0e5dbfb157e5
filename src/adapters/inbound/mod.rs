/// Inbound adapters - Drive the application from the terminal
mod console_menu;

pub use console_menu::ConsoleMenu;
