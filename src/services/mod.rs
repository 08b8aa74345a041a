pub mod console;
pub mod server;
