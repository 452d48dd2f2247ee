pub mod constants;
pub mod frame;
pub mod scenario;
pub mod settings;
