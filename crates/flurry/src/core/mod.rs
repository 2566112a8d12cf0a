pub mod driver;
pub mod time;
