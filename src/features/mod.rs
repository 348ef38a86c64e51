pub mod browse;
pub mod sessions;
pub mod uploads;
