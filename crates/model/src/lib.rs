pub mod booking;
pub mod decimal;
pub mod errors;
pub mod statistics;

pub mod rooms;
