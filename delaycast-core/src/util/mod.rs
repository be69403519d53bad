pub mod date_deserialization_ops;
pub mod nearest_time;
pub mod time_ops;
