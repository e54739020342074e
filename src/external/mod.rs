pub mod file_source;
pub mod realtime_db;
pub mod record_source;
