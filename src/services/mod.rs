pub mod aggregation_service;
pub mod calendar_service;
pub mod chart_axis;
pub mod format;
pub mod pagination;
pub mod record_cache;
pub mod statement_service;
