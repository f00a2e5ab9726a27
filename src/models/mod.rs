// Models module for data structures
pub mod project_index;
pub mod project_record;
pub mod sync_report;
