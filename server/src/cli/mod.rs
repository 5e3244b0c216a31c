pub mod database_migration;
pub mod print_report;
