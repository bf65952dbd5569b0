pub mod aggregator;
pub mod filter;
pub mod presenter;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
