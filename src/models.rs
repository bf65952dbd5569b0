pub mod olist;
pub mod dataset;
pub mod dashboard;
