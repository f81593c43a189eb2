mod export;
mod insights;
mod summary;
pub mod views;

pub use export::{export_json, DashboardError};
pub use insights::{
    financial_insights, full_strategy, marketing_insights, overview_insights, pricing_insights,
    review_insights, technical_insights,
};
pub use summary::DashboardQuery;
