pub mod domain;
mod fixtures;
pub mod report;
pub mod resolver;

pub use domain::{CompetitorSelection, DashboardTab, TimeRangeKey};
pub use fixtures::{MarketFixtures, OverrideTable, PerformanceSeries};
pub use report::views::{DashboardView, InsightsBlock, StrategyDocument, TabView};
pub use report::{export_json, DashboardError, DashboardQuery};
