use market_scope::dashboard::{CompetitorSelection, DashboardTab, MarketFixtures, TimeRangeKey};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only catalogue shared by every dashboard request.
#[derive(Clone)]
pub(crate) struct DashboardState {
    pub(crate) fixtures: Arc<MarketFixtures>,
    pub(crate) default_time_range: TimeRangeKey,
}

impl DashboardState {
    pub(crate) fn new(default_time_range: TimeRangeKey) -> Self {
        Self {
            fixtures: Arc::new(MarketFixtures::standard()),
            default_time_range,
        }
    }

    pub(crate) fn time_range_or_default(&self, requested: Option<String>) -> String {
        requested
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.default_time_range.id().to_string())
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(TimeRangeKey::DEFAULT)
    }
}

pub(crate) fn parse_selection(raw: &str) -> Result<CompetitorSelection, Infallible> {
    Ok(CompetitorSelection::parse(raw))
}

pub(crate) fn parse_tab(raw: &str) -> Result<DashboardTab, Infallible> {
    Ok(DashboardTab::parse_or_overview(raw))
}

pub(crate) fn deserialize_selection<'de, D>(
    deserializer: D,
) -> Result<CompetitorSelection, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .as_deref()
        .map(CompetitorSelection::parse)
        .unwrap_or_default())
}

pub(crate) fn deserialize_optional_tab<'de, D>(
    deserializer: D,
) -> Result<Option<DashboardTab>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.as_deref().map(DashboardTab::parse_or_overview))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_time_range_uses_configured_default() {
        let state = DashboardState::new(TimeRangeKey::NinetyDays);
        assert_eq!(state.time_range_or_default(None), "90d");
        assert_eq!(state.time_range_or_default(Some(" ".to_string())), "90d");
        assert_eq!(state.time_range_or_default(Some("2w".to_string())), "2w");
    }

    #[test]
    fn cli_parsers_never_reject_input() {
        assert_eq!(parse_selection("all"), Ok(CompetitorSelection::All));
        assert_eq!(parse_tab("unknown"), Ok(DashboardTab::Overview));
        assert_eq!(parse_tab("Reviews"), Ok(DashboardTab::Reviews));
    }
}
