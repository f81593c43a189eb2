use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("unable to export dashboard view: {0}")]
    Export(#[from] serde_json::Error),
}

/// Pretty JSON for any resolved view, as written by the CLI `--json` flag.
pub fn export_json<T: Serialize>(view: &T) -> Result<String, DashboardError> {
    Ok(serde_json::to_string_pretty(view)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{DashboardQuery, MarketFixtures};
    use serde_json::Value;

    #[test]
    fn export_keeps_view_shape() {
        let fixtures = MarketFixtures::standard();
        let view = fixtures.dashboard(&DashboardQuery::new("3", "1y"));
        let json = export_json(&view).expect("view exports");
        let value: Value = serde_json::from_str(&json).expect("export is valid json");

        assert_eq!(value["selection"], "3");
        assert_eq!(value["resolved_range"]["label"], "1 год");
        assert_eq!(value["pricing"]["prices"]["mode"], "single");
        assert_eq!(value["pricing"]["prices"]["rows"][0]["price"], 480);
        assert_eq!(value["overview"]["performance"][11]["competitor3"], 93);
    }

    #[test]
    fn export_omits_unknown_range_details() {
        let fixtures = MarketFixtures::standard();
        let view = fixtures.dashboard(&DashboardQuery::new("all", "forever"));
        let value: Value =
            serde_json::from_str(&export_json(&view).expect("view exports")).expect("valid json");

        assert!(value.get("resolved_range").is_none());
        assert_eq!(value["time_range"], "forever");
        assert_eq!(value["pricing"]["prices"]["mode"], "comparison");
        assert_eq!(value["overview"]["headline"]["market_share"], 53);
    }
}
