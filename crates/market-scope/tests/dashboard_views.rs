use market_scope::dashboard::resolver::PriceRowsView;
use market_scope::dashboard::{
    export_json, CompetitorSelection, DashboardQuery, DashboardTab, MarketFixtures, TabView,
};

#[test]
fn aggregate_dashboard_shows_the_whole_market() {
    let fixtures = MarketFixtures::standard();
    let view = fixtures.dashboard(&DashboardQuery::default());

    assert_eq!(view.competitor_name, "Все конкуренты");
    assert!(view.overview.is_aggregate);
    assert_eq!(view.overview.competitors.len(), 4);
    assert_eq!(view.overview.headline.rating, 4.5);
    assert_eq!(view.overview.headline.market_share, 54);
    let sentiment_total: u32 = view.reviews.sentiment.iter().map(|slice| slice.value).sum();
    assert_eq!(sentiment_total, 100);
    assert_eq!(view.reviews.topics, fixtures.review_topics);
    assert_eq!(view.marketing.channels, fixtures.marketing_channels);
    assert_eq!(view.financial.metrics, fixtures.financial_metrics);
    assert!(matches!(
        view.pricing.prices,
        PriceRowsView::Comparison(ref rows) if rows.len() == 5
    ));
}

#[test]
fn every_tab_carries_insights_and_actions() {
    let fixtures = MarketFixtures::standard();

    for selection in ["all", "1", "2", "3", "4"] {
        let query = DashboardQuery::new(selection, "90d");
        for tab in DashboardTab::ordered() {
            let view = fixtures.tab(tab, &query);
            assert!(
                !view.insights().insights.is_empty(),
                "{} insights for {selection}",
                tab.label()
            );
            assert!(
                !view.insights().strategy.is_empty(),
                "{} actions for {selection}",
                tab.label()
            );
        }
    }
}

#[test]
fn override_ids_cover_every_competitor() {
    let fixtures = MarketFixtures::standard();

    for competitor in &fixtures.competitors {
        assert!(fixtures.review_overrides.contains_key(competitor.id));
        assert!(fixtures.marketing_overrides.contains_key(competitor.id));
        assert!(fixtures.financial_overrides.contains_key(competitor.id));
    }
}

#[test]
fn single_competitor_marketing_uses_its_own_channels() {
    let fixtures = MarketFixtures::standard();
    let TabView::Marketing(view) =
        fixtures.tab(DashboardTab::Marketing, &DashboardQuery::new("3", "7d"))
    else {
        panic!("expected the marketing tab");
    };

    assert_eq!(view.channels, fixtures.marketing_overrides["3"]);
    assert!(view.insights.insights[0].starts_with("Шоколадница"));
}

#[test]
fn strategy_focuses_on_the_first_competitor_for_the_aggregate() {
    let fixtures = MarketFixtures::standard();
    let aggregate = fixtures.strategy(&CompetitorSelection::All);
    let first = fixtures.strategy(&CompetitorSelection::parse("1"));

    assert_eq!(aggregate.executive_summary, first.executive_summary);
    assert!(aggregate.executive_summary.contains("4 ключевых конкурентов"));
    assert!(!aggregate.key_opportunities.is_empty());
    assert!(!aggregate.strategic_initiatives.is_empty());
    assert!(!aggregate.kpis.is_empty());
    assert!(!aggregate.timeline.is_empty());
}

#[test]
fn strategy_exports_with_tab_highlights() {
    let fixtures = MarketFixtures::standard();
    let strategy = fixtures.strategy(&CompetitorSelection::parse("4"));
    let json = export_json(&strategy).expect("strategy exports");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    let tabs: Vec<&str> = value["highlights"]
        .as_array()
        .expect("highlights listed")
        .iter()
        .filter_map(|highlight| highlight["tab"].as_str())
        .collect();
    assert_eq!(
        tabs,
        vec!["overview", "technical", "reviews", "financial", "marketing", "pricing"]
    );
    assert!(value["executive_summary"]
        .as_str()
        .expect("summary is text")
        .contains("Кофемания"));
}
