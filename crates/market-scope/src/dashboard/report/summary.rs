use super::super::domain::{CompetitorSelection, DashboardTab, TimeRangeKey};
use super::super::fixtures::MarketFixtures;
use super::super::resolver::{
    competitor_name, resolve_competitor_filter, resolve_headline_metrics,
    resolve_override_table, resolve_performance_series, resolve_price_rows,
};
use super::insights::{
    financial_insights, full_strategy, marketing_insights, overview_insights, pricing_insights,
    review_insights, technical_insights,
};
use super::views::{
    DashboardView, FinancialView, MarketingView, OverviewView, PricingView, ReviewsView,
    StrategyDocument, TabView, TechnicalView,
};
use tracing::debug;

/// The pair every view is resolved for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub selection: CompetitorSelection,
    pub time_range: String,
}

impl DashboardQuery {
    pub fn new(selection: impl Into<CompetitorSelection>, time_range: impl Into<String>) -> Self {
        Self {
            selection: selection.into(),
            time_range: time_range.into(),
        }
    }
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self::new(CompetitorSelection::All, TimeRangeKey::DEFAULT.id())
    }
}

impl MarketFixtures {
    pub fn overview(&self, query: &DashboardQuery) -> OverviewView {
        let filter = resolve_competitor_filter(&query.selection, &self.competitors);
        OverviewView {
            headline: resolve_headline_metrics(
                &query.selection,
                &query.time_range,
                &self.competitors,
            ),
            performance: resolve_performance_series(
                &query.selection,
                &query.time_range,
                &self.performance,
            ),
            competitors: filter.competitors,
            is_aggregate: filter.is_aggregate,
            insights: overview_insights(&self.competitors, &query.selection, &query.time_range),
        }
    }

    pub fn technical(&self, query: &DashboardQuery) -> TechnicalView {
        TechnicalView {
            competitors: resolve_competitor_filter(&query.selection, &self.competitors).competitors,
            seo_metrics: self.seo_metrics.clone(),
            insights: technical_insights(&self.competitors, &query.selection),
        }
    }

    pub fn reviews(&self, query: &DashboardQuery) -> ReviewsView {
        ReviewsView {
            sentiment: self.sentiment.clone(),
            topics: resolve_override_table(
                &query.selection,
                &self.review_topics,
                &self.review_overrides,
            )
            .to_vec(),
            insights: review_insights(&self.competitors, &query.selection),
        }
    }

    pub fn financial(&self, query: &DashboardQuery) -> FinancialView {
        let filter = resolve_competitor_filter(&query.selection, &self.competitors);
        let insights = financial_insights(&filter.competitors, &query.selection);
        FinancialView {
            competitors: filter.competitors,
            metrics: resolve_override_table(
                &query.selection,
                &self.financial_metrics,
                &self.financial_overrides,
            )
            .to_vec(),
            performance: resolve_performance_series(
                &query.selection,
                &query.time_range,
                &self.performance,
            ),
            insights,
        }
    }

    pub fn marketing(&self, query: &DashboardQuery) -> MarketingView {
        let channels = resolve_override_table(
            &query.selection,
            &self.marketing_channels,
            &self.marketing_overrides,
        );
        MarketingView {
            insights: marketing_insights(&self.competitors, &query.selection, channels),
            channels: channels.to_vec(),
        }
    }

    pub fn pricing(&self, query: &DashboardQuery) -> PricingView {
        PricingView {
            prices: resolve_price_rows(&query.selection, &self.price_comparison),
            insights: pricing_insights(&self.competitors, &query.selection),
        }
    }

    pub fn tab(&self, tab: DashboardTab, query: &DashboardQuery) -> TabView {
        match tab {
            DashboardTab::Overview => TabView::Overview(self.overview(query)),
            DashboardTab::Technical => TabView::Technical(self.technical(query)),
            DashboardTab::Reviews => TabView::Reviews(self.reviews(query)),
            DashboardTab::Financial => TabView::Financial(self.financial(query)),
            DashboardTab::Marketing => TabView::Marketing(self.marketing(query)),
            DashboardTab::Pricing => TabView::Pricing(self.pricing(query)),
        }
    }

    pub fn dashboard(&self, query: &DashboardQuery) -> DashboardView {
        let resolved_range = TimeRangeKey::parse(&query.time_range).map(TimeRangeKey::range);
        debug!(
            selection = %query.selection,
            time_range = %query.time_range,
            known_range = resolved_range.is_some(),
            "resolving dashboard view"
        );

        DashboardView {
            selection: query.selection.clone(),
            competitor_name: competitor_name(&query.selection, &self.competitors),
            time_range: query.time_range.clone(),
            resolved_range,
            overview: self.overview(query),
            technical: self.technical(query),
            reviews: self.reviews(query),
            financial: self.financial(query),
            marketing: self.marketing(query),
            pricing: self.pricing(query),
        }
    }

    /// The strategy narrative; it always looks at the 90 day window.
    pub fn strategy(&self, selection: &CompetitorSelection) -> StrategyDocument {
        let query = DashboardQuery::new(selection.clone(), TimeRangeKey::NinetyDays.id());
        let tabs: Vec<TabView> = DashboardTab::ordered()
            .into_iter()
            .map(|tab| self.tab(tab, &query))
            .collect();
        let tab_insights: Vec<_> = tabs.iter().map(|view| (view.tab(), view.insights())).collect();

        full_strategy(&self.competitors, selection, &tab_insights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::resolver::PriceRowsView;

    #[test]
    fn default_query_is_aggregate_thirty_days() {
        let query = DashboardQuery::default();
        assert!(query.selection.is_all());
        assert_eq!(query.time_range, "30d");
    }

    #[test]
    fn dashboard_for_single_competitor_narrows_every_tab() {
        let fixtures = MarketFixtures::standard();
        let view = fixtures.dashboard(&DashboardQuery::new("2", "7d"));

        assert_eq!(view.competitor_name, "Теремок");
        assert_eq!(view.resolved_range.map(|range| range.days), Some(7));
        assert!(!view.overview.is_aggregate);
        assert_eq!(view.overview.competitors.len(), 1);
        assert_eq!(view.overview.performance.len(), 7);
        assert_eq!(view.technical.competitors[0].id, "2");
        assert_eq!(view.reviews.topics, fixtures.review_overrides["2"]);
        assert_eq!(view.financial.metrics, fixtures.financial_overrides["2"]);
        assert_eq!(view.marketing.channels, fixtures.marketing_overrides["2"]);
        assert!(matches!(view.pricing.prices, PriceRowsView::Single(_)));
    }

    #[test]
    fn financial_forecast_follows_the_overview_series() {
        let fixtures = MarketFixtures::standard();
        let view = fixtures.dashboard(&DashboardQuery::new("2", "7d"));

        assert_eq!(view.financial.performance, view.overview.performance);
        assert_eq!(view.financial.performance.len(), 7);
        assert!(view
            .financial
            .performance
            .iter()
            .all(|point| point.scores.keys().eq(["competitor2"])));
    }

    #[test]
    fn dashboard_for_unknown_keys_degrades_quietly() {
        let fixtures = MarketFixtures::standard();
        let view = fixtures.dashboard(&DashboardQuery::new("99", "5y"));

        assert_eq!(view.competitor_name, "Все конкуренты");
        assert!(view.resolved_range.is_none());
        assert!(view.overview.competitors.is_empty());
        assert_eq!(view.overview.performance.len(), 4);
        assert_eq!(view.reviews.topics, fixtures.review_topics);
        assert_eq!(view.financial.metrics, fixtures.financial_metrics);
        assert_eq!(
            view.financial.insights.insights[0],
            "Недостаточно данных для анализа выбранного конкурента"
        );
    }

    #[test]
    fn tab_dispatch_matches_dashboard_sections() {
        let fixtures = MarketFixtures::standard();
        let query = DashboardQuery::new("all", "1y");
        let view = fixtures.dashboard(&query);

        for tab in DashboardTab::ordered() {
            assert_eq!(fixtures.tab(tab, &query).tab(), tab);
        }
        assert_eq!(
            fixtures.tab(DashboardTab::Pricing, &query),
            TabView::Pricing(view.pricing.clone())
        );
        assert_eq!(view, fixtures.dashboard(&query));
    }

    #[test]
    fn strategy_collects_a_highlight_per_tab() {
        let fixtures = MarketFixtures::standard();
        let strategy = fixtures.strategy(&CompetitorSelection::All);
        assert_eq!(strategy.highlights.len(), 6);
        assert!(strategy.executive_summary.contains("Вкусно и точка"));
        assert!(strategy.executive_summary.ends_with("улучшении конкурентных позиций."));
    }
}
