use super::super::domain::{
    Competitor, CompetitorSelection, DashboardTab, FinancialMetric, MarketingChannel,
    ReviewTopic, SentimentSlice, SeoMetric, TimeRange,
};
use super::super::resolver::{HeadlineMetrics, PerformancePointView, PriceRowsView};
use serde::Serialize;

/// Observations and recommended actions shown under every tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InsightsBlock {
    pub insights: Vec<String>,
    pub strategy: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub headline: HeadlineMetrics,
    pub performance: Vec<PerformancePointView>,
    pub competitors: Vec<Competitor>,
    pub is_aggregate: bool,
    pub insights: InsightsBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalView {
    pub competitors: Vec<Competitor>,
    pub seo_metrics: Vec<SeoMetric>,
    pub insights: InsightsBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewsView {
    pub sentiment: Vec<SentimentSlice>,
    pub topics: Vec<ReviewTopic>,
    pub insights: InsightsBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialView {
    pub competitors: Vec<Competitor>,
    pub metrics: Vec<FinancialMetric>,
    /// Revenue forecast chart; the same projected series the overview plots.
    pub performance: Vec<PerformancePointView>,
    pub insights: InsightsBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketingView {
    pub channels: Vec<MarketingChannel>,
    pub insights: InsightsBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingView {
    pub prices: PriceRowsView,
    pub insights: InsightsBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tab", rename_all = "snake_case")]
pub enum TabView {
    Overview(OverviewView),
    Technical(TechnicalView),
    Reviews(ReviewsView),
    Financial(FinancialView),
    Marketing(MarketingView),
    Pricing(PricingView),
}

impl TabView {
    pub fn tab(&self) -> DashboardTab {
        match self {
            Self::Overview(_) => DashboardTab::Overview,
            Self::Technical(_) => DashboardTab::Technical,
            Self::Reviews(_) => DashboardTab::Reviews,
            Self::Financial(_) => DashboardTab::Financial,
            Self::Marketing(_) => DashboardTab::Marketing,
            Self::Pricing(_) => DashboardTab::Pricing,
        }
    }

    pub fn insights(&self) -> &InsightsBlock {
        match self {
            Self::Overview(view) => &view.insights,
            Self::Technical(view) => &view.insights,
            Self::Reviews(view) => &view.insights,
            Self::Financial(view) => &view.insights,
            Self::Marketing(view) => &view.insights,
            Self::Pricing(view) => &view.insights,
        }
    }
}

/// Every tab resolved for one (selection, time range) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: CompetitorSelection,
    pub competitor_name: &'static str,
    pub time_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_range: Option<TimeRange>,
    pub overview: OverviewView,
    pub technical: TechnicalView,
    pub reviews: ReviewsView,
    pub financial: FinancialView,
    pub marketing: MarketingView,
    pub pricing: PricingView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategicInitiative {
    pub area: &'static str,
    pub initiatives: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePhase {
    pub phase: &'static str,
    pub tasks: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabHighlight {
    pub tab: DashboardTab,
    pub tab_label: &'static str,
    pub insight: String,
}

/// The long-form strategy narrative built from all tab insights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyDocument {
    pub executive_summary: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<TabHighlight>,
    pub key_opportunities: Vec<&'static str>,
    pub strategic_initiatives: Vec<StrategicInitiative>,
    pub kpis: Vec<&'static str>,
    pub timeline: Vec<TimelinePhase>,
}
