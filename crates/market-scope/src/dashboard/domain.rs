use serde::{Serialize, Serializer};
use std::fmt;

/// Selection value meaning "no competitor filter".
pub const ALL_COMPETITORS: &str = "all";

/// Label shown when the aggregate view is selected or the id is unknown.
pub const ALL_COMPETITORS_LABEL: &str = "Все конкуренты";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Competitor {
    pub id: &'static str,
    pub name: &'static str,
    pub website: &'static str,
    pub rating: f64,
    pub market_share: f64,
    pub sentiment_score: f64,
    pub financial_health: f64,
    pub price_index: f64,
    pub seo_score: f64,
    pub load_time: f64,
    pub review_count: u32,
}

/// Either the aggregate view or a single competitor id.
///
/// Ids are not validated here: an unknown id is a legal selection that the
/// resolver degrades gracefully on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CompetitorSelection {
    #[default]
    All,
    Competitor(String),
}

impl CompetitorSelection {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == ALL_COMPETITORS {
            Self::All
        } else {
            Self::Competitor(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn competitor_id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Competitor(id) => Some(id),
        }
    }

    pub fn as_str(&self) -> &str {
        self.competitor_id().unwrap_or(ALL_COMPETITORS)
    }
}

impl From<&str> for CompetitorSelection {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for CompetitorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CompetitorSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeRangeKey {
    SevenDays,
    ThirtyDays,
    NinetyDays,
    OneYear,
}

impl TimeRangeKey {
    pub const DEFAULT: Self = Self::ThirtyDays;

    pub const fn ordered() -> [Self; 4] {
        [
            Self::SevenDays,
            Self::ThirtyDays,
            Self::NinetyDays,
            Self::OneYear,
        ]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "7d" => Some(Self::SevenDays),
            "30d" => Some(Self::ThirtyDays),
            "90d" => Some(Self::NinetyDays),
            "1y" => Some(Self::OneYear),
            _ => None,
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
            Self::NinetyDays => "90d",
            Self::OneYear => "1y",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SevenDays => "7 дней",
            Self::ThirtyDays => "30 дней",
            Self::NinetyDays => "90 дней",
            Self::OneYear => "1 год",
        }
    }

    pub const fn days(self) -> u32 {
        match self {
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
            Self::NinetyDays => 90,
            Self::OneYear => 365,
        }
    }

    /// Growth applied to the market baseline for this observation window.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::SevenDays => 1.0,
            Self::ThirtyDays => 1.02,
            Self::NinetyDays => 1.05,
            Self::OneYear => 1.10,
        }
    }

    pub const fn range(self) -> TimeRange {
        TimeRange {
            id: self.id(),
            label: self.label(),
            days: self.days(),
        }
    }
}

impl Serialize for TimeRangeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub id: &'static str,
    pub label: &'static str,
    pub days: u32,
}

/// One curated point of a performance series; `scores[n]` belongs to competitor `n + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformancePoint {
    pub month: &'static str,
    pub scores: [u32; 4],
}

impl PerformancePoint {
    pub fn score_key(index: usize) -> String {
        format!("competitor{}", index + 1)
    }

    /// Score for a competitor id, when the id names one of the series columns.
    pub fn score_for(&self, competitor_id: &str) -> Option<u32> {
        let index = match competitor_id {
            "1" => 0,
            "2" => 1,
            "3" => 2,
            "4" => 3,
            _ => return None,
        };
        self.scores.get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoMetric {
    pub metric: &'static str,
    pub current: f64,
    pub optimal: f64,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewTopic {
    pub topic: &'static str,
    pub positive: u32,
    pub negative: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketingChannel {
    pub channel: &'static str,
    pub reach: u32,
    pub engagement: f64,
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialMetric {
    pub metric: &'static str,
    pub value: u32,
    pub benchmark: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentSlice {
    pub name: &'static str,
    pub value: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceComparisonRow {
    pub category: &'static str,
    pub comp1: u32,
    pub comp2: u32,
    pub comp3: u32,
    pub comp4: u32,
}

impl PriceComparisonRow {
    pub fn price(&self, column: PriceColumn) -> u32 {
        match column {
            PriceColumn::Comp1 => self.comp1,
            PriceColumn::Comp2 => self.comp2,
            PriceColumn::Comp3 => self.comp3,
            PriceColumn::Comp4 => self.comp4,
        }
    }
}

/// Explicit mapping between competitor ids and price table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceColumn {
    Comp1,
    Comp2,
    Comp3,
    Comp4,
}

impl PriceColumn {
    pub fn for_competitor(competitor_id: &str) -> Option<Self> {
        match competitor_id {
            "1" => Some(Self::Comp1),
            "2" => Some(Self::Comp2),
            "3" => Some(Self::Comp3),
            "4" => Some(Self::Comp4),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    Overview,
    Technical,
    Reviews,
    Financial,
    Marketing,
    Pricing,
}

impl DashboardTab {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Overview,
            Self::Technical,
            Self::Reviews,
            Self::Financial,
            Self::Marketing,
            Self::Pricing,
        ]
    }

    /// Unknown tab ids land on the overview, matching the dashboard navigation.
    pub fn parse_or_overview(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "technical" => Self::Technical,
            "reviews" => Self::Reviews,
            "financial" => Self::Financial,
            "marketing" => Self::Marketing,
            "pricing" => Self::Pricing,
            _ => Self::Overview,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Обзор",
            Self::Technical => "Технический анализ",
            Self::Reviews => "Анализ отзывов",
            Self::Financial => "Финансовый анализ",
            Self::Marketing => "Маркетинговый анализ",
            Self::Pricing => "Ценовой анализ",
        }
    }
}
