//! Maps a (competitor selection, time range) pair onto the data each tab renders.
//!
//! Every operation is a pure function over the fixture catalogue. Unknown
//! competitor ids and time range ids never fail: they degrade to the aggregate
//! data, the 30 day series, or an empty competitor list.

use super::domain::{
    Competitor, CompetitorSelection, PerformancePoint, PriceColumn, PriceComparisonRow,
    TimeRangeKey, ALL_COMPETITORS_LABEL,
};
use super::fixtures::{OverrideTable, PerformanceSeries};
use serde::Serialize;
use std::collections::BTreeMap;

/// Whole-market figures the headline cards are scaled from.
pub const BASELINE: HeadlineMetrics = HeadlineMetrics {
    rating: 4.4,
    market_share: 53,
    sentiment_score: 79,
    seo_score: 88,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorFilter {
    pub competitors: Vec<Competitor>,
    pub is_aggregate: bool,
}

/// A series point after projection; `scores` is flattened into `competitorN` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformancePointView {
    pub month: &'static str,
    #[serde(flatten)]
    pub scores: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    pub rating: f64,
    pub market_share: u32,
    pub sentiment_score: u32,
    pub seo_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitorPriceRow {
    pub category: &'static str,
    pub price: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "rows", rename_all = "snake_case")]
pub enum PriceRowsView {
    Comparison(Vec<PriceComparisonRow>),
    Single(Vec<CompetitorPriceRow>),
}

impl PriceRowsView {
    pub fn len(&self) -> usize {
        match self {
            Self::Comparison(rows) => rows.len(),
            Self::Single(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn resolve_competitor_filter(
    selection: &CompetitorSelection,
    competitors: &[Competitor],
) -> CompetitorFilter {
    match selection.competitor_id() {
        None => CompetitorFilter {
            competitors: competitors.to_vec(),
            is_aggregate: true,
        },
        Some(id) => CompetitorFilter {
            competitors: competitors
                .iter()
                .find(|competitor| competitor.id == id)
                .cloned()
                .into_iter()
                .collect(),
            is_aggregate: false,
        },
    }
}

/// Projects every point to the selected competitor's column instead of dropping points.
pub fn resolve_performance_series(
    selection: &CompetitorSelection,
    time_range_id: &str,
    series: &PerformanceSeries,
) -> Vec<PerformancePointView> {
    let points = series.for_range(time_range_id);

    match selection.competitor_id() {
        None => points.iter().map(full_point).collect(),
        Some(id) => points
            .iter()
            .map(|point| PerformancePointView {
                month: point.month,
                scores: point
                    .score_for(id)
                    .map(|score| (format!("competitor{id}"), score))
                    .into_iter()
                    .collect(),
            })
            .collect(),
    }
}

fn full_point(point: &PerformancePoint) -> PerformancePointView {
    PerformancePointView {
        month: point.month,
        scores: point
            .scores
            .iter()
            .enumerate()
            .map(|(index, score)| (PerformancePoint::score_key(index), *score))
            .collect(),
    }
}

/// Multiplier for a raw time range id; unknown ids do not scale.
pub fn time_range_multiplier(time_range_id: &str) -> f64 {
    TimeRangeKey::parse(time_range_id).map_or(1.0, TimeRangeKey::multiplier)
}

/// The market baseline grown by the time range multiplier and rounded for display.
pub fn scaled_baseline(time_range_id: &str) -> HeadlineMetrics {
    let multiplier = time_range_multiplier(time_range_id);
    HeadlineMetrics {
        rating: round_to_tenth(BASELINE.rating * multiplier),
        market_share: round_whole(f64::from(BASELINE.market_share) * multiplier),
        sentiment_score: round_whole(f64::from(BASELINE.sentiment_score) * multiplier),
        seo_score: round_whole(f64::from(BASELINE.seo_score) * multiplier),
    }
}

pub fn resolve_headline_metrics(
    selection: &CompetitorSelection,
    time_range_id: &str,
    competitors: &[Competitor],
) -> HeadlineMetrics {
    let scaled = scaled_baseline(time_range_id);

    let competitor = selection
        .competitor_id()
        .and_then(|id| competitors.iter().find(|competitor| competitor.id == id));

    match competitor {
        None => scaled,
        Some(competitor) => HeadlineMetrics {
            rating: round_to_tenth(competitor.rating * (scaled.rating / BASELINE.rating)),
            market_share: round_whole(
                competitor.market_share
                    * ratio(scaled.market_share, BASELINE.market_share),
            ),
            sentiment_score: round_whole(
                competitor.sentiment_score
                    * ratio(scaled.sentiment_score, BASELINE.sentiment_score),
            ),
            seo_score: round_whole(
                competitor.seo_score * ratio(scaled.seo_score, BASELINE.seo_score),
            ),
        },
    }
}

/// Review topics, marketing channels and financial radar data all resolve through here.
pub fn resolve_override_table<'a, T>(
    selection: &CompetitorSelection,
    global: &'a [T],
    overrides: &'a OverrideTable<T>,
) -> &'a [T] {
    selection
        .competitor_id()
        .and_then(|id| overrides.get(id))
        .map_or(global, Vec::as_slice)
}

pub fn resolve_price_rows(
    selection: &CompetitorSelection,
    price_table: &[PriceComparisonRow],
) -> PriceRowsView {
    match selection.competitor_id() {
        None => PriceRowsView::Comparison(price_table.to_vec()),
        Some(id) => {
            let column = PriceColumn::for_competitor(id);
            PriceRowsView::Single(
                price_table
                    .iter()
                    .map(|row| CompetitorPriceRow {
                        category: row.category,
                        price: column.map(|column| row.price(column)),
                    })
                    .collect(),
            )
        }
    }
}

/// Display name for a selection; the aggregate label covers "all" and unknown ids.
pub fn competitor_name(
    selection: &CompetitorSelection,
    competitors: &[Competitor],
) -> &'static str {
    selection
        .competitor_id()
        .and_then(|id| competitors.iter().find(|competitor| competitor.id == id))
        .map_or(ALL_COMPETITORS_LABEL, |competitor| competitor.name)
}

fn ratio(scaled: u32, base: u32) -> f64 {
    f64::from(scaled) / f64::from(base)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round_whole(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
