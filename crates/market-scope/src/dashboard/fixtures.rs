use super::domain::{
    Competitor, FinancialMetric, MarketingChannel, PerformancePoint, PriceComparisonRow,
    ReviewTopic, SentimentSlice, SeoMetric, TimeRange, TimeRangeKey,
};
use std::collections::{BTreeMap, HashMap};

/// Per-competitor replacements for a tab fixture, keyed by `Competitor::id`.
pub type OverrideTable<T> = BTreeMap<&'static str, Vec<T>>;

/// Curated performance points per time range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceSeries {
    series: HashMap<TimeRangeKey, Vec<PerformancePoint>>,
}

impl PerformanceSeries {
    pub fn new(series: HashMap<TimeRangeKey, Vec<PerformancePoint>>) -> Self {
        Self { series }
    }

    pub fn get(&self, key: TimeRangeKey) -> Option<&[PerformancePoint]> {
        self.series.get(&key).map(Vec::as_slice)
    }

    /// Points for a raw time range id; unknown or missing ranges use the 30 day series.
    pub fn for_range(&self, time_range_id: &str) -> &[PerformancePoint] {
        TimeRangeKey::parse(time_range_id)
            .and_then(|key| self.get(key))
            .or_else(|| self.get(TimeRangeKey::DEFAULT))
            .unwrap_or(&[])
    }
}

/// The static data set every dashboard tab is resolved from.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketFixtures {
    pub competitors: Vec<Competitor>,
    pub time_ranges: Vec<TimeRange>,
    pub performance: PerformanceSeries,
    pub seo_metrics: Vec<SeoMetric>,
    pub sentiment: Vec<SentimentSlice>,
    pub review_topics: Vec<ReviewTopic>,
    pub review_overrides: OverrideTable<ReviewTopic>,
    pub marketing_channels: Vec<MarketingChannel>,
    pub marketing_overrides: OverrideTable<MarketingChannel>,
    pub financial_metrics: Vec<FinancialMetric>,
    pub financial_overrides: OverrideTable<FinancialMetric>,
    pub price_comparison: Vec<PriceComparisonRow>,
}

impl MarketFixtures {
    pub fn standard() -> Self {
        Self {
            competitors: standard_competitors(),
            time_ranges: TimeRangeKey::ordered()
                .into_iter()
                .map(TimeRangeKey::range)
                .collect(),
            performance: standard_performance(),
            seo_metrics: standard_seo_metrics(),
            sentiment: standard_sentiment(),
            review_topics: standard_review_topics(),
            review_overrides: review_overrides(),
            marketing_channels: standard_marketing_channels(),
            marketing_overrides: marketing_overrides(),
            financial_metrics: standard_financial_metrics(),
            financial_overrides: financial_overrides(),
            price_comparison: standard_price_comparison(),
        }
    }

    pub fn competitor(&self, id: &str) -> Option<&Competitor> {
        self.competitors.iter().find(|competitor| competitor.id == id)
    }
}

fn standard_competitors() -> Vec<Competitor> {
    vec![
        Competitor {
            id: "1",
            name: "Вкусно и точка",
            website: "vkusnoitochka.ru",
            rating: 4.2,
            market_share: 18.0,
            sentiment_score: 72.0,
            financial_health: 85.0,
            price_index: 95.0,
            seo_score: 88.0,
            load_time: 2.3,
            review_count: 15_420,
        },
        Competitor {
            id: "2",
            name: "Теремок",
            website: "teremok.ru",
            rating: 4.5,
            market_share: 12.0,
            sentiment_score: 81.0,
            financial_health: 78.0,
            price_index: 102.0,
            seo_score: 92.0,
            load_time: 1.8,
            review_count: 12_350,
        },
        Competitor {
            id: "3",
            name: "Шоколадница",
            website: "shoko.ru",
            rating: 4.3,
            market_share: 15.0,
            sentiment_score: 76.0,
            financial_health: 82.0,
            price_index: 110.0,
            seo_score: 85.0,
            load_time: 2.1,
            review_count: 18_900,
        },
        Competitor {
            id: "4",
            name: "Кофемания",
            website: "coffeemania.ru",
            rating: 4.6,
            market_share: 8.0,
            sentiment_score: 88.0,
            financial_health: 90.0,
            price_index: 125.0,
            seo_score: 90.0,
            load_time: 1.5,
            review_count: 8_750,
        },
    ]
}

fn points(rows: &[(&'static str, [u32; 4])]) -> Vec<PerformancePoint> {
    rows.iter()
        .map(|(month, scores)| PerformancePoint {
            month: *month,
            scores: *scores,
        })
        .collect()
}

fn standard_performance() -> PerformanceSeries {
    let mut series = HashMap::new();
    series.insert(
        TimeRangeKey::SevenDays,
        points(&[
            ("Пн", [85, 78, 82, 90]),
            ("Вт", [87, 80, 84, 88]),
            ("Ср", [86, 82, 85, 91]),
            ("Чт", [88, 85, 83, 92]),
            ("Пт", [90, 87, 86, 93]),
            ("Сб", [92, 88, 88, 94]),
            ("Вс", [91, 89, 87, 95]),
        ]),
    );
    series.insert(
        TimeRangeKey::ThirtyDays,
        points(&[
            ("Неделя 1", [85, 78, 82, 90]),
            ("Неделя 2", [87, 80, 84, 88]),
            ("Неделя 3", [86, 82, 85, 91]),
            ("Неделя 4", [88, 85, 83, 92]),
        ]),
    );
    series.insert(
        TimeRangeKey::NinetyDays,
        points(&[
            ("Янв", [85, 78, 82, 90]),
            ("Фев", [87, 80, 84, 88]),
            ("Мар", [86, 82, 85, 91]),
        ]),
    );
    series.insert(
        TimeRangeKey::OneYear,
        points(&[
            ("Янв", [85, 78, 82, 90]),
            ("Фев", [87, 80, 84, 88]),
            ("Мар", [86, 82, 85, 91]),
            ("Апр", [88, 85, 83, 92]),
            ("Май", [90, 87, 86, 93]),
            ("Июн", [92, 88, 88, 94]),
            ("Июл", [91, 89, 87, 95]),
            ("Авг", [93, 90, 89, 96]),
            ("Сен", [94, 91, 90, 97]),
            ("Окт", [95, 92, 91, 98]),
            ("Ноя", [96, 93, 92, 99]),
            ("Дек", [97, 94, 93, 100]),
        ]),
    );
    PerformanceSeries::new(series)
}

fn standard_seo_metrics() -> Vec<SeoMetric> {
    vec![
        SeoMetric {
            metric: "Скорость загрузки",
            current: 2.1,
            optimal: 1.5,
            unit: "сек",
        },
        SeoMetric {
            metric: "Mobile-friendly",
            current: 92.0,
            optimal: 100.0,
            unit: "%",
        },
        SeoMetric {
            metric: "Индексация",
            current: 85.0,
            optimal: 95.0,
            unit: "%",
        },
        SeoMetric {
            metric: "Обратные ссылки",
            current: 1250.0,
            optimal: 2000.0,
            unit: "шт",
        },
        SeoMetric {
            metric: "Органический трафик",
            current: 45_000.0,
            optimal: 60_000.0,
            unit: "визитов",
        },
    ]
}

fn standard_sentiment() -> Vec<SentimentSlice> {
    vec![
        SentimentSlice {
            name: "Положительные",
            value: 65,
            color: "#10b981",
        },
        SentimentSlice {
            name: "Нейтральные",
            value: 25,
            color: "#6b7280",
        },
        SentimentSlice {
            name: "Отрицательные",
            value: 10,
            color: "#ef4444",
        },
    ]
}

const REVIEW_TOPICS: [&str; 6] = [
    "Качество еды",
    "Обслуживание",
    "Цены",
    "Атмосфера",
    "Чистота",
    "Скорость",
];

fn review_rows(positive: [u32; 6]) -> Vec<ReviewTopic> {
    REVIEW_TOPICS
        .into_iter()
        .zip(positive)
        .map(|(topic, positive)| ReviewTopic {
            topic,
            positive,
            negative: 100 - positive,
        })
        .collect()
}

fn standard_review_topics() -> Vec<ReviewTopic> {
    review_rows([78, 82, 45, 71, 88, 66])
}

fn review_overrides() -> OverrideTable<ReviewTopic> {
    BTreeMap::from([
        ("1", review_rows([82, 75, 60, 68, 85, 70])),
        ("2", review_rows([88, 90, 50, 80, 92, 75])),
        ("3", review_rows([85, 78, 40, 85, 88, 65])),
        ("4", review_rows([92, 88, 35, 90, 95, 80])),
    ])
}

const MARKETING_CHANNELS: [&str; 5] = ["Instagram", "VK", "Яндекс.Директ", "Google Ads", "Telegram"];

fn channel_rows(rows: [(u32, f64, u32); 5]) -> Vec<MarketingChannel> {
    MARKETING_CHANNELS
        .into_iter()
        .zip(rows)
        .map(|(channel, (reach, engagement, cost))| MarketingChannel {
            channel,
            reach,
            engagement,
            cost,
        })
        .collect()
}

fn standard_marketing_channels() -> Vec<MarketingChannel> {
    channel_rows([
        (45_000, 4.2, 85_000),
        (38_000, 3.8, 62_000),
        (52_000, 2.1, 120_000),
        (28_000, 2.5, 95_000),
        (15_000, 5.1, 35_000),
    ])
}

fn marketing_overrides() -> OverrideTable<MarketingChannel> {
    BTreeMap::from([
        ("1", standard_marketing_channels()),
        (
            "2",
            channel_rows([
                (32_000, 3.8, 65_000),
                (28_000, 4.1, 45_000),
                (38_000, 2.3, 85_000),
                (22_000, 2.8, 72_000),
                (12_000, 4.8, 28_000),
            ]),
        ),
        (
            "3",
            channel_rows([
                (52_000, 4.5, 98_000),
                (42_000, 3.5, 75_000),
                (58_000, 1.9, 135_000),
                (32_000, 2.2, 110_000),
                (18_000, 5.3, 42_000),
            ]),
        ),
        (
            "4",
            channel_rows([
                (38_000, 4.8, 72_000),
                (25_000, 4.2, 38_000),
                (32_000, 2.4, 68_000),
                (18_000, 3.1, 52_000),
                (8_000, 6.2, 18_000),
            ]),
        ),
    ])
}

const FINANCIAL_METRICS: [(&str, u32); 5] = [
    ("Выручка", 75),
    ("Рентабельность", 68),
    ("Ликвидность", 80),
    ("Долговая нагрузка", 45),
    ("Рост", 70),
];

fn financial_rows(values: [u32; 5]) -> Vec<FinancialMetric> {
    FINANCIAL_METRICS
        .into_iter()
        .zip(values)
        .map(|((metric, benchmark), value)| FinancialMetric {
            metric,
            value,
            benchmark,
        })
        .collect()
}

fn standard_financial_metrics() -> Vec<FinancialMetric> {
    financial_rows([85, 72, 90, 35, 78])
}

fn financial_overrides() -> OverrideTable<FinancialMetric> {
    BTreeMap::from([
        ("1", financial_rows([85, 72, 90, 35, 78])),
        ("2", financial_rows([78, 68, 85, 42, 72])),
        ("3", financial_rows([82, 75, 88, 38, 80])),
        ("4", financial_rows([90, 82, 92, 28, 85])),
    ])
}

fn standard_price_comparison() -> Vec<PriceComparisonRow> {
    [
        ("Бизнес-ланч", [350, 420, 480, 550]),
        ("Кофе", [180, 200, 220, 280]),
        ("Десерты", [250, 280, 320, 380]),
        ("Салаты", [320, 380, 420, 480]),
        ("Основные блюда", [450, 520, 580, 650]),
    ]
    .into_iter()
    .map(|(category, [comp1, comp2, comp3, comp4])| PriceComparisonRow {
        category,
        comp1,
        comp2,
        comp3,
        comp4,
    })
    .collect()
}
