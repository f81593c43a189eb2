use crate::infra::{parse_selection, parse_tab};
use clap::Args;
use market_scope::config::DashboardConfig;
use market_scope::dashboard::resolver::{competitor_name, PriceRowsView};
use market_scope::dashboard::{
    export_json, CompetitorSelection, DashboardQuery, DashboardTab, DashboardView, InsightsBlock,
    MarketFixtures, StrategyDocument, TabView, TimeRangeKey,
};
use market_scope::error::AppError;
use tracing::warn;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Competitor id used for the single-competitor part of the demo.
    #[arg(long, default_value = "1", value_parser = parse_selection)]
    pub(crate) competitor: CompetitorSelection,
    /// Time range id (7d, 30d, 90d, 1y). Defaults to APP_DEFAULT_TIME_RANGE.
    #[arg(long)]
    pub(crate) time_range: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DashboardReportArgs {
    /// Competitor id, or "all" for the whole market
    #[arg(long, default_value = "all", value_parser = parse_selection)]
    pub(crate) competitor: CompetitorSelection,
    /// Time range id (7d, 30d, 90d, 1y); unknown ids fall back quietly
    #[arg(long)]
    pub(crate) time_range: Option<String>,
    /// Print a single tab (overview, technical, reviews, financial, marketing, pricing)
    #[arg(long, value_parser = parse_tab)]
    pub(crate) tab: Option<DashboardTab>,
    /// Print the resolved view as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct StrategyArgs {
    /// Competitor id, or "all" for the whole market
    #[arg(long, default_value = "all", value_parser = parse_selection)]
    pub(crate) competitor: CompetitorSelection,
    /// Print the strategy document as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_dashboard_report(args: DashboardReportArgs) -> Result<(), AppError> {
    let DashboardReportArgs {
        competitor,
        time_range,
        tab,
        json,
    } = args;

    let fixtures = MarketFixtures::standard();
    let query = DashboardQuery::new(competitor, resolve_time_range(time_range));

    match (tab, json) {
        (Some(tab), true) => println!("{}", export_json(&fixtures.tab(tab, &query))?),
        (Some(tab), false) => {
            render_header(&fixtures, &query);
            render_tab(&fixtures.tab(tab, &query));
        }
        (None, true) => println!("{}", export_json(&fixtures.dashboard(&query))?),
        (None, false) => render_dashboard(&fixtures.dashboard(&query)),
    }

    Ok(())
}

pub(crate) fn run_strategy(args: StrategyArgs) -> Result<(), AppError> {
    let fixtures = MarketFixtures::standard();
    let strategy = fixtures.strategy(&args.competitor);

    if args.json {
        println!("{}", export_json(&strategy)?);
    } else {
        render_strategy(&strategy);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        competitor,
        time_range,
    } = args;

    let fixtures = MarketFixtures::standard();
    let time_range = resolve_time_range(time_range);

    println!("Market scope demo");
    println!("\n== Whole market ==");
    render_dashboard(&fixtures.dashboard(&DashboardQuery::new(
        CompetitorSelection::All,
        time_range.clone(),
    )));

    println!("\n== Single competitor ==");
    render_dashboard(&fixtures.dashboard(&DashboardQuery::new(
        competitor.clone(),
        time_range,
    )));

    println!("\n== Strategy ==");
    render_strategy(&fixtures.strategy(&competitor));

    Ok(())
}

/// Reports only need the default range, so server settings are never read here.
fn resolve_time_range(requested: Option<String>) -> String {
    if let Some(time_range) = requested {
        return time_range;
    }

    let default_time_range = match DashboardConfig::from_env() {
        Ok(config) => config.default_time_range,
        Err(err) => {
            warn!(error = %err, "falling back to the 30 day range");
            TimeRangeKey::DEFAULT
        }
    };
    default_time_range.id().to_string()
}

fn render_header(fixtures: &MarketFixtures, query: &DashboardQuery) {
    let name = competitor_name(&query.selection, &fixtures.competitors);
    render_scope(name, &query.time_range);
}

fn render_scope(name: &str, time_range: &str) {
    let period = TimeRangeKey::parse(time_range)
        .map(TimeRangeKey::label)
        .unwrap_or("unknown period, 30 day data shown");
    println!("Competitor: {}", name);
    println!("Period: {} ({})", time_range, period);
}

pub(crate) fn render_dashboard(view: &DashboardView) {
    render_scope(view.competitor_name, &view.time_range);

    for tab in [
        TabView::Overview(view.overview.clone()),
        TabView::Technical(view.technical.clone()),
        TabView::Reviews(view.reviews.clone()),
        TabView::Financial(view.financial.clone()),
        TabView::Marketing(view.marketing.clone()),
        TabView::Pricing(view.pricing.clone()),
    ] {
        render_tab(&tab);
    }
}

pub(crate) fn render_tab(view: &TabView) {
    println!("\n{}", view.tab().label());

    match view {
        TabView::Overview(overview) => {
            let headline = &overview.headline;
            println!(
                "- Rating {:.1} | Market share {}% | Sentiment {}% | SEO {}",
                headline.rating,
                headline.market_share,
                headline.sentiment_score,
                headline.seo_score
            );
            if overview.competitors.is_empty() {
                println!("- Competitors: none matched the selection");
            } else {
                let names: Vec<&str> = overview
                    .competitors
                    .iter()
                    .map(|competitor| competitor.name)
                    .collect();
                println!("- Competitors: {}", names.join(", "));
            }
            println!("- Performance points: {}", overview.performance.len());
            if let Some(last) = overview.performance.last() {
                let scores: Vec<String> = last
                    .scores
                    .iter()
                    .map(|(key, score)| format!("{key}={score}"))
                    .collect();
                println!("  latest {}: {}", last.month, scores.join(", "));
            }
        }
        TabView::Technical(technical) => {
            for competitor in &technical.competitors {
                println!(
                    "- {}: SEO {:.0}, load time {:.1}s",
                    competitor.name, competitor.seo_score, competitor.load_time
                );
            }
            for metric in &technical.seo_metrics {
                println!(
                    "- {}: {} {} (optimal {})",
                    metric.metric, metric.current, metric.unit, metric.optimal
                );
            }
        }
        TabView::Reviews(reviews) => {
            let sentiment: Vec<String> = reviews
                .sentiment
                .iter()
                .map(|slice| format!("{} {}%", slice.name, slice.value))
                .collect();
            println!("- Sentiment: {}", sentiment.join(" | "));
            for topic in &reviews.topics {
                println!(
                    "- {}: {} positive / {} negative",
                    topic.topic, topic.positive, topic.negative
                );
            }
        }
        TabView::Financial(financial) => {
            for metric in &financial.metrics {
                println!(
                    "- {}: {} (benchmark {})",
                    metric.metric, metric.value, metric.benchmark
                );
            }
            println!("- Revenue forecast points: {}", financial.performance.len());
        }
        TabView::Marketing(marketing) => {
            for channel in &marketing.channels {
                println!(
                    "- {}: reach {} | engagement {:.1}% | cost {}",
                    channel.channel, channel.reach, channel.engagement, channel.cost
                );
            }
        }
        TabView::Pricing(pricing) => match &pricing.prices {
            PriceRowsView::Comparison(rows) => {
                for row in rows {
                    println!(
                        "- {}: {} / {} / {} / {}",
                        row.category, row.comp1, row.comp2, row.comp3, row.comp4
                    );
                }
            }
            PriceRowsView::Single(rows) => {
                for row in rows {
                    match row.price {
                        Some(price) => println!("- {}: {} ₽", row.category, price),
                        None => println!("- {}: no price on record", row.category),
                    }
                }
            }
        },
    }

    render_insights(view.insights());
}

fn render_insights(block: &InsightsBlock) {
    if !block.insights.is_empty() {
        println!("Insights");
        for note in &block.insights {
            println!("  - {}", note);
        }
    }

    if !block.strategy.is_empty() {
        println!("Recommended actions");
        for action in &block.strategy {
            println!("  - {}", action);
        }
    }
}

pub(crate) fn render_strategy(strategy: &StrategyDocument) {
    println!("Executive summary");
    println!("{}", strategy.executive_summary);

    if !strategy.highlights.is_empty() {
        println!("\nHighlights");
        for highlight in &strategy.highlights {
            println!("- {}: {}", highlight.tab_label, highlight.insight);
        }
    }

    println!("\nKey opportunities");
    for opportunity in &strategy.key_opportunities {
        println!("- {}", opportunity);
    }

    println!("\nStrategic initiatives");
    for initiative in &strategy.strategic_initiatives {
        println!("- {}", initiative.area);
        for item in &initiative.initiatives {
            println!("  - {}", item);
        }
    }

    println!("\nKPIs");
    for kpi in &strategy.kpis {
        println!("- {}", kpi);
    }

    println!("\nTimeline");
    for phase in &strategy.timeline {
        println!("- {}: {}", phase.phase, phase.tasks.join("; "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn explicit_time_range_skips_the_environment() {
        assert_eq!(resolve_time_range(Some("5y".to_string())), "5y");
    }

    #[test]
    fn broken_server_settings_do_not_block_reports() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::set_var("APP_PORT", "abc");
        env::set_var("APP_DEFAULT_TIME_RANGE", "90d");
        assert_eq!(resolve_time_range(None), "90d");

        env::set_var("APP_DEFAULT_TIME_RANGE", "2w");
        assert_eq!(resolve_time_range(None), "30d");

        env::remove_var("APP_PORT");
        env::remove_var("APP_DEFAULT_TIME_RANGE");
    }
}
