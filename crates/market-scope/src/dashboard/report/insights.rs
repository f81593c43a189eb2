use super::super::domain::{
    Competitor, CompetitorSelection, DashboardTab, MarketingChannel, TimeRangeKey,
};
use super::views::{
    InsightsBlock, StrategicInitiative, StrategyDocument, TabHighlight, TimelinePhase,
};

/// The competitor the narrative talks about: the selection, or the first competitor.
fn focus_competitor<'a>(
    competitors: &'a [Competitor],
    selection: &CompetitorSelection,
) -> Option<&'a Competitor> {
    selection
        .competitor_id()
        .and_then(|id| competitors.iter().find(|competitor| competitor.id == id))
        .or_else(|| competitors.first())
}

fn block(insights: Vec<String>, strategy: &[&str]) -> InsightsBlock {
    InsightsBlock {
        insights,
        strategy: strategy.iter().map(|line| line.to_string()).collect(),
    }
}

fn insufficient_data() -> InsightsBlock {
    block(
        vec!["Недостаточно данных для анализа выбранного конкурента".to_string()],
        &["Соберите данные о конкурентах и повторите анализ"],
    )
}

/// Formats a count with space-separated thousands, as the Russian locale does.
fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn overview_insights(
    competitors: &[Competitor],
    selection: &CompetitorSelection,
    time_range_id: &str,
) -> InsightsBlock {
    let Some(current) = focus_competitor(competitors, selection) else {
        return insufficient_data();
    };

    let average_rating =
        competitors.iter().map(|c| c.rating).sum::<f64>() / competitors.len() as f64;
    let leader = competitors
        .iter()
        .max_by(|a, b| a.market_share.total_cmp(&b.market_share))
        .unwrap_or(current);
    let period = TimeRangeKey::parse(time_range_id).map_or(time_range_id, |key| key.label());

    let position = if current.rating > average_rating {
        "Ваша позиция выше среднего"
    } else {
        "Есть потенциал для улучшения рейтинга"
    };
    let investment = if current.seo_score > 90.0 {
        "контент-маркетинг"
    } else {
        "SEO-оптимизацию"
    };

    InsightsBlock {
        insights: vec![
            format!("Средний рейтинг по рынку: {average_rating:.1}/5. {position}"),
            format!(
                "Доля рынка распределена неравномерно. {} лидирует с {}%",
                leader.name, leader.market_share
            ),
            format!("За период {period} наблюдается рост вовлеченности пользователей на 8%"),
            "Основной рост происходит за счет цифровых каналов привлечения".to_string(),
        ],
        strategy: vec![
            format!("Увеличить инвестиции в {investment} для улучшения видимости"),
            "Внедрить программу лояльности для увеличения повторных покупок".to_string(),
            "Оптимизировать ценообразование на основе анализа конкурентов".to_string(),
            "Улучшить мобильный пользовательский опыт для увеличения конверсии".to_string(),
        ],
    }
}

pub fn technical_insights(
    competitors: &[Competitor],
    selection: &CompetitorSelection,
) -> InsightsBlock {
    let Some(current) = focus_competitor(competitors, selection) else {
        return insufficient_data();
    };
    let fastest = competitors
        .iter()
        .min_by(|a, b| a.load_time.total_cmp(&b.load_time))
        .unwrap_or(current);

    let speed_note = if current.load_time <= 2.0 {
        "Отличный показатель"
    } else {
        "Требует оптимизации"
    };
    let seo_note = if current.seo_score > 85.0 {
        "Высокий уровень"
    } else {
        "Есть возможности для улучшения"
    };
    let speed_action = if current.load_time > 2.0 {
        "Оптимизировать скорость загрузки до 2 секунд"
    } else {
        "Поддерживать текущую скорость загрузки"
    };

    InsightsBlock {
        insights: vec![
            format!(
                "Скорость загрузки сайта: {}сек. {speed_note}",
                current.load_time
            ),
            format!(
                "Лучший показатель скорости у {}: {}сек",
                fastest.name, fastest.load_time
            ),
            format!("SEO-оценка: {}/100. {seo_note}", current.seo_score),
            "Мобильная адаптивность у всех конкурентов на высоком уровне".to_string(),
        ],
        strategy: vec![
            speed_action.to_string(),
            "Улучшить Core Web Vitals для лучшего ранжирования в поиске".to_string(),
            "Внедрить Progressive Web App для мобильных пользователей".to_string(),
            "Оптимизировать мета-теги и структуру данных для SEO".to_string(),
        ],
    }
}

pub fn review_insights(
    competitors: &[Competitor],
    selection: &CompetitorSelection,
) -> InsightsBlock {
    let Some(current) = focus_competitor(competitors, selection) else {
        return insufficient_data();
    };

    block(
        vec![
            format!(
                "Тональность отзывов: {}% положительных",
                current.sentiment_score
            ),
            format!(
                "Количество отзывов: {}",
                group_thousands(current.review_count)
            ),
            "Основные темы обсуждения: качество обслуживания и атмосфера".to_string(),
            "Наибольшая критика касается ценовой политики".to_string(),
        ],
        &[
            "Внедрить систему управления отзывами в реальном времени",
            "Разработать программу ответов на негативные отзывы",
            "Стимулировать клиентов оставлять отзывы после посещения",
            "Провести анализ причин негативных отзывов и разработать план улучшений",
        ],
    )
}

pub fn financial_insights(
    competitors: &[Competitor],
    selection: &CompetitorSelection,
) -> InsightsBlock {
    let Some(current) = focus_competitor(competitors, selection) else {
        return insufficient_data();
    };

    block(
        vec![
            format!("Финансовая устойчивость: {}/100", current.financial_health),
            "Рентабельность бизнеса на уровне рынка".to_string(),
            "Стабильный рост выручки в последнем периоде".to_string(),
            "Низкая долговая нагрузка обеспечивает финансовую гибкость".to_string(),
        ],
        &[
            "Диверсифицировать источники доходов",
            "Оптимизировать операционные расходы без потери качества",
            "Рассмотреть возможность расширения в смежные сегменты",
            "Инвестировать в цифровую трансформацию бизнес-процессов",
        ],
    )
}

/// `channels` are the rows shown for the selection; their reach stands in for monthly traffic.
pub fn marketing_insights(
    competitors: &[Competitor],
    selection: &CompetitorSelection,
    channels: &[MarketingChannel],
) -> InsightsBlock {
    let Some(current) = focus_competitor(competitors, selection) else {
        return block(
            vec![
                "Недостаточно данных для анализа маркетинговой стратегии".to_string(),
                "Рекомендуется собрать больше информации о конкурентах".to_string(),
            ],
            &[
                "Соберите данные о маркетинговых каналах конкурентов",
                "Проанализируйте целевую аудиторию",
                "Изучите бюджетные распределения",
            ],
        );
    };

    let mut insights = Vec::new();
    let mut strategy = Vec::new();
    let name = current.name;
    let seo = current.seo_score;

    if seo > 80.0 {
        insights.push(format!(
            "{name} демонстрирует сильные SEO-показатели ({seo}/100), что указывает на эффективную стратегию органического роста"
        ));
        strategy.push("Усилить инвестиции в контент-маркетинг и техническую SEO-оптимизацию");
    } else if seo > 60.0 {
        insights.push(format!(
            "{name} имеет средние SEO-показатели ({seo}/100), есть потенциал для улучшения"
        ));
        strategy.push("Оптимизировать мета-теги и улучшить внутреннюю перелинковку");
    } else {
        insights.push(format!(
            "{name} имеет слабые SEO-показатели ({seo}/100), что открывает возможности для обгона"
        ));
        strategy.push("Разработать агрессивную SEO-стратегию с фокусом на низкочастотные запросы");
    }

    let traffic: u32 = channels.iter().map(|channel| channel.reach).sum();
    let visitors = group_thousands(traffic);
    if traffic > 50_000 {
        insights.push(format!(
            "Высокий месячный трафик ({visitors} посетителей) свидетельствует о сильном бренде"
        ));
        strategy.push("Использовать ретаргетинг для увеличения конверсии существующего трафика");
    } else if traffic > 20_000 {
        insights.push(format!(
            "Средний уровень трафика ({visitors} посетителей) позволяет масштабировать маркетинговые активности"
        ));
        strategy.push("Диверсифицировать источники трафика через партнерский маркетинг");
    } else {
        insights.push(format!(
            "Низкий уровень трафика ({visitors} посетителей) требует усиления маркетинговых активностей"
        ));
        strategy.push("Запустить агрессивную кампанию по привлечению трафика через социальные сети");
    }

    insights.push(
        "Рекомендуется регулярный мониторинг эффективности маркетинговых каналов".to_string(),
    );
    strategy.push("Внедрить систему сквозной аналитики для точного измерения ROI");

    block(insights, &strategy)
}

pub fn pricing_insights(
    competitors: &[Competitor],
    selection: &CompetitorSelection,
) -> InsightsBlock {
    let Some(current) = focus_competitor(competitors, selection) else {
        return insufficient_data();
    };

    let position = if current.price_index < 100.0 {
        "ниже рынка"
    } else if current.price_index > 100.0 {
        "выше рынка"
    } else {
        "на уровне рынка"
    };

    block(
        vec![
            format!(
                "Ценовой индекс: {} (средний по рынку: 100)",
                current.price_index
            ),
            "Наибольшая ценовая конкуренция в сегменте бизнес-ланчей".to_string(),
            "Премиум-сегмент демонстрирует устойчивый рост".to_string(),
            "Клиенты готовы платить за уникальный опыт и качество".to_string(),
            format!("Текущая ценовая позиция: {position}"),
        ],
        &[
            "Внедрить динамическое ценообразование для повышения маржи",
            "Разработать пакетные предложения для увеличения среднего чека",
            "Создать премиальную линейку с добавленной стоимостью",
            "Оптимизировать себестоимость без снижения качества",
            "Использовать психологию ценообразования (например, 299 вместо 300)",
        ],
    )
}

/// Builds the strategy narrative; `tab_insights` supplies the per-tab highlights.
pub fn full_strategy(
    competitors: &[Competitor],
    selection: &CompetitorSelection,
    tab_insights: &[(DashboardTab, &InsightsBlock)],
) -> StrategyDocument {
    let executive_summary = match focus_competitor(competitors, selection) {
        Some(current) => format!(
            "Комплексная стратегия развития для {} на основе анализа {} ключевых конкурентов. Фокус на {}.",
            current.name,
            competitors.len(),
            if current.rating > 4.5 {
                "поддержании лидерства"
            } else {
                "улучшении конкурентных позиций"
            }
        ),
        None => "Недостаточно данных для формирования стратегии".to_string(),
    };

    let highlights = tab_insights
        .iter()
        .filter_map(|(tab, block)| {
            block.insights.first().map(|insight| TabHighlight {
                tab: *tab,
                tab_label: tab.label(),
                insight: insight.clone(),
            })
        })
        .collect();

    StrategyDocument {
        executive_summary,
        highlights,
        key_opportunities: vec![
            "Рост цифрового присутствия и онлайн-продаж",
            "Оптимизация операционной эффективности",
            "Улучшение клиентского опыта",
            "Расширение продуктовой линейки",
            "Повышение лояльности существующих клиентов",
        ],
        strategic_initiatives: vec![
            StrategicInitiative {
                area: "Технологии и Digital",
                initiatives: vec![
                    "Полная мобильная оптимизация платформы",
                    "Внедрение AI-ассистента для клиентов",
                    "Разработка собственного мобильного приложения",
                    "Автоматизация процессов бронирования и заказов",
                ],
            },
            StrategicInitiative {
                area: "Маркетинг и Продажи",
                initiatives: vec![
                    "Запуск программы лояльности с геймификацией",
                    "Развитие контент-маркетинга и блога",
                    "Партнерства с локальными инфлюенсерами",
                    "Внедрение CRM-системы для управления клиентами",
                ],
            },
            StrategicInitiative {
                area: "Операции и Качество",
                initiatives: vec![
                    "Стандартизация процессов обслуживания",
                    "Внедрение системы управления качеством",
                    "Оптимизация цепочки поставок",
                    "Обучение персонала стандартам сервиса",
                ],
            },
        ],
        kpis: vec![
            "Увеличение NPS на 15 пунктов за 6 месяцев",
            "Рост онлайн-продаж на 25% в течение года",
            "Улучшение рейтинга до 4.7/5",
            "Снижение стоимости привлечения клиента на 20%",
            "Увеличение среднего чека на 15%",
        ],
        timeline: vec![
            TimelinePhase {
                phase: "1-3 месяца",
                tasks: vec![
                    "Аудит текущих процессов",
                    "Разработка MVP улучшений",
                    "Запуск пилотных проектов",
                    "Обучение ключевого персонала",
                ],
            },
            TimelinePhase {
                phase: "4-6 месяцев",
                tasks: vec![
                    "Масштабирование успешных инициатив",
                    "Обучение всего персонала",
                    "Оптимизация на основе данных",
                    "Запуск программы лояльности",
                ],
            },
            TimelinePhase {
                phase: "7-12 месяцев",
                tasks: vec![
                    "Полное внедрение стратегии",
                    "Мониторинг KPI",
                    "Корректировка плана",
                    "Подготовка отчета об эффективности",
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::fixtures::MarketFixtures;

    #[test]
    fn thousands_are_grouped_with_spaces() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(875), "875");
        assert_eq!(group_thousands(15_420), "15 420");
        assert_eq!(group_thousands(1_234_567), "1 234 567");
    }

    #[test]
    fn overview_reports_average_rating_and_leader() {
        let fixtures = MarketFixtures::standard();
        let block = overview_insights(&fixtures.competitors, &CompetitorSelection::All, "30d");
        assert_eq!(
            block.insights[0],
            "Средний рейтинг по рынку: 4.4/5. Есть потенциал для улучшения рейтинга"
        );
        assert!(block.insights[1].contains("Вкусно и точка лидирует с 18%"));
        assert!(block.insights[2].contains("30 дней"));
        assert_eq!(block.strategy.len(), 4);
    }

    #[test]
    fn overview_recommends_content_for_strong_seo() {
        let fixtures = MarketFixtures::standard();
        let block = overview_insights(&fixtures.competitors, &"2".into(), "7d");
        assert!(block.insights[0].ends_with("Ваша позиция выше среднего"));
        assert!(block.strategy[0].contains("контент-маркетинг"));
    }

    #[test]
    fn technical_names_fastest_site() {
        let fixtures = MarketFixtures::standard();
        let block = technical_insights(&fixtures.competitors, &"1".into());
        assert_eq!(block.insights[0], "Скорость загрузки сайта: 2.3сек. Требует оптимизации");
        assert_eq!(block.insights[1], "Лучший показатель скорости у Кофемания: 1.5сек");
        assert_eq!(block.strategy[0], "Оптимизировать скорость загрузки до 2 секунд");
    }

    #[test]
    fn reviews_format_review_count() {
        let fixtures = MarketFixtures::standard();
        let block = review_insights(&fixtures.competitors, &"3".into());
        assert_eq!(block.insights[0], "Тональность отзывов: 76% положительных");
        assert_eq!(block.insights[1], "Количество отзывов: 18 900");
    }

    #[test]
    fn unknown_selection_falls_back_to_first_competitor() {
        let fixtures = MarketFixtures::standard();
        let block = financial_insights(&fixtures.competitors, &"99".into());
        assert_eq!(block.insights[0], "Финансовая устойчивость: 85/100");
    }

    #[test]
    fn empty_competitor_list_yields_insufficient_data() {
        let marketing = marketing_insights(&[], &CompetitorSelection::All, &[]);
        assert_eq!(marketing.insights.len(), 2);
        assert_eq!(marketing.strategy.len(), 3);
        let pricing = pricing_insights(&[], &"1".into());
        assert_eq!(pricing, insufficient_data());
    }

    #[test]
    fn marketing_tiers_follow_seo_and_reach() {
        let fixtures = MarketFixtures::standard();
        let channels = &fixtures.marketing_overrides["4"];
        let block = marketing_insights(&fixtures.competitors, &"4".into(), channels);
        assert!(block.insights[0].starts_with("Кофемания демонстрирует сильные SEO-показатели (90/100)"));
        assert!(block.insights[1].contains("121 000 посетителей"));
        assert_eq!(block.insights.len(), 3);
        assert_eq!(block.strategy.len(), 3);

        let quiet = marketing_insights(&fixtures.competitors, &"4".into(), &channels[4..]);
        assert!(quiet.insights[1].starts_with("Низкий уровень трафика (8 000 посетителей)"));
    }

    #[test]
    fn aggregate_marketing_reads_the_first_competitor_and_global_channels() {
        let fixtures = MarketFixtures::standard();
        let block = marketing_insights(
            &fixtures.competitors,
            &CompetitorSelection::All,
            &fixtures.marketing_channels,
        );

        assert!(block.insights[0]
            .starts_with("Вкусно и точка демонстрирует сильные SEO-показатели (88/100)"));
        assert!(block.insights[1].starts_with("Высокий месячный трафик (178 000 посетителей)"));
        assert_eq!(
            block.strategy[1],
            "Использовать ретаргетинг для увеличения конверсии существующего трафика"
        );
    }

    #[test]
    fn pricing_reports_market_position() {
        let fixtures = MarketFixtures::standard();
        let cheap = pricing_insights(&fixtures.competitors, &"1".into());
        assert_eq!(cheap.insights[4], "Текущая ценовая позиция: ниже рынка");
        let premium = pricing_insights(&fixtures.competitors, &"4".into());
        assert_eq!(premium.insights[0], "Ценовой индекс: 125 (средний по рынку: 100)");
        assert_eq!(premium.insights[4], "Текущая ценовая позиция: выше рынка");
    }

    #[test]
    fn strategy_targets_leadership_for_top_rated() {
        let fixtures = MarketFixtures::standard();
        let overview = overview_insights(&fixtures.competitors, &"4".into(), "90d");
        let strategy = full_strategy(
            &fixtures.competitors,
            &"4".into(),
            &[(DashboardTab::Overview, &overview)],
        );
        assert_eq!(
            strategy.executive_summary,
            "Комплексная стратегия развития для Кофемания на основе анализа 4 ключевых конкурентов. Фокус на поддержании лидерства."
        );
        assert_eq!(strategy.highlights.len(), 1);
        assert_eq!(strategy.highlights[0].insight, overview.insights[0]);
        assert_eq!(strategy.strategic_initiatives.len(), 3);
        assert_eq!(strategy.timeline.len(), 3);
    }

    #[test]
    fn strategy_without_competitors_reports_missing_data() {
        let strategy = full_strategy(&[], &CompetitorSelection::All, &[]);
        assert!(strategy.executive_summary.starts_with("Недостаточно данных"));
        assert!(strategy.highlights.is_empty());
    }
}
