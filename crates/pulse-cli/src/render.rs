//! Console and JSON rendering of analysis reports

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_FULL, UTF8_HORIZONTAL_ONLY};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use pulse_core::{AnalysisReport, AnalysisResult, Recommendation};
use pulse_market::NewsItem;

/// Disclaimer shown at the end of console output
const CONSOLE_DISCLAIMER: &str = "DISCLAIMER: The analysis provided by Stock Pulse is for informational purposes only and does not constitute investment advice. Stock market investments involve risk, and past performance is not indicative of future results. Always conduct your own research and consult with a qualified financial advisor before making investment decisions.";

pub fn print_banner() {
    println!();
    println!("Stock Pulse");
    println!("Feel the pulse of the market with AI-powered stock insights");
    println!();
}

/// Serialize the report as the `{results, disclaimer}` document
pub fn to_json_document(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&report.to_document())
}

/// Print the console report: summary table, per-stock details, disclaimer
pub fn print_report(report: &AnalysisReport) {
    println!("{}", summary_table(report));

    for (_, result) in report.iter() {
        if let AnalysisResult::Success {
            ticker,
            name,
            recommendation,
            news,
            ..
        } = result
        {
            print_detail(ticker, name, recommendation, news);
        }
    }

    println!();
    println!("{CONSOLE_DISCLAIMER}");
}

fn summary_table(report: &AnalysisReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Ticker", "Company", "Signal", "Reasoning"]);

    for (ticker, result) in report.iter() {
        match result {
            AnalysisResult::Success {
                name,
                recommendation,
                ..
            } => {
                table.add_row(vec![
                    Cell::new(ticker).fg(Color::Cyan),
                    Cell::new(name).fg(Color::Magenta),
                    signal_cell(&recommendation.signal),
                    Cell::new(&recommendation.reasoning),
                ]);
            }
            AnalysisResult::Failure { error, .. } => {
                table.add_row(vec![
                    Cell::new(ticker).fg(Color::Cyan),
                    Cell::new(result.display_name()).fg(Color::Magenta),
                    Cell::new("ERROR")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                    Cell::new(error),
                ]);
            }
        }
    }
    table
}

fn signal_cell(signal: &str) -> Cell {
    let color = match signal {
        "BUY" => Some(Color::Green),
        "SELL" => Some(Color::Red),
        "HOLD" => Some(Color::Yellow),
        _ => None,
    };
    match color {
        Some(c) => Cell::new(signal).fg(c).add_attribute(Attribute::Bold),
        None => Cell::new(signal),
    }
}

fn print_detail(ticker: &str, name: &str, recommendation: &Recommendation, news: &[NewsItem]) {
    println!();
    println!("{ticker}: {name}");
    println!("Signal: {}", recommendation.signal);
    println!("Reasoning: {}", recommendation.reasoning);

    println!("Key Factors:");
    for factor in &recommendation.key_factors {
        println!("  • {factor}");
    }
    println!("Risks:");
    for risk in &recommendation.risks {
        println!("  • {risk}");
    }

    println!();
    println!("Recent News:");
    match news_table(news) {
        Some(table) => println!("{table}"),
        None => println!("  No recent news available."),
    }

    println!("{}", "─".repeat(80));
}

/// Build the news table, skipping entries with an empty title or publisher
///
/// Returns `None` when nothing is left to show.
fn news_table(news: &[NewsItem]) -> Option<Table> {
    let rows: Vec<&NewsItem> = news
        .iter()
        .filter(|n| !n.title.is_empty() && !n.publisher.is_empty())
        .collect();
    if rows.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Source", "Title", "URL"]);

    for item in rows {
        table.add_row(vec![
            Cell::new(&item.published).fg(Color::Cyan),
            Cell::new(&item.publisher).fg(Color::Magenta),
            Cell::new(&item.title),
            Cell::new(&item.link).fg(Color::Blue),
        ]);
    }
    Some(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_market::StockMetrics;

    fn metrics(ticker: &str, name: &str) -> StockMetrics {
        StockMetrics {
            ticker: ticker.to_string(),
            name: name.to_string(),
            sector: "Technology".to_string(),
            industry: "Semiconductors".to_string(),
            current_price: Some(100.0),
            target_price: Some(120.0),
            yearly_return: Some(15.0),
            pe_ratio: None,
            forward_pe: None,
            peg_ratio: None,
            price_to_book: None,
            dividend_yield: None,
            eps: None,
            roe: None,
            roa: None,
            debt_to_equity: None,
            quick_ratio: None,
            current_ratio: None,
            recommendation: "BUY".to_string(),
            target_upside: Some(20.0),
        }
    }

    fn success(ticker: &str, name: &str, signal: &str) -> AnalysisResult {
        AnalysisResult::Success {
            ticker: ticker.to_string(),
            name: name.to_string(),
            recommendation: Recommendation {
                signal: signal.to_string(),
                reasoning: "Momentum and margins look strong.".to_string(),
                key_factors: vec!["Margin expansion".to_string()],
                risks: vec!["Cyclical demand".to_string()],
            },
            news: Vec::new(),
            metrics: metrics(ticker, name),
        }
    }

    fn sample_report() -> AnalysisReport {
        let mut report =
            AnalysisReport::new(vec!["NVDA".to_string(), "ZZZZ".to_string()]);
        report.insert("NVDA".to_string(), success("NVDA", "NVIDIA Corp.", "BUY"));
        report.insert(
            "ZZZZ".to_string(),
            AnalysisResult::Failure {
                ticker: "ZZZZ".to_string(),
                name: None,
                error: "No data found for ticker ZZZZ".to_string(),
            },
        );
        report
    }

    #[test]
    fn test_json_document_shape() {
        let json_out = to_json_document(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json_out).unwrap();

        assert_eq!(value["disclaimer"], pulse_core::DISCLAIMER);
        assert_eq!(value["results"]["NVDA"]["status"], "success");
        assert_eq!(value["results"]["NVDA"]["signal"], "BUY");
        assert_eq!(
            value["results"]["ZZZZ"]["error"],
            "No data found for ticker ZZZZ"
        );
    }

    #[test]
    fn test_summary_table_rows() {
        let rendered = summary_table(&sample_report()).to_string();

        assert!(rendered.contains("NVDA"));
        assert!(rendered.contains("NVIDIA Corp."));
        assert!(rendered.contains("BUY"));
        assert!(rendered.contains("ERROR"));
    }

    #[test]
    fn test_news_table_filters_blank_entries() {
        let news = vec![
            NewsItem {
                title: "Record quarter".to_string(),
                publisher: "Reuters".to_string(),
                link: "https://example.com/a".to_string(),
                published: "2024-05-22".to_string(),
            },
            NewsItem {
                title: String::new(),
                publisher: "Bloomberg".to_string(),
                link: "https://example.com/b".to_string(),
                published: "2024-05-21".to_string(),
            },
        ];

        let rendered = news_table(&news).unwrap().to_string();
        assert!(rendered.contains("Record quarter"));
        assert!(!rendered.contains("example.com/b"));
    }

    #[test]
    fn test_news_table_empty_when_nothing_valid() {
        let news = vec![NewsItem {
            title: String::new(),
            publisher: String::new(),
            link: "#".to_string(),
            published: "N/A".to_string(),
        }];
        assert!(news_table(&news).is_none());
        assert!(news_table(&[]).is_none());
    }
}
