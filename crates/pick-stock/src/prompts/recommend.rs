//! The pick request sent to the model

use super::{Language, PromptTemplate};
use crate::collector::Candidate;
use crate::error::Result;
use serde_json::json;

const RECOMMEND_KO: &str = "다음 종목들 중 오늘 가장 추천할 1종목을 골라주세요.

기준:
1. 저평가 (낮은 PER)
2. 성장성 (높은 매출성장률)
3. 수익성 (높은 ROE)
4. 미래전망 (AI 대체 위험도, 경쟁 해자, 산업 트렌드)

후보 종목:
{{ candidate_text }}

다음 형식으로 답해주세요:
🏆 오늘의 추천 종목: [티커] ([회사명])
💰 현재가: $[가격]
📊 핵심 지표: PER [수치], 매출성장률 [수치]%, ROE [수치]%
🔮 미래 전망: AI 대체 위험도 [낮음/중간/높음] - [이유 1줄]
🏰 경쟁 해자: [핵심 경쟁우위 1줄]
✅ 추천 이유: [3줄 이내]
⚠️ 리스크: [1줄]
* 이 분석은 참고용이며 투자 판단은 본인 책임입니다.";

const RECOMMEND_EN: &str = "From the stocks below, pick the single stock you would recommend most today.

Criteria:
1. Undervaluation (low P/E)
2. Growth (high revenue growth)
3. Profitability (high ROE)
4. Outlook (AI substitution risk, competitive moat, industry trends)

Candidates:
{{ candidate_text }}

Answer in this format:
🏆 Today's pick: [ticker] ([company name])
💰 Price: $[price]
📊 Key metrics: P/E [value], revenue growth [value]%, ROE [value]%
🔮 Outlook: AI substitution risk [low/medium/high] - [one-line reason]
🏰 Moat: [one-line core competitive advantage]
✅ Why: [at most 3 lines]
⚠️ Risk: [1 line]
* This analysis is for reference only; investment decisions are your own responsibility.";

/// The pick request template
pub fn recommendation_template() -> Result<PromptTemplate> {
    PromptTemplate::bilingual("stock.user.recommend", RECOMMEND_KO, RECOMMEND_EN)
}

/// Render a number the way the report shows it
///
/// Whole values keep one decimal (`25.0`); everything else prints its
/// shortest exact form (`26.54`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// One line per candidate, newline separated, input order
pub fn candidate_lines(lang: Language, candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| {
            let pe = format_number(c.price_to_earnings);
            let growth = format_number(c.revenue_growth_pct);
            let roe = format_number(c.return_on_equity_pct);
            let price = format_number(c.price);
            match lang {
                Language::Korean => format!(
                    "{} ({}): PER={pe}, 매출성장률={growth}%, ROE={roe}%, 현재가=${price}",
                    c.ticker, c.name
                ),
                Language::English => format!(
                    "{} ({}): P/E={pe}, Revenue growth={growth}%, ROE={roe}%, Price=${price}",
                    c.ticker, c.name
                ),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the full pick request for a candidate list
///
/// An empty list still renders; the candidate section is simply blank.
pub fn render_recommendation_prompt(lang: Language, candidates: &[Candidate]) -> Result<String> {
    recommendation_template()?.render(
        lang,
        &json!({ "candidate_text": candidate_lines(lang, candidates) }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(ticker: &str, name: &str, pe: f64, growth: f64, roe: f64, price: f64) -> Candidate {
        Candidate {
            ticker: ticker.to_string(),
            name: name.to_string(),
            price_to_earnings: pe,
            revenue_growth_pct: growth,
            return_on_equity_pct: roe,
            price,
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(25.0), "25.0");
        assert_eq!(format_number(26.54), "26.54");
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(187.3), "187.3");
        assert_eq!(format_number(-3.5), "-3.5");
    }

    #[test]
    fn test_prompt_lists_every_candidate() {
        let candidates = vec![
            candidate("AAPL", "Apple Inc.", 25.0, 15.0, 30.0, 150.0),
            candidate("QCOM", "QUALCOMM Incorporated", 17.42, 10.3, 41.7, 158.64),
        ];

        let prompt = render_recommendation_prompt(Language::Korean, &candidates).unwrap();

        assert!(prompt.contains(
            "후보 종목:\n\
             AAPL (Apple Inc.): PER=25.0, 매출성장률=15.0%, ROE=30.0%, 현재가=$150.0\n\
             QCOM (QUALCOMM Incorporated): PER=17.42, 매출성장률=10.3%, ROE=41.7%, 현재가=$158.64\n\n"
        ));
        assert!(prompt.starts_with("다음 종목들 중 오늘 가장 추천할 1종목을 골라주세요."));
        assert!(prompt.ends_with("투자 판단은 본인 책임입니다."));
    }

    #[test]
    fn test_english_prompt() {
        let candidates = vec![candidate("TXN", "Texas Instruments", 28.9, 11.0, 29.95, 172.1)];

        let prompt = render_recommendation_prompt(Language::English, &candidates).unwrap();

        assert!(prompt.contains(
            "TXN (Texas Instruments): P/E=28.9, Revenue growth=11.0%, ROE=29.95%, Price=$172.1"
        ));
        assert!(prompt.contains("Criteria:"));
    }

    #[test]
    fn test_empty_candidate_list_renders_blank_section() {
        let prompt = render_recommendation_prompt(Language::Korean, &[]).unwrap();

        assert!(prompt.contains("후보 종목:\n\n\n다음 형식으로 답해주세요:"));
    }

    #[test]
    fn test_candidate_lines_keep_order() {
        let candidates = vec![
            candidate("META", "Meta", 24.0, 22.1, 35.0, 500.0),
            candidate("AMZN", "Amazon", 29.5, 11.2, 21.0, 180.0),
        ];
        let lines = candidate_lines(Language::English, &candidates);
        let tickers: Vec<&str> = lines
            .lines()
            .map(|l| l.split_whitespace().next().unwrap_or_default())
            .collect();

        assert_eq!(tickers, ["META", "AMZN"]);
    }
}
