//! One pick run: collect, recommend, notify

use crate::api::YahooFundamentalsClient;
use crate::collector::Collector;
use crate::config::PickerConfig;
use crate::error::Result;
use crate::notifier::{Notifier, SmtpMailer};
use crate::prompts::Language;
use crate::requester::Requester;
use pick_llm::providers::AnthropicProvider;
use std::sync::Arc;
use tracing::info;

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Tickers that passed the screen
    pub candidates: usize,
    /// Tickers whose data could not be fetched
    pub skipped: usize,
    /// The model's reply, as mailed
    pub recommendation: String,
}

/// The three stages wired together
pub struct Pipeline {
    collector: Collector,
    requester: Requester,
    notifier: Notifier,
    language: Language,
}

impl Pipeline {
    /// Wire a pipeline from its stages
    pub fn new(
        collector: Collector,
        requester: Requester,
        notifier: Notifier,
        language: Language,
    ) -> Self {
        Self {
            collector,
            requester,
            notifier,
            language,
        }
    }

    /// Wire the production stages (Yahoo Finance, Anthropic, SMTP)
    pub fn from_config(config: &PickerConfig) -> Result<Self> {
        let source = Arc::new(YahooFundamentalsClient::new()?);
        let provider = Arc::new(AnthropicProvider::new(config.api_key.clone())?);
        let mailer = Arc::new(SmtpMailer::new(
            &config.smtp_host,
            config.smtp_port,
            config.mail_account.clone(),
            config.mail_password.clone(),
        )?);

        Ok(Self::new(
            Collector::new(source, config.tickers.clone(), config.thresholds),
            Requester::new(provider, config.model.clone(), config.max_tokens, config.language),
            Notifier::new(mailer, config.mail_account.clone(), config.language),
            config.language,
        ))
    }

    /// Run once, printing progress to stdout
    ///
    /// A failed model call ends the run before anything is mailed.
    pub async fn run(&self) -> Result<RunSummary> {
        let lang = self.language;

        println!("{}", lang.collecting());
        let report = self.collector.collect().await;
        let skipped = report.skipped().count();
        let candidates = report.into_candidates();
        println!("{}", lang.candidates_found(candidates.len()));

        println!("{}", lang.analyzing());
        let recommendation = self.requester.recommend(&candidates).await?;
        println!("{recommendation}");

        println!("{}", lang.sending());
        self.notifier.notify(&recommendation).await?;
        println!("{}", lang.done());

        info!(candidates = candidates.len(), skipped, "Run complete");
        Ok(RunSummary {
            candidates: candidates.len(),
            skipped,
            recommendation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Fundamentals, MockFundamentalsSource};
    use crate::collector::ScreeningThresholds;
    use crate::error::PickError;
    use crate::notifier::MockMailer;
    use crate::requester::tests::FakeProvider;

    fn source() -> MockFundamentalsSource {
        let mut source = MockFundamentalsSource::new();
        source.expect_fundamentals().returning(|symbol| match symbol {
            "AAPL" => Ok(Fundamentals {
                trailing_pe: Some(25.0),
                revenue_growth: Some(0.15),
                return_on_equity: Some(0.30),
                current_price: Some(150.0),
                short_name: Some("Apple Inc.".to_string()),
            }),
            "MSFT" => Ok(Fundamentals {
                trailing_pe: Some(35.0),
                revenue_growth: Some(0.20),
                ..Default::default()
            }),
            _ => Err(PickError::market_data(symbol, "timed out")),
        });
        source
    }

    fn pipeline(provider: Arc<FakeProvider>, mailer: MockMailer) -> Pipeline {
        let collector = Collector::new(
            Arc::new(source()),
            vec!["AAPL".to_string(), "NFLX".to_string(), "MSFT".to_string()],
            ScreeningThresholds::default(),
        );
        Pipeline::new(
            collector,
            Requester::new(provider, "claude-opus-4-6", 1500, Language::Korean),
            Notifier::new(Arc::new(mailer), "me@example.com", Language::Korean),
            Language::Korean,
        )
    }

    #[tokio::test]
    async fn test_successful_run_mails_once() {
        let provider = Arc::new(FakeProvider::replying("🏆 오늘의 추천 종목: AAPL (Apple Inc.)"));
        let mut mailer = MockMailer::new();
        mailer
            .expect_deliver()
            .withf(|mail| {
                mail.subject == "📈 오늘의 주식 추천"
                    && mail.from == "me@example.com"
                    && mail.to == "me@example.com"
                    && mail.body == "🏆 오늘의 추천 종목: AAPL (Apple Inc.)"
            })
            .times(1)
            .returning(|_| Ok(()));

        let summary = pipeline(provider.clone(), mailer).run().await.unwrap();

        assert_eq!(
            summary,
            RunSummary {
                candidates: 1,
                skipped: 1,
                recommendation: "🏆 오늘의 추천 종목: AAPL (Apple Inc.)".to_string(),
            }
        );
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_llm_failure_never_mails() {
        let provider = Arc::new(FakeProvider::failing());
        let mut mailer = MockMailer::new();
        mailer.expect_deliver().never();

        let err = pipeline(provider.clone(), mailer).run().await.unwrap_err();

        assert!(matches!(err, PickError::Llm(_)));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_mail_failure_fails_run() {
        let provider = Arc::new(FakeProvider::replying("pick"));
        let mut mailer = MockMailer::new();
        mailer
            .expect_deliver()
            .times(1)
            .returning(|_| Err(PickError::Mail("SMTP send failed".to_string())));

        let err = pipeline(provider, mailer).run().await.unwrap_err();
        assert!(matches!(err, PickError::Mail(_)));
    }
}
