//! Output languages
//!
//! The language picks the prompt wording, the console progress lines and the
//! mail subject. Korean is the default.

use std::fmt;

/// Supported output languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// Korean
    #[default]
    Korean,
    /// English
    English,
}

impl Language {
    /// Get ISO 639-1 language code
    pub fn code(self) -> &'static str {
        match self {
            Self::Korean => "ko",
            Self::English => "en",
        }
    }

    /// Progress line printed before collection
    pub fn collecting(self) -> &'static str {
        match self {
            Self::Korean => "후보 종목 수집 중...",
            Self::English => "Collecting candidates...",
        }
    }

    /// Progress line reporting the candidate count
    pub fn candidates_found(self, count: usize) -> String {
        match self {
            Self::Korean => format!("{count}개 후보 발견"),
            Self::English => format!("{count} candidates found"),
        }
    }

    /// Progress line printed before the model call
    pub fn analyzing(self) -> &'static str {
        match self {
            Self::Korean => "Claude 분석 중...",
            Self::English => "Analyzing with Claude...",
        }
    }

    /// Progress line printed before mail delivery
    pub fn sending(self) -> &'static str {
        match self {
            Self::Korean => "이메일 발송 중...",
            Self::English => "Sending email...",
        }
    }

    /// Final progress line
    pub fn done(self) -> &'static str {
        match self {
            Self::Korean => "완료!",
            Self::English => "Done!",
        }
    }

    /// Subject of the recommendation mail
    pub fn mail_subject(self) -> &'static str {
        match self {
            Self::Korean => "📈 오늘의 주식 추천",
            Self::English => "📈 Today's stock pick",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
