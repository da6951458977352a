use crate::domain::ports::Translator;
use rand::Rng;
use std::time::Duration;

/// Proper nouns kept in their canonical spelling after translation.
pub const DEFAULT_EXCEPTIONAL_TERMS: &[&str] = &[
    "AWS Control Tower",
    "AWS Glue",
    "Amazon SageMaker",
    "AWS Lambda",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub backoff_min: Duration,
    pub backoff_max: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, backoff_min: Duration, backoff_max: Duration) -> Self {
        Self {
            max_attempts,
            backoff_min,
            backoff_max: backoff_max.max(backoff_min),
        }
    }

    /// Uniform jitter inside the backoff range.
    pub fn next_delay(&self) -> Duration {
        let min = self.backoff_min.as_millis() as u64;
        let max = self.backoff_max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

/// Wraps a translator so that a call never fails: after the last attempt the
/// source text comes back untouched.
pub struct SafeTranslator<T: Translator> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: Translator> SafeTranslator<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub async fn translate(&self, text: &str, dest: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        for attempt in 1..=self.policy.max_attempts {
            if attempt > 1 {
                let delay = self.policy.next_delay();
                tracing::debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Backing off before translation retry"
                );
                tokio::time::sleep(delay).await;
            }

            match self.inner.translate(text, dest).await {
                Ok(translated) => return translated,
                Err(e) => tracing::warn!(
                    "Translation error (attempt {}/{}): {}",
                    attempt,
                    self.policy.max_attempts,
                    e
                ),
            }
        }

        tracing::warn!(
            "Translation failed, keeping source text: {}",
            text.chars().take(50).collect::<String>()
        );
        text.to_string()
    }
}

/// Translated spelling → canonical spelling for each exceptional term.
#[derive(Debug, Clone, Default)]
pub struct ExceptionalTerms {
    pairs: Vec<(String, String)>,
}

impl ExceptionalTerms {
    /// Translates every term once so later output can be mapped back.
    pub async fn prepare<T: Translator>(
        translator: &SafeTranslator<T>,
        terms: &[String],
        dest: &str,
    ) -> Self {
        let mut pairs = Vec::with_capacity(terms.len());
        for term in terms {
            let translated = translator.translate(term, dest).await;
            tracing::debug!("Exceptional term '{}' translates to '{}'", term, translated);
            pairs.push((translated, term.clone()));
        }
        Self { pairs }
    }

    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Plain substring replacement, no word-boundary checks.
    pub fn restore(&self, text: &str) -> String {
        self.pairs
            .iter()
            .filter(|(translated, canonical)| !translated.is_empty() && translated != canonical)
            .fold(text.to_string(), |acc, (translated, canonical)| {
                acc.replace(translated.as_str(), canonical)
            })
    }
}

/// Translation plus exceptional-term restoration into one destination language.
pub struct Localizer<T: Translator> {
    translator: SafeTranslator<T>,
    terms: ExceptionalTerms,
    dest: String,
}

impl<T: Translator> Localizer<T> {
    pub async fn prepare(translator: SafeTranslator<T>, terms: &[String], dest: &str) -> Self {
        let terms = ExceptionalTerms::prepare(&translator, terms, dest).await;
        Self {
            translator,
            terms,
            dest: dest.to_string(),
        }
    }

    pub async fn localize(&self, text: &str) -> String {
        let translated = self.translator.translate(text, &self.dest).await;
        self.terms.restore(&translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{DigestError, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn instant_policy(max_attempts: usize) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    struct Dictionary(HashMap<&'static str, &'static str>);

    #[async_trait]
    impl Translator for Dictionary {
        async fn translate(&self, text: &str, _dest: &str) -> Result<String> {
            Ok(self.0.get(text).map(|s| s.to_string()).unwrap_or_else(|| text.to_string()))
        }
    }

    struct Flaky {
        failures_left: AtomicUsize,
        calls: Arc<AtomicUsize>,
    }

    impl Flaky {
        fn new(failures: usize) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    failures_left: AtomicUsize::new(failures),
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl Translator for Flaky {
        async fn translate(&self, text: &str, _dest: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(DigestError::TranslationError {
                    message: "rate limited".to_string(),
                });
            }
            Ok(format!("[ja] {}", text))
        }
    }

    #[test]
    fn test_next_delay_stays_in_range() {
        let policy = RetryPolicy::new(3, Duration::from_millis(10), Duration::from_millis(30));
        for _ in 0..100 {
            let delay = policy.next_delay();
            assert!(delay >= Duration::from_millis(10) && delay <= Duration::from_millis(30));
        }
    }

    #[test]
    fn test_inverted_backoff_is_clamped() {
        let policy = RetryPolicy::new(1, Duration::from_secs(3), Duration::from_secs(1));
        assert_eq!(policy.backoff_max, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_blank_text_skips_translation() {
        let (flaky, calls) = Flaky::new(0);
        let translator = SafeTranslator::new(flaky, instant_policy(3));
        assert_eq!(translator.translate("   ", "ja").await, "   ");
        assert_eq!(translator.translate("", "ja").await, "");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let (flaky, calls) = Flaky::new(1);
        let translator = SafeTranslator::new(flaky, instant_policy(2));
        assert_eq!(translator.translate("Hello", "ja").await, "[ja] Hello");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_all_attempts_failing_returns_source_text() {
        let (flaky, calls) = Flaky::new(usize::MAX);
        let translator = SafeTranslator::new(flaky, instant_policy(3));
        assert_eq!(translator.translate("Hello <b>", "ja").await, "Hello <b>");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_sleeps_between_attempts_only() {
        let (flaky, _) = Flaky::new(usize::MAX);
        let policy = RetryPolicy::new(3, Duration::from_secs(1), Duration::from_secs(3));
        let translator = SafeTranslator::new(flaky, policy);

        let started = tokio::time::Instant::now();
        translator.translate("Hello", "ja").await;
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed <= Duration::from_secs(6));
    }

    #[tokio::test]
    async fn test_exceptional_terms_are_restored() {
        let dictionary = Dictionary(HashMap::from([
            ("AWS Glue", "AWS接着剤"),
            ("Amazon EC2", "Amazon EC2"),
            ("AWS Glue now supports X", "AWS接着剤がXをサポート"),
        ]));
        let translator = SafeTranslator::new(dictionary, instant_policy(1));
        let terms = vec!["AWS Glue".to_string(), "Amazon EC2".to_string()];
        let localizer = Localizer::prepare(translator, &terms, "ja").await;

        assert_eq!(
            localizer.localize("AWS Glue now supports X").await,
            "AWS GlueがXをサポート"
        );
    }

    #[test]
    fn test_restore_ignores_empty_and_identity_pairs() {
        let terms = ExceptionalTerms::from_pairs(vec![
            (String::new(), "AWS Lambda".to_string()),
            ("AWS Lambda".to_string(), "AWS Lambda".to_string()),
        ]);
        assert_eq!(terms.restore("abc"), "abc");
    }

    #[test]
    fn test_restore_is_naive_substring_replacement() {
        let terms =
            ExceptionalTerms::from_pairs(vec![("接着剤".to_string(), "AWS Glue".to_string())]);
        assert_eq!(terms.restore("瞬間接着剤"), "瞬間AWS Glue");
    }
}
