//! Match providers: suppliers of autocomplete candidates for pending input.

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use super::payload::Payload;

/// Pull-based supplier of ordered candidates, queried synchronously whenever
/// pending input changes.
pub trait MatchProvider<P> {
    fn matches_for(&mut self, input: &str) -> Vec<P>;
}

impl<P, F> MatchProvider<P> for F
where
    F: FnMut(&str) -> Vec<P>,
{
    fn matches_for(&mut self, input: &str) -> Vec<P> {
        self(input)
    }
}

/// Fuzzy matcher over a fixed candidate list, scoring titles and subtitles.
///
/// Blank input yields no matches. Results are ordered by descending score,
/// ties keeping candidate order.
pub struct FuzzyMatcher<P> {
    candidates: Vec<P>,
    matcher: Matcher,
    limit: Option<usize>,
}

impl<P: Payload> FuzzyMatcher<P> {
    pub fn new(candidates: Vec<P>) -> Self {
        Self {
            candidates,
            matcher: Matcher::new(Config::DEFAULT),
            limit: None,
        }
    }

    /// Cap the number of matches returned
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn candidates(&self) -> &[P] {
        &self.candidates
    }
}

fn haystack<P: Payload>(candidate: &P) -> String {
    match candidate.subtitle() {
        Some(subtitle) => format!("{} {}", candidate.title(), subtitle),
        None => candidate.title(),
    }
}

impl<P: Payload> MatchProvider<P> for FuzzyMatcher<P> {
    fn matches_for(&mut self, input: &str) -> Vec<P> {
        let query = input.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let mut buf = Vec::new();
        let mut scored: Vec<(u32, usize)> = Vec::new();
        for (index, candidate) in self.candidates.iter().enumerate() {
            let text = haystack(candidate);
            if let Some(score) = pattern.score(Utf32Str::new(&text, &mut buf), &mut self.matcher) {
                scored.push((score, index));
            }
        }
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        let limit = self.limit.unwrap_or(scored.len());
        tracing::trace!(query, found = scored.len(), "fuzzy matches");
        scored
            .into_iter()
            .take(limit)
            .map(|(_, index)| self.candidates[index].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["Alice Adams", "Bob Brown", "Alicia Keys", "Carol"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_blank_input_has_no_matches() {
        let mut m = FuzzyMatcher::new(names());
        assert!(m.matches_for("").is_empty());
        assert!(m.matches_for("   ").is_empty());
    }

    #[test]
    fn test_fuzzy_matches_filter_candidates() {
        let mut m = FuzzyMatcher::new(names());
        let found = m.matches_for("ali");
        assert_eq!(found.len(), 2);
        assert!(found.contains(&"Alice Adams".to_string()));
        assert!(found.contains(&"Alicia Keys".to_string()));
    }

    #[test]
    fn test_fuzzy_matches_ignore_case() {
        let mut m = FuzzyMatcher::new(names());
        assert_eq!(m.matches_for("BOB"), vec!["Bob Brown".to_string()]);
    }

    #[test]
    fn test_limit() {
        let mut m = FuzzyMatcher::new(names()).with_limit(1);
        assert_eq!(m.matches_for("ali").len(), 1);
    }

    #[test]
    fn test_closure_provider() {
        let mut provider = |input: &str| vec![input.to_uppercase()];
        assert_eq!(provider.matches_for("x"), vec!["X".to_string()]);
    }
}
