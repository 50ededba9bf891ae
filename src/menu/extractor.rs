use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::model::MenuItem;

lazy_static! {
    static ref EATING_VERBS: Regex =
        Regex::new("먹었어|먹었다|먹음|드셨어|드셨다|드심|먹을래|먹자").unwrap();
    static ref TIME_WORDS: Regex = Regex::new("점심|저녁|아침|오늘|어제|내일").unwrap();
    static ref PARTICLES: Regex = Regex::new("에|을|를|이|가|은|는").unwrap();
    static ref HANGUL_RUN: Regex = Regex::new("[가-힣]{2,}").unwrap();
}

/// Deletes eating verbs, time words and particles, then trims.
pub fn strip_noise(utterance: &str) -> String {
    let s = EATING_VERBS.replace_all(utterance, "");
    let s = TIME_WORDS.replace_all(&s, "");
    let s = PARTICLES.replace_all(&s, "");
    s.trim().to_string()
}

/// Pulls a candidate menu name out of an utterance. The result is not yet
/// normalized against the catalog; see [`super::parser::parse_meal`].
pub fn extract(utterance: &str, catalog: &[MenuItem]) -> Option<String> {
    let cleaned = strip_noise(utterance);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(menu) = catalog
        .iter()
        .find(|m| cleaned.contains(m.name.as_str()) || m.name.contains(cleaned.as_str()))
    {
        debug!(menu = %menu.name, "direct match");
        return Some(menu.name.clone());
    }

    if let Some(m) = HANGUL_RUN.find(&cleaned) {
        debug!(extracted = m.as_str(), "hangul run");
        return Some(m.as_str().to_string());
    }

    if cleaned.chars().count() >= 2 {
        return Some(cleaned);
    }

    None
}

#[cfg(test)]
mod extractor_tests {
    use super::*;

    #[test]
    fn strips_verb_from_plain_statement() {
        assert_eq!(extract("김치찌개 먹었어", &[]).as_deref(), Some("김치찌개"));
    }

    #[test]
    fn strips_time_word_and_particle() {
        assert_eq!(extract("저녁에 파스타 먹음", &[]).as_deref(), Some("파스타"));
        assert_eq!(extract("어제 저녁은 제육볶음", &[]).as_deref(), Some("제육볶음"));
        assert_eq!(extract("감자탕을 먹었다", &[]).as_deref(), Some("감자탕"));
    }

    #[test]
    fn first_hangul_run_wins_over_latin() {
        assert_eq!(extract("점심에 pho랑 쌀국수", &[]).as_deref(), Some("쌀국수"));
    }

    #[test]
    fn non_hangul_text_is_kept_verbatim() {
        assert_eq!(extract("pizza 먹자", &[]).as_deref(), Some("pizza"));
        // jamo are not syllables, but two chars still pass the length floor
        assert_eq!(extract("ㅇㅇ", &[]).as_deref(), Some("ㅇㅇ"));
    }

    #[test]
    fn too_short_or_empty_is_none() {
        assert_eq!(extract("ㅇ", &[]), None);
        assert_eq!(extract("먹었어", &[]), None);
        assert_eq!(extract("  오늘 점심 먹었어 ", &[]), None);
    }

    #[test]
    fn noise_only_utterance_does_not_match_catalog() {
        let menus = vec![MenuItem::new("라멘", "일식")];
        assert_eq!(extract("먹었어", &menus), None);
    }

    #[test]
    fn catalog_name_short_circuits() {
        let menus = vec![MenuItem::new("초밥", "일식"), MenuItem::new("돈까스", "일식")];
        assert_eq!(
            extract("오늘 점심 돈까스정식 먹었어", &menus).as_deref(),
            Some("돈까스")
        );
        // cleaned text contained in a catalog name
        assert_eq!(extract("초 먹었어", &menus).as_deref(), Some("초밥"));
    }
}
