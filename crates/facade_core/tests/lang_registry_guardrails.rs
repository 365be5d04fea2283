use std::collections::HashMap;

use facade_core::lang::accessibility::{self, Accessibility};
use facade_core::lang::contextual;
use facade_core::lang::keywords;
use facade_core::lang::punctuation;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(keywords::as_str(info.id), info.canonical, "keyword as_str mismatch for {:?}", info.id);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!("duplicate keyword spelling {:?}: {:?} and {:?}", info.canonical, prev, info.id);
        }
    }
}

#[test]
fn contextual_keywords_are_not_reserved() {
    for (id, spelling) in contextual::CONTEXTUAL_KEYWORDS {
        assert_eq!(
            keywords::from_str(spelling),
            None,
            "contextual keyword {:?} must not be reserved",
            id
        );
    }
}

#[test]
fn punctuation_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, punctuation::PunctuationId> = HashMap::new();

    for (id, spelling) in punctuation::PUNCTUATION {
        assert_eq!(punctuation::from_str(spelling), Some(*id));
        if let Some(prev) = seen.insert(spelling, *id) {
            panic!("duplicate punctuation spelling {:?}: {:?} and {:?}", spelling, prev, id);
        }
    }
}

#[test]
fn accessibility_table_is_total_over_recognized_levels() {
    let keywords: Vec<&str> = accessibility::RECOGNIZED
        .iter()
        .map(|level| accessibility::emission_keyword(*level).unwrap())
        .collect();
    assert_eq!(keywords, vec!["private", "private protected", "protected", "internal", "public"]);

    for level in [Accessibility::ProtectedOrInternal, Accessibility::File, Accessibility::NotApplicable] {
        assert!(!level.is_recognized());
    }
}
