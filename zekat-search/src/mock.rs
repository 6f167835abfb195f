//! Built-in demo corpus used when the webhook is unavailable.
//!
//! The filter never returns an empty set: when nothing matches, the first
//! [`FALLBACK_LEN`] records are returned as-is.

use crate::types::ResearchRecord;

/// Number of records returned when the filter matches nothing.
pub const FALLBACK_LEN: usize = 5;

/// Query words must be longer than this (in characters) to match alone.
const MIN_WORD_CHARS: usize = 2;

struct MockEntry {
    title: &'static str,
    authors: &'static [&'static str],
    year: &'static str,
    abstract_text: &'static str,
}

const MOCK_ENTRIES: &[MockEntry] = &[
    MockEntry {
        title: "Zekât Hesaplama Yöntemleri ve Modern Uygulamaları",
        authors: &["Dr. Ahmet Yılmaz", "Prof. Dr. Fatma Kaya"],
        year: "2023",
        abstract_text: "Bu çalışma modern zekât hesaplama yöntemlerini incelemektedir.",
    },
    MockEntry {
        title: "İslami Finans Sisteminde Sadaka ve Vakıf Kurumları",
        authors: &["Prof. Dr. Mehmet Özkan"],
        year: "2022",
        abstract_text: "İslami finans sisteminde zekât'ın önemini ele alan kapsamlı bir araştırma.",
    },
    MockEntry {
        title: "Çağdaş Zekât Sorunları ve Çözüm Önerileri",
        authors: &["Dr. Ayşe Demir", "Dr. Hasan Çelik"],
        year: "2023",
        abstract_text: "Modern dönemde karşılaşılan zekât sorunları ve çözüm önerileri.",
    },
    MockEntry {
        title: "Zekât Mallarının Değerlendirilmesi",
        authors: &["Prof. Dr. Ali Şahin"],
        year: "2021",
        abstract_text: "Zekât mallarının tespiti ve değerlendirilmesi üzerine detaylı inceleme.",
    },
    MockEntry {
        title: "İslami Ekonomide Sosyal Adalet ve Gelir Dağılımı",
        authors: &["Dr. Zeynep Arslan"],
        year: "2023",
        abstract_text: "Zekât'ın sosyal adalet açısından önemini inceleyen akademik çalışma.",
    },
];

impl MockEntry {
    fn to_record(&self) -> ResearchRecord {
        ResearchRecord::new(self.title)
            .with_authors(self.authors.iter().copied())
            .with_year(self.year)
            .with_abstract(self.abstract_text)
    }
}

/// The full demo corpus, in its fixed order.
pub fn corpus() -> Vec<ResearchRecord> {
    MOCK_ENTRIES.iter().map(MockEntry::to_record).collect()
}

/// Filter the demo corpus for `query`.
///
/// A record matches when its lowercased title contains the whole lowercased
/// query, or any space-separated query word longer than two characters.
/// Returns the first [`FALLBACK_LEN`] records when nothing matches.
pub fn filter(query: &str) -> Vec<ResearchRecord> {
    let needle = query.to_lowercase();
    let words: Vec<&str> = needle
        .split(' ')
        .filter(|word| word.chars().count() > MIN_WORD_CHARS)
        .collect();

    let matched: Vec<ResearchRecord> = MOCK_ENTRIES
        .iter()
        .filter(|entry| {
            let title = entry.title.to_lowercase();
            title.contains(&needle) || words.iter().any(|word| title.contains(word))
        })
        .map(MockEntry::to_record)
        .collect();

    if matched.is_empty() {
        MOCK_ENTRIES
            .iter()
            .take(FALLBACK_LEN)
            .map(MockEntry::to_record)
            .collect()
    } else {
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_has_five_records() {
        assert_eq!(corpus().len(), 5);
    }

    #[test]
    fn unmatched_query_returns_first_five() {
        let results = filter("xyz123");
        assert_eq!(results.len(), FALLBACK_LEN);
        assert_eq!(results, corpus()[..FALLBACK_LEN].to_vec());
    }

    #[test]
    fn zekat_matches_three_titles_case_insensitively() {
        let titles: Vec<_> = filter("zekât").into_iter().map(|r| r.title).collect();
        assert_eq!(
            titles,
            vec![
                "Zekât Hesaplama Yöntemleri ve Modern Uygulamaları",
                "Çağdaş Zekât Sorunları ve Çözüm Önerileri",
                "Zekât Mallarının Değerlendirilmesi",
            ]
        );
    }

    #[test]
    fn any_long_word_matches() {
        let titles: Vec<_> = filter("kurumlar adalet").into_iter().map(|r| r.title).collect();
        assert_eq!(
            titles,
            vec![
                "İslami Finans Sisteminde Sadaka ve Vakıf Kurumları",
                "İslami Ekonomide Sosyal Adalet ve Gelir Dağılımı",
            ]
        );
    }

    #[test]
    fn short_words_do_not_match_alone() {
        // "ve" occurs in several titles but is too short to count as a word match.
        assert_eq!(filter("ve qqq"), corpus());
    }

    #[test]
    fn whole_query_substring_matches() {
        let results = filter("Mallarının DEĞER");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Zekât Mallarının Değerlendirilmesi");
    }

    #[test]
    fn filter_is_deterministic() {
        assert_eq!(filter("finans"), filter("finans"));
    }

    #[test]
    fn records_carry_authors_and_year() {
        let first = &corpus()[0];
        assert_eq!(first.authors.len(), 2);
        assert_eq!(first.year.as_deref(), Some("2023"));
        assert!(first.doi.is_none());
    }

    #[test]
    fn every_abstract_is_about_zekat() {
        for record in corpus() {
            let text = record.abstract_text.expect("abstract").to_lowercase();
            assert!(text.contains("zekât"), "{text}");
        }
    }
}
