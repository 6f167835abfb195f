//! Plain-text rendering of the search view.
//!
//! Every function returns a `String` so the session loop and the one-shot
//! commands decide where output goes. Nothing here performs I/O.

use std::fmt::Write as _;

use zekat_search::{ResearchRecord, ResultSource};

use crate::controller::ViewState;
use crate::history::SearchHistory;
use crate::status::ApiStatus;

const TITLE_LIMIT: usize = 120;
const ABSTRACT_LIMIT: usize = 150;
const SKELETON_CARDS: usize = 8;

/// Popular searches offered before anything is typed.
pub const POPULAR_TERMS: [&str; 5] = [
    "zekât hesaplama",
    "İslami finans",
    "zekât dağıtımı",
    "modern zekât",
    "İslami ekonomi",
];

/// Suggestions offered when a search finds nothing.
pub const EMPTY_SUGGESTIONS: [&str; 5] = ["zekât", "vergi", "finans", "İslami", "ekonomi"];

/// Cut `text` to `limit` characters, appending `...` when anything was cut.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_owned(),
    }
}

/// First two authors, with a marker when there are more.
pub fn author_line(authors: &[String]) -> Option<String> {
    if authors.is_empty() {
        return None;
    }
    let mut line = authors.iter().take(2).map(String::as_str).collect::<Vec<_>>().join(", ");
    if authors.len() > 2 {
        line.push_str(" ve diğerleri");
    }
    Some(line)
}

/// One result card. `index` is zero-based.
pub fn render_card(record: &ResearchRecord, index: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {}", truncate_chars(&record.title, TITLE_LIMIT));
    if let Some(authors) = author_line(&record.authors) {
        let _ = writeln!(out, "    Yazarlar: {authors}");
    }
    if let Some(year) = &record.year {
        let _ = writeln!(out, "    Yıl: {year}");
    }
    if let Some(abstract_text) = &record.abstract_text {
        let _ = writeln!(out, "    {}", truncate_chars(abstract_text, ABSTRACT_LIMIT));
    }

    let _ = write!(out, "    Araştırma #{}", index + 1);
    if record.doi.is_some() {
        out.push_str("  [DOI]");
    }
    out.push('\n');
    if let Some(link) = record.link() {
        let _ = writeln!(out, "    -> {link}");
    }
    out
}

/// Status badge shown next to the results header.
pub fn status_badge(status: ApiStatus) -> &'static str {
    match status {
        ApiStatus::Checking => "Kontrol ediliyor...",
        ApiStatus::Online => "N8N + TRDizin",
        ApiStatus::Offline => "Demo Veri",
    }
}

/// Notice line below the header while a query is active.
///
/// `offline_warning` is true while the temporary offline warning is still
/// visible.
pub fn status_notice(status: ApiStatus, offline_warning: bool) -> Option<&'static str> {
    match status {
        ApiStatus::Offline if offline_warning => {
            Some("Uyarı: Arama servisine ulaşılamıyor. Demo veriler gösteriliyor.")
        }
        ApiStatus::Offline => Some("Demo modu: Sonuçlar örnek verilerden geliyor."),
        ApiStatus::Online => Some("Canlı veri: Sonuçlar N8N ve TRDizin üzerinden geliyor."),
        ApiStatus::Checking => None,
    }
}

/// Results header, notice and cards.
pub fn render_results(
    query: &str,
    results: &[ResearchRecord],
    status: ApiStatus,
    offline_warning: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\"{query}\" için {} sonuç bulundu  [{}]",
        results.len(),
        status_badge(status)
    );
    if let Some(notice) = status_notice(status, offline_warning) {
        let _ = writeln!(out, "{notice}");
    }
    for (index, record) in results.iter().enumerate() {
        out.push('\n');
        out.push_str(&render_card(record, index));
    }
    out
}

/// Skeleton placeholder shown while a search is in flight.
pub fn render_loading() -> String {
    let mut out = String::from("Aranıyor...\n");
    for _ in 0..SKELETON_CARDS {
        out.push_str("  ░░░░░░░░░░░░░░░░░░░░░░░░\n");
    }
    out
}

/// Shown when a search completed with no records.
pub fn render_empty(query: &str) -> String {
    let mut out = String::from("Sonuç Bulunamadı\n");
    let _ = writeln!(
        out,
        "\"{query}\" için arama kriterlerinize uygun araştırma bulunamadı."
    );
    let _ = writeln!(out, "Arama önerileri: {}", EMPTY_SUGGESTIONS.join(", "));
    out.push_str("Aramayı temizlemek için :clear yazın.\n");
    out
}

/// How an error message is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The API refused cross-origin access.
    Cors,
    /// The network or connection failed.
    Network,
    Other,
}

impl ErrorKind {
    pub fn classify(message: &str) -> Self {
        if ["CORS", "cors", "Cross-Origin"]
            .iter()
            .any(|needle| message.contains(needle))
        {
            Self::Cors
        } else if ["fetch", "network", "bağlantı"]
            .iter()
            .any(|needle| message.contains(needle))
        {
            Self::Network
        } else {
            Self::Other
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Cors => "API Erişim Sorunu",
            Self::Network => "Bağlantı Sorunu",
            Self::Other => "Bir Hata Oluştu",
        }
    }
}

/// Error panel with a retry hint.
pub fn render_error(message: &str) -> String {
    let kind = ErrorKind::classify(message);
    let mut out = String::new();
    let _ = writeln!(out, "{}", kind.title());
    match kind {
        ErrorKind::Cors => {
            out.push_str(
                "Harici API CORS politikası nedeniyle erişilemiyor. Demo veriler gösteriliyor.\n",
            );
        }
        _ => {
            let _ = writeln!(out, "{message}");
        }
    }
    out.push_str("Tekrar denemek için :retry yazın.\n");
    match kind {
        ErrorKind::Cors => out.push_str("API sağlayıcısı CORS ayarlarını kontrol etmelidir.\n"),
        ErrorKind::Network => {
            out.push_str("İnternet bağlantınızı kontrol edin ve tekrar deneyin.\n");
        }
        ErrorKind::Other => {}
    }
    if kind != ErrorKind::Other {
        out.push_str("Sistem demo verilerle çalışmaya devam ediyor.\n");
    }
    out
}

/// Landing text before any query.
pub fn render_welcome() -> String {
    let mut out = String::from("Zekât ve İslami finans alanında akademik araştırmaları keşfedin.\n");
    let _ = writeln!(out, "Popüler aramalar: {}", POPULAR_TERMS.join(", "));
    out
}

/// Numbered history list, newest first.
pub fn render_history(history: &SearchHistory) -> String {
    if history.is_empty() {
        return "Arama geçmişi boş.\n".to_owned();
    }
    let mut out = String::from("Son aramalar:\n");
    for (index, entry) in history.entries().iter().enumerate() {
        let _ = writeln!(out, "  {}. {entry}", index + 1);
    }
    out
}

/// Hint shown under the input when it is too short to search.
pub fn input_hint(input: &str, min_chars: usize) -> Option<String> {
    let len = input.trim().chars().count();
    (len > 0 && len < min_chars)
        .then(|| format!("Arama yapmak için en az {min_chars} karakter girmelisiniz"))
}

/// Everything the results area shows for the current state.
pub fn render_view(
    state: &ViewState,
    query: &str,
    status: ApiStatus,
    offline_warning: bool,
) -> String {
    match state {
        ViewState::Idle => render_welcome(),
        ViewState::Loading => render_loading(),
        ViewState::Error { message } => render_error(message),
        ViewState::Success { results, .. } if results.is_empty() => render_empty(query),
        ViewState::Success { results, source } => {
            let status = match source {
                ResultSource::Fallback if status != ApiStatus::Offline => ApiStatus::Offline,
                _ => status,
            };
            render_results(query, results, status, offline_warning)
        }
    }
}
