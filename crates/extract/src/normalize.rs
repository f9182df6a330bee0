// ABOUTME: Text normalization for selected elements: trimmed text, tag groups, and link fields.
// ABOUTME: Also resolves root-relative hrefs against the scheme and authority of the source page.

//! Text normalization.
//!
//! Two inner-text flavours are used:
//! - [`stripped_text`]: every text node trimmed on its own, empties dropped,
//!   pieces joined with no separator. Catalog entry pages render tags as
//!   adjacent spans, so this is what makes `"10.Fantasy"` and `"20.Drama"`
//!   read as `"10.Fantasy20.Drama"`.
//! - [`inner_text`]: all text concatenated, then trimmed once.

use scraper::ElementRef;

/// Separator between tag tokens in the tag container's text.
pub const TAG_DELIMITER: char = '.';

/// Text nodes trimmed individually and concatenated.
pub fn stripped_text(el: &ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Full text content, trimmed at both ends.
pub fn inner_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Cleaned text of a description element.
pub fn description_text(el: &ElementRef<'_>) -> String {
    stripped_text(el)
}

/// Splits tag container text into tokens.
///
/// Each candidate between periods is trimmed, stripped of every numeric
/// character (anywhere in the token, not only at the ends), trimmed again, and
/// dropped if nothing remains. `"10.Fantasy20.Drama"` gives `["Fantasy", "Drama"]`.
pub fn clean_tag_group(text: &str) -> Vec<String> {
    text.split(TAG_DELIMITER)
        .map(|candidate| strip_digits(candidate.trim()))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

fn strip_digits(s: &str) -> String {
    s.chars().filter(|c| !c.is_numeric()).collect()
}

/// Link title: the title attribute when present and non-blank, else the anchor text.
pub fn link_title(anchor: &ElementRef<'_>, title_attr: &str) -> String {
    match anchor.value().attr(title_attr).map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => inner_text(anchor),
    }
}

/// The `scheme://authority` prefix of a URL: its first three `/`-separated pieces.
pub fn site_root(source: &str) -> String {
    source.split('/').take(3).collect::<Vec<_>>().join("/")
}

/// Resolves a root-relative href against the page it was found on.
///
/// Any other form (absolute, page-relative, fragment) is returned as-is.
pub fn resolve_href(source: &str, raw: &str) -> String {
    if raw.starts_with('/') {
        format!("{}{}", site_root(source), raw)
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        let sel = Selector::parse(css).unwrap();
        doc.select(&sel).next().unwrap()
    }

    #[test]
    fn clean_tag_group_keeps_clean_token() {
        assert_eq!(clean_tag_group("Action"), vec!["Action"]);
    }

    #[test]
    fn clean_tag_group_strips_counts_and_splits_on_period() {
        assert_eq!(clean_tag_group("10.Fantasy20.Drama"), vec!["Fantasy", "Drama"]);
    }

    #[test]
    fn clean_tag_group_removes_digits_mid_token() {
        assert_eq!(clean_tag_group("Action10"), vec!["Action"]);
        assert_eq!(clean_tag_group("1990s"), vec!["s"]);
        assert_eq!(clean_tag_group("R2018"), vec!["R"]);
        assert_eq!(clean_tag_group("Sci2Fi"), vec!["SciFi"]);
    }

    #[test]
    fn clean_tag_group_drops_digit_only_and_empty_tokens() {
        assert!(clean_tag_group("1999").is_empty());
        assert!(clean_tag_group("").is_empty());
        assert!(clean_tag_group("..1.2..").is_empty());
    }

    #[test]
    fn clean_tag_group_trims_around_removed_digits() {
        assert_eq!(
            clean_tag_group(" Slice of Life 12 . 3 Romance "),
            vec!["Slice of Life", "Romance"]
        );
    }

    #[test]
    fn clean_tag_group_does_not_split_on_comma() {
        assert_eq!(clean_tag_group("Drama, Comedy"), vec!["Drama, Comedy"]);
    }

    #[test]
    fn stripped_text_joins_trimmed_nodes() {
        let doc = Html::parse_fragment(
            "<div id='t'> <span> 10.Fantasy </span>\n<span>20.Drama</span> </div>",
        );
        let el = first(&doc, "#t");
        assert_eq!(stripped_text(&el), "10.Fantasy20.Drama");
    }

    #[test]
    fn inner_text_trims_only_the_ends() {
        let doc = Html::parse_fragment("<a id='a'>  Hello <b>big</b> world \n</a>");
        let el = first(&doc, "#a");
        assert_eq!(inner_text(&el), "Hello big world");
    }

    #[test]
    fn description_text_is_trimmed() {
        let doc = Html::parse_fragment("<p class='d'>\n  Ein schönes Spiel.  \n</p>");
        assert_eq!(description_text(&first(&doc, ".d")), "Ein schönes Spiel.");
    }

    #[test]
    fn link_title_prefers_attribute() {
        let doc = Html::parse_fragment(r#"<a id="a" title=" Full Title ">Short</a>"#);
        assert_eq!(link_title(&first(&doc, "#a"), "title"), "Full Title");
    }

    #[test]
    fn link_title_falls_back_to_text_when_blank() {
        let doc = Html::parse_fragment(r#"<a id="a" title="  "> Short </a><a id="b">Other</a>"#);
        assert_eq!(link_title(&first(&doc, "#a"), "title"), "Short");
        assert_eq!(link_title(&first(&doc, "#b"), "title"), "Other");
    }

    #[test]
    fn resolve_href_prefixes_root_relative() {
        assert_eq!(
            resolve_href("https://example.org/v2002", "/v92"),
            "https://example.org/v92"
        );
    }

    #[test]
    fn resolve_href_keeps_port_and_drops_query() {
        assert_eq!(
            resolve_href("http://localhost:8080/v?p=1&s=24M", "/v7"),
            "http://localhost:8080/v7"
        );
    }

    #[test]
    fn resolve_href_passes_other_forms_through() {
        assert_eq!(
            resolve_href("https://example.org/v2002", "https://other.org/x"),
            "https://other.org/x"
        );
        assert_eq!(resolve_href("https://example.org/a/b", "c/d"), "c/d");
        assert_eq!(resolve_href("https://example.org/a", "#top"), "#top");
    }

    #[test]
    fn site_root_of_bare_host() {
        assert_eq!(site_root("https://example.org"), "https://example.org");
    }
}
