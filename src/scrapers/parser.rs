use std::collections::{HashMap, HashSet};

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::ScrapeConfig;
use crate::models::Listing;

/// How many ancestor levels to climb from an item anchor when looking
/// for the enclosing card. Bounds the walk so it can't escape into
/// page-level containers.
const CARD_WALK_DEPTH: usize = 4;

/// Build the search results URL for a given 1-based page number.
pub fn build_search_url(cfg: &ScrapeConfig, page: u32) -> String {
    if page > 1 {
        format!("{}{}?page={}", cfg.base_url, cfg.search_path, page)
    } else {
        format!("{}{}", cfg.base_url, cfg.search_path)
    }
}

/// Parse one rendered search results page into listings.
///
/// Within the page, listings sharing a link are collapsed to one entry:
/// first-seen position, last-seen fields.
pub fn parse_search_page(html: &str, cfg: &ScrapeConfig) -> Vec<Listing> {
    let document = Html::parse_document(html);
    let anchor_selector = item_anchor_selector(cfg);

    let mut listings = Vec::new();
    for (anchor, card) in resolve_card_roots(&document, &anchor_selector) {
        if let Some(listing) = extract_card(anchor, card, cfg) {
            listings.push(listing);
        }
    }

    dedup_by_link(listings)
}

/// Collapse listings to at most one per link. Position is where the
/// link was first seen, fields come from the last record carrying it.
pub fn dedup_by_link(listings: Vec<Listing>) -> Vec<Listing> {
    let mut order: Vec<String> = Vec::new();
    let mut by_link: HashMap<String, Listing> = HashMap::new();

    for listing in listings {
        if !by_link.contains_key(&listing.link) {
            order.push(listing.link.clone());
        }
        by_link.insert(listing.link.clone(), listing);
    }

    order
        .into_iter()
        .filter_map(|link| by_link.remove(&link))
        .collect()
}

/// Selector matching item-detail anchors: root-relative `/item/` paths
/// or absolute URLs to them under the configured site.
fn item_anchor_selector(cfg: &ScrapeConfig) -> Selector {
    let css = format!(
        r#"a[href^="/item/"], a[href^="{}/item/"]"#,
        cfg.base_url
    );
    Selector::parse(&css).unwrap()
}

/// Find the card root for every item anchor on the page.
///
/// Listing cards carry no stable class or attribute marker, so the card
/// boundary is inferred: climb from the anchor until an ancestor has at
/// least two direct child elements (a composite block, likely the card
/// rather than a sub-wrapper). If nothing qualifies within
/// `CARD_WALK_DEPTH` levels, the anchor itself is the (degenerate) card.
/// Anchors whose chosen root was already claimed by an earlier anchor
/// are skipped outright; their card was already captured.
fn resolve_card_roots<'a>(
    document: &'a Html,
    anchor_selector: &Selector,
) -> Vec<(ElementRef<'a>, ElementRef<'a>)> {
    let mut seen_roots = HashSet::new();
    let mut cards = Vec::new();

    for anchor in document.select(anchor_selector) {
        let mut card = None;
        let mut node = anchor.parent();
        for _ in 0..CARD_WALK_DEPTH {
            let Some(parent) = node else { break };
            if let Some(element) = ElementRef::wrap(parent) {
                let child_elements =
                    element.children().filter_map(ElementRef::wrap).count();
                if child_elements >= 2 {
                    card = Some(element);
                    break;
                }
            }
            node = parent.parent();
        }

        let root = card.unwrap_or(anchor);
        if !seen_roots.insert(root.id()) {
            continue;
        }
        cards.push((anchor, root));
    }

    cards
}

/// Pull the record fields out of one card subtree.
///
/// Returns `None` when no link or no title can be derived; that card
/// simply yields no record.
fn extract_card(
    anchor: ElementRef,
    card: ElementRef,
    cfg: &ScrapeConfig,
) -> Option<Listing> {
    let href = anchor.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    let link = resolve_link(&cfg.base_url, href);

    let title = extract_title(anchor)?;

    // Price: first ₹-prefixed number anywhere in the card's text.
    let full_text = collapse_text(card);
    let price_re = Regex::new(r"₹\s?[\d,]+").unwrap();
    let price = price_re.find(&full_text).map(|m| m.as_str().to_string());

    // Short descendant texts feed the location and posted heuristics.
    let meta_selector = Selector::parse("span, p, div").unwrap();
    let meta_texts: Vec<String> = card
        .select(&meta_selector)
        .map(collapse_text)
        .filter(|text| !text.is_empty())
        .collect();

    let location = meta_texts
        .iter()
        .find(|text| looks_like_location(text))
        .cloned();
    let posted = meta_texts.iter().find_map(|text| normalize_posted(text));

    let ad_id_re = Regex::new(r"\d{6,}").unwrap();
    let ad_id = ad_id_re.find(&link).map(|m| m.as_str().to_string());

    Some(Listing {
        title,
        price,
        location,
        posted,
        link,
        ad_id,
    })
}

/// Title cascade: heading-like elements inside the anchor in priority
/// order, falling back to the anchor's own text.
fn extract_title(anchor: ElementRef) -> Option<String> {
    for css in ["h6", "h5", "h4", "h3", r#"[role="heading"]"#, "p"] {
        let selector = Selector::parse(css).unwrap();
        if let Some(element) = anchor.select(&selector).next() {
            let text = collapse_text(element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }

    let fallback = collapse_text(anchor);
    if fallback.is_empty() {
        None
    } else {
        Some(fallback)
    }
}

/// All text under an element, whitespace-trimmed and space-joined.
fn collapse_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a (possibly relative) href against the site base URL.
fn resolve_link(base_url: &str, href: &str) -> String {
    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Short free-text label that isn't a price and isn't a recency phrase.
fn looks_like_location(text: &str) -> bool {
    text.chars().count() <= 40
        && !text.starts_with('₹')
        && !looks_timey(text)
        && text.chars().any(|c| c.is_ascii_alphabetic())
}

/// Whether the text reads like a relative-time phrase.
fn looks_timey(text: &str) -> bool {
    let lower = text.to_lowercase();
    [
        "ago", "today", "yesterday", "hour", "minute", "week", "day", "month",
    ]
    .iter()
    .any(|word| lower.contains(word))
}

/// Normalize one metadata text into a posted-recency label, if it is one.
///
/// Accepted, in priority order: "today", "yesterday", "N days ago" with
/// N in 2..=6, or a `MON DD` date token returned verbatim.
fn normalize_posted(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();

    if lower.contains("today") {
        return Some("today".to_string());
    }
    if lower.contains("yesterday") {
        return Some("yesterday".to_string());
    }

    let days_re = Regex::new(r"^(\d+)\s+days?\s+ago$").unwrap();
    if let Some(caps) = days_re.captures(&lower) {
        if let Ok(days) = caps[1].parse::<u32>() {
            if (2..=6).contains(&days) {
                return Some(format!("{} days ago", days));
            }
        }
    }

    let month_re = Regex::new(
        r"^(JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)\s+\d{1,2}$",
    )
    .unwrap();
    if month_re.is_match(&trimmed.to_uppercase()) {
        return Some(trimmed.to_string());
    }

    None
}
