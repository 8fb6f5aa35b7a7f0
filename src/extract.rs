//! Embedded-state extraction from share pages.
//!
//! Neither provider serves the folder listing through an API the page
//! documents; the client-side state is inlined into the HTML. cloud.mail
//! embeds a JavaScript assignment whose right-hand side is almost-JSON and
//! needs repair before parsing; yadi.sk embeds valid JSON in a dedicated
//! `<script id="store-prefetch">` element.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::error::{Result, ShareError};
use crate::models::{MailConfig, YandexPrefetch};

/// Assignment prefix of the cloud.mail embedded config.
const MAIL_CONFIG_PREFIX: &str = "window.cloudSettings =";

/// Marker tokens that identify the cloud.mail config script among the many
/// scripts on the page.
const MAIL_CONFIG_MARKERS: [&str; 2] = ["folder", "weblink_view"];

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("Invalid script selector"));

static PREFETCH_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script#store-prefetch").expect("Invalid prefetch selector")
});

/// Two-character JavaScript escape sequences (`\n`, `\u`, ...) left over
/// after quote and backslash repair. These are string-escaping artifacts of
/// the page, not valid JSON escapes.
static JS_ESCAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]").expect("Invalid escape regex"));

/// Trailing commas before a closing brace or bracket, which serde_json
/// rejects but the embedded payload may contain.
static TRAILING_COMMA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("Invalid comma regex"));

/// Find the cloud.mail config script in a share page.
///
/// Returns the text of the first `<script>` whose content carries both
/// marker tokens, or `None` if the page has no such script.
pub fn find_mail_config_script(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&SCRIPT_SELECTOR)
        .map(|element| element.text().collect::<String>())
        .find(|text| MAIL_CONFIG_MARKERS.iter().all(|marker| text.contains(marker)))
}

/// Find the yadi.sk prefetch script in a share page, selected by element id.
pub fn find_yandex_prefetch_script(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&PREFETCH_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>())
}

/// Repair the cloud.mail script body into parseable JSON.
///
/// The payload is a JavaScript assignment, not JSON: the prefix and the
/// final statement terminator have to go, and the string content carries
/// JavaScript escaping (`\"`, doubled backslashes, stray `\X` sequences)
/// that would break a strict parser. The repair is deliberately narrow;
/// this is not a JavaScript object-literal parser.
pub fn sanitize_mail_payload(script: &str) -> String {
    let body = script.trim();
    let body = body.strip_prefix(MAIL_CONFIG_PREFIX).unwrap_or(body).trim();

    // Drop the last statement terminator, if any.
    let body = match body.rfind(';') {
        Some(idx) => format!("{}{}", &body[..idx], &body[idx + 1..]),
        None => body.to_string(),
    };

    let body = body.replace("\\\"", "'").replace("\\\\", "");
    let body = JS_ESCAPE_REGEX.replace_all(&body, "");
    TRAILING_COMMA_REGEX.replace_all(&body, "$1").into_owned()
}

/// Extract and parse the cloud.mail config out of a share page.
pub fn parse_mail_page(url: &str, html: &str) -> Result<MailConfig> {
    let script = find_mail_config_script(html)
        .ok_or_else(|| ShareError::ConfigNotFound(url.to_string()))?;
    let repaired = sanitize_mail_payload(&script);
    Ok(serde_json::from_str(&repaired)?)
}

/// Extract and parse the yadi.sk prefetch payload out of a share page.
pub fn parse_yandex_page(url: &str, html: &str) -> Result<YandexPrefetch> {
    let script = find_yandex_prefetch_script(html)
        .ok_or_else(|| ShareError::ConfigNotFound(url.to_string()))?;
    Ok(serde_json::from_str(&script)?)
}
