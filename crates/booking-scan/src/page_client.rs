use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use reqwest::header;
use scraper::{Html, Selector};
use tracing::debug;

use crate::scan_types::ScanError;

/// CSS selector for the slot date labels on the booking page.
const DATE_SELECTOR: &str = ".date a.title";

/// Date formats the booking page has been observed to use, tried in order.
const DATE_FORMATS: &[&str] = &["%A, %B %d, %Y", "%B %d, %Y", "%Y-%m-%d"];

/// Client for the booking page that lists available appointment slots.
///
/// The page requires a pre-authenticated session cookie; there is no
/// login flow here.
pub struct BookingPageClient {
    client: Client,
    url: String,
    cookie: String,
}

impl BookingPageClient {
    /// Create a new booking page client.
    pub fn new(url: String, cookie: String) -> Result<Self, ScanError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            url,
            cookie,
        })
    }

    /// Fetch the booking page and extract all available slot dates,
    /// ascending.
    ///
    /// An empty list is a valid result: the page parsed fine and simply
    /// lists no free slots.
    pub async fn fetch_available_dates(&self) -> Result<Vec<NaiveDate>, ScanError> {
        debug!("Fetching booking page {}", self.url);

        let body = self
            .client
            .get(&self.url)
            .header(header::COOKIE, &self.cookie)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        extract_dates(&body)
    }
}

/// Extract all slot dates from the booking page HTML, ascending.
pub fn extract_dates(body: &str) -> Result<Vec<NaiveDate>, ScanError> {
    let document = Html::parse_document(body);
    let selector =
        Selector::parse(DATE_SELECTOR).map_err(|e| ScanError::Parse(e.to_string()))?;

    let mut dates = Vec::new();
    for element in document.select(&selector) {
        let text = element.text().collect::<String>();
        dates.push(parse_slot_date(text.trim())?);
    }

    dates.sort_unstable();
    Ok(dates)
}

fn parse_slot_date(text: &str) -> Result<NaiveDate, ScanError> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .ok_or_else(|| ScanError::Parse(format!("unrecognized slot date: '{text}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_dates_sorted_ascending() {
        let body = r#"
            <html><body>
                <div class="date"><a class="title">May 14, 2024</a></div>
                <div class="date"><a class="title">April 20, 2024</a></div>
                <div class="date"><a class="title">Wednesday, May 1, 2024</a></div>
            </body></html>
        "#;

        let dates = extract_dates(body).unwrap();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 4, 20).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 14).unwrap(),
            ]
        );
    }

    #[test]
    fn page_without_slots_is_empty_not_an_error() {
        let body = "<html><body><p>No free appointments.</p></body></html>";
        assert_eq!(extract_dates(body).unwrap(), vec![]);
    }

    #[test]
    fn undecodable_date_text_is_a_parse_error() {
        let body = r#"<div class="date"><a class="title">soonish</a></div>"#;
        assert!(matches!(extract_dates(body), Err(ScanError::Parse(_))));
    }

    #[test]
    fn ignores_unrelated_markup() {
        let body = r#"
            <div class="date"><span class="title">not a link</span></div>
            <a class="title">outside a date cell</a>
            <div class="date"><a class="title">June 3, 2024</a></div>
        "#;

        let dates = extract_dates(body).unwrap();
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()]);
    }
}
