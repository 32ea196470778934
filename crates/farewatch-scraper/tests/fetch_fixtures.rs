//! `BrowserFetcher` and `extract_fares` against saved results pages.
//!
//! A `FixtureSession` stands in for Chromium, so these cover the fetch
//! sequence (wait, popup, sort, snapshot) without launching a browser.

mod support;

use std::time::Duration;

use chrono::NaiveDate;
use farewatch_core::DatePair;
use farewatch_scraper::profile::{KAYAK, SKYSCANNER};
use farewatch_scraper::{
    extract_fares, BrowserFetcher, FetchError, FetchTimings, PageFetcher, SessionError,
};
use rust_decimal::Decimal;

use support::{fixture, FixtureSession, Unknown};

fn fast_timings() -> FetchTimings {
    FetchTimings {
        wait_timeout: Duration::from_millis(60),
        poll_interval: Duration::from_millis(10),
        sort_settle: Duration::ZERO,
    }
}

fn pen_sin() -> DatePair {
    DatePair::new(
        NaiveDate::from_ymd_opt(2024, 10, 10).unwrap(),
        NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Kayak
// ---------------------------------------------------------------------------

#[tokio::test]
async fn kayak_page_yields_four_complete_records() {
    let url = KAYAK.url("PEN", "SIN", pen_sin());
    let session = FixtureSession::new().with_page(&url, fixture("kayak_results.html"));
    let mut fetcher = BrowserFetcher::new(session, fast_timings());

    let document = fetcher.fetch(&url, &KAYAK).await.unwrap();
    assert!(document.ready);
    assert_eq!(document.url, url);

    let records = extract_fares(&document.html, &KAYAK.locators).unwrap();
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.is_complete()), "{records:#?}");

    let prices: Vec<_> = records.iter().map(|r| r.price.unwrap()).collect();
    assert_eq!(
        prices,
        vec![
            Decimal::from(312),
            Decimal::from(340),
            Decimal::from(1045),
            Decimal::from(1210)
        ]
    );

    let last = &records[3];
    assert_eq!(last.departing.airline.as_deref(), Some("Jetstar Asia"));
    assert_eq!(last.returning.airline.as_deref(), Some("Singapore Airlines"));
    assert_eq!(last.departing.arrival.as_deref(), Some("00:05"));
    assert_eq!(last.returning.arrival.as_deref(), Some("00:40"));
    assert_eq!(last.source_airport.as_deref(), Some("PEN"));
    assert_eq!(last.destination_airport.as_deref(), Some("SIN"));
}

#[tokio::test]
async fn kayak_price_alert_is_closed_with_second_to_last_button() {
    let url = KAYAK.url("PEN", "SIN", pen_sin());
    let session = FixtureSession::new().with_page(&url, fixture("kayak_results.html"));
    let mut fetcher = BrowserFetcher::new(session, fast_timings());

    fetcher.fetch(&url, &KAYAK).await.unwrap();

    let session = fetcher.into_session();
    assert_eq!(
        session.clicks,
        vec![("button.Button-No-Standard-Style.close".to_owned(), 1)]
    );
}

#[tokio::test]
async fn kayak_without_price_alert_clicks_nothing() {
    let url = KAYAK.url("PEN", "SIN", pen_sin());
    let session = FixtureSession::new().with_page(&url, fixture("kayak_two_prices.html"));
    let mut fetcher = BrowserFetcher::new(session, fast_timings());

    let document = fetcher.fetch(&url, &KAYAK).await.unwrap();
    assert!(fetcher.into_session().clicks.is_empty());

    let records = extract_fares(&document.html, &KAYAK.locators).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].price, Some(Decimal::from(298)));
    assert_eq!(records[1].price, Some(Decimal::from(305)));
    assert_eq!(records[2].price, None);
    assert_eq!(records[3].price, None);
    assert_eq!(records[2].missing_fields(), vec!["Price(RM)"]);
}

// ---------------------------------------------------------------------------
// Skyscanner
// ---------------------------------------------------------------------------

#[tokio::test]
async fn skyscanner_dismisses_modal_then_sorts_by_price() {
    let url = SKYSCANNER.url("PEN", "SIN", pen_sin());
    let session = FixtureSession::new().with_page(&url, fixture("skyscanner_results.html"));
    let mut fetcher = BrowserFetcher::new(session, fast_timings());

    let document = fetcher.fetch(&url, &SKYSCANNER).await.unwrap();
    assert!(document.ready);

    let session = fetcher.into_session();
    assert_eq!(
        session.clicks,
        vec![
            ("button.bpk-modal__close-button-2a-Xb".to_owned(), 0),
            (r#"td[class="tab"][data-tab="price"]"#.to_owned(), 0),
        ]
    );

    let records = extract_fares(&document.html, &SKYSCANNER.locators).unwrap();
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.is_complete()), "{records:#?}");
    assert_eq!(records[2].departing.airline.as_deref(), Some("Malaysia Airlines"));
    assert_eq!(records[2].departing.duration.as_deref(), Some("2h 55m"));
    assert_eq!(records[2].returning.duration.as_deref(), Some("2h 45m"));
    assert_eq!(records[3].price, Some(Decimal::from(1020)));
}

#[tokio::test]
async fn skyscanner_without_sort_or_modal_still_fetches() {
    let url = SKYSCANNER.url("PEN", "SIN", pen_sin());
    let session = FixtureSession::new().with_page(&url, fixture("kayak_results.html"));
    let mut fetcher = BrowserFetcher::new(session, fast_timings());

    let document = fetcher.fetch(&url, &SKYSCANNER).await.unwrap();

    // Kayak markup has none of Skyscanner's hooks.
    assert!(!document.ready);
    assert!(fetcher.into_session().clicks.is_empty());
    assert!(extract_fares(&document.html, &SKYSCANNER.locators)
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Slow and failing pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wait_timeout_returns_partial_document() {
    let url = KAYAK.url("PEN", "SIN", pen_sin());
    let session = FixtureSession::new().with_page(&url, fixture("still_loading.html"));
    let mut fetcher = BrowserFetcher::new(session, fast_timings());

    let document = fetcher.fetch(&url, &KAYAK).await.unwrap();

    assert!(!document.ready);
    assert!(document.html.contains("Common-Results-ProgressBar"));
    assert!(extract_fares(&document.html, &KAYAK.locators)
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn navigation_timeout_is_not_fatal() {
    let session = FixtureSession::new().on_unknown(Unknown::TimeOut);
    let mut fetcher = BrowserFetcher::new(session, fast_timings());

    let document = fetcher
        .fetch("https://www.kayak.com.my/flights/slow", &KAYAK)
        .await
        .unwrap();

    assert!(!document.ready);
}

#[tokio::test]
async fn navigation_failure_is_recoverable() {
    let session = FixtureSession::new();
    let mut fetcher = BrowserFetcher::new(session, fast_timings());

    let err = fetcher
        .fetch("https://nowhere.invalid/", &KAYAK)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FetchError::Navigation {
            source: SessionError::Protocol(_),
            ..
        }
    ));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn closed_session_is_fatal() {
    let mut session = FixtureSession::new();
    session.close();
    let mut fetcher = BrowserFetcher::new(session, fast_timings());

    let err = fetcher
        .fetch("https://www.kayak.com.my/flights/PEN-SIN", &KAYAK)
        .await
        .unwrap_err();

    assert!(err.is_fatal());
}
