//! # Pipeline Tests
//!
//! Drive [`TidePoolFinder`] against mock tide and sun sites and check what
//! gets reported or skipped for each location.

use super::fixtures::{config, location, serve_page, sun_page, tide_page};
use chrono::NaiveDate;
use httpmock::prelude::*;
use tide_pool_lib::evaluate::Finding;
use tide_pool_lib::finder::{FinderError, RunSummary, TidePoolFinder};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

async fn run_to_string(finder: &TidePoolFinder) -> (RunSummary, String) {
    let mut out = Vec::new();
    let summary = finder.run(day(), &mut out).await.unwrap();
    (summary, String::from_utf8(out).unwrap())
}

/// One afternoon low tide inside a 6 am to 8 pm window is reported with its
/// 24-hour time and the height exactly as printed on the page.
#[tokio::test]
async fn afternoon_low_tide_is_visit_worthy() {
    let server = MockServer::start_async().await;
    serve_page(
        &server,
        "/hmb/tides",
        tide_page(&[
            ("High Tide", "7:02 am", "5.4 ft"),
            ("Low Tide", "1:15 pm", "0.3 ft"),
        ]),
    )
    .await;
    serve_page(&server, "/hmb/sun", sun_page("6:00 am", "8:00 pm")).await;

    let spot = location(&server, "Half Moon Bay, California", "hmb");
    let finder = TidePoolFinder::new(config(vec![spot.clone()])).unwrap();

    let evaluation = finder.scan_location(&spot, day()).await.unwrap();
    assert_eq!(
        evaluation.findings,
        vec![Finding {
            at: day().and_hms_opt(13, 15, 0).unwrap(),
            height: "0.3 ft".to_string(),
        }]
    );

    let (summary, output) = run_to_string(&finder).await;
    assert_eq!(summary, RunSummary { evaluated: 1, skipped: 0 });
    assert_eq!(
        output,
        "Go to Half Moon Bay, California at 2026-10-19 13:15:00. \
         Found low tide with height 0.3 ft during daylight hours\n"
    );
}

/// A low tide before sunrise is not worth the trip.
#[tokio::test]
async fn low_tide_before_sunrise_says_dont_go() {
    let server = MockServer::start_async().await;
    serve_page(
        &server,
        "/hb/tides",
        tide_page(&[("Low Tide", "5:00 am", "0.2 ft")]),
    )
    .await;
    serve_page(&server, "/hb/sun", sun_page("6:00 am", "6:30 pm")).await;

    let finder = TidePoolFinder::new(config(vec![location(
        &server,
        "Huntington Beach, California",
        "hb",
    )]))
    .unwrap();

    let (summary, output) = run_to_string(&finder).await;
    assert_eq!(summary, RunSummary { evaluated: 1, skipped: 0 });
    assert_eq!(
        output,
        "Don't go to Huntington Beach, California today. \
         Did not find a low tide within daylight hours\n"
    );
    assert!(!output.contains("Go to"));
}

/// A tide site stuck on HTTP 500 is retried three times, then the location
/// is skipped while the next one is still reported.
#[tokio::test]
async fn failing_tide_fetch_skips_only_that_location() {
    let server = MockServer::start_async().await;
    let broken = server
        .mock_async(|when, then| {
            when.method(GET).path("/prov/tides");
            then.status(500);
        })
        .await;
    serve_page(&server, "/prov/sun", sun_page("7:01 am", "5:59 pm")).await;

    serve_page(
        &server,
        "/wb/tides",
        tide_page(&[
            ("Low Tide", "9:41 am", "-0.1 ft"),
            ("Low Tide", "10:05 pm", "0.4 ft"),
        ]),
    )
    .await;
    serve_page(&server, "/wb/sun", sun_page("7:20 am", "6:35 pm")).await;

    let finder = TidePoolFinder::new(config(vec![
        location(&server, "Providence, Rhode Island", "prov"),
        location(&server, "Wrightsville Beach, North Carolina", "wb"),
    ]))
    .unwrap();

    let (summary, output) = run_to_string(&finder).await;
    broken.assert_hits_async(4).await;

    assert_eq!(summary, RunSummary { evaluated: 1, skipped: 1 });
    assert!(!output.contains("Providence"));
    assert_eq!(
        output,
        "Go to Wrightsville Beach, North Carolina at 2026-10-19 09:41:00. \
         Found low tide with height -0.1 ft during daylight hours\n"
    );
}

/// Two daylight low tides produce two report lines in page order.
#[tokio::test]
async fn two_daylight_low_tides_both_reported() {
    let server = MockServer::start_async().await;
    serve_page(
        &server,
        "/hmb/tides",
        tide_page(&[
            ("Low Tide", "7:30 am", "0.9 ft"),
            ("High Tide", "1:00 pm", "5.0 ft"),
            ("Low Tide", "6:45 pm", "1.1 ft"),
        ]),
    )
    .await;
    serve_page(&server, "/hmb/sun", sun_page("6:55 am", "7:20 pm")).await;

    let spot = location(&server, "Half Moon Bay, California", "hmb");
    let finder = TidePoolFinder::new(config(vec![spot.clone()])).unwrap();

    let evaluation = finder.scan_location(&spot, day()).await.unwrap();
    let times: Vec<_> = evaluation
        .findings
        .iter()
        .map(|f| f.at.format("%H:%M").to_string())
        .collect();
    assert_eq!(times, ["07:30", "18:45"]);
}

/// A noon low tide stays at 12:00 instead of rolling past midnight.
#[tokio::test]
async fn noon_low_tide_is_daylight() {
    let server = MockServer::start_async().await;
    serve_page(
        &server,
        "/noon/tides",
        tide_page(&[("Low Tide", "12:00 pm", "0.0 ft")]),
    )
    .await;
    serve_page(&server, "/noon/sun", sun_page("6:00 am", "8:00 pm")).await;

    let spot = location(&server, "Noon Cove", "noon");
    let finder = TidePoolFinder::new(config(vec![spot.clone()])).unwrap();

    let evaluation = finder.scan_location(&spot, day()).await.unwrap();
    assert_eq!(evaluation.findings.len(), 1);
    assert_eq!(evaluation.findings[0].at, day().and_hms_opt(12, 0, 0).unwrap());
}

/// A sun page without its table skips the location instead of aborting.
#[tokio::test]
async fn missing_sun_table_skips_location() {
    let server = MockServer::start_async().await;
    serve_page(
        &server,
        "/hmb/tides",
        tide_page(&[("Low Tide", "1:15 pm", "0.3 ft")]),
    )
    .await;
    serve_page(
        &server,
        "/hmb/sun",
        "<html><body><p>Redesigned page</p></body></html>".to_string(),
    )
    .await;

    let spot = location(&server, "Half Moon Bay, California", "hmb");
    let finder = TidePoolFinder::new(config(vec![spot.clone()])).unwrap();

    let err = finder.scan_location(&spot, day()).await.unwrap_err();
    assert!(matches!(err, FinderError::Extract(_)));

    let (summary, output) = run_to_string(&finder).await;
    assert_eq!(summary, RunSummary { evaluated: 0, skipped: 1 });
    assert!(output.is_empty());
}

/// An unreadable time on the tide page skips the location.
#[tokio::test]
async fn garbled_tide_time_skips_location() {
    let server = MockServer::start_async().await;
    serve_page(
        &server,
        "/odd/tides",
        tide_page(&[("Low Tide", "midday", "0.3 ft")]),
    )
    .await;
    serve_page(&server, "/odd/sun", sun_page("6:00 am", "8:00 pm")).await;

    let spot = location(&server, "Odd Harbor", "odd");
    let finder = TidePoolFinder::new(config(vec![spot.clone()])).unwrap();

    let err = finder.scan_location(&spot, day()).await.unwrap_err();
    assert!(matches!(err, FinderError::Clock(_)));
}

/// A day table without any low tide rows yields a "don't go" verdict.
#[tokio::test]
async fn table_without_low_tides_says_dont_go() {
    let server = MockServer::start_async().await;
    serve_page(
        &server,
        "/high/tides",
        tide_page(&[("High Tide", "11:00 am", "6.2 ft")]),
    )
    .await;
    serve_page(&server, "/high/sun", sun_page("6:00 am", "8:00 pm")).await;

    let spot = location(&server, "High Water Point", "high");
    let finder = TidePoolFinder::new(config(vec![spot.clone()])).unwrap();

    let evaluation = finder.scan_location(&spot, day()).await.unwrap();
    assert!(!evaluation.is_visit_worthy());
}
