// ABOUTME: Integration tests for batch harvesting against a mock HTTP server.
// ABOUTME: Tests ordering, failure isolation, timeouts, HTTP status errors, and listing links.

use std::time::Duration;

use catalog_harvest::{DelayRange, Harvester};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;

fn entry_page(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><body>
<h1>Catalog</h1>
<h1>{name}</h1>
<div class="vndesc"><p>About {name}.</p></div>
<div id="vntags"><span>12.Mystery</span><span>4.Romance</span></div>
</body></html>"#
    )
}

fn harvester(timeout: Duration) -> Harvester {
    Harvester::builder()
        .delay(DelayRange::none())
        .timeout(timeout)
        .user_agent("catalog-harvest-test")
        .build()
        .unwrap()
}

#[test]
fn timeout_in_the_middle_does_not_halt_the_batch() {
    let server = MockServer::start();
    let a = server.mock(|when, then| {
        when.method(GET).path("/a");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(entry_page("Alpha"));
    });
    let b = server.mock(|when, then| {
        when.method(GET).path("/b");
        then.status(200)
            .body(entry_page("Beta"))
            .delay(Duration::from_millis(1500));
    });
    let c = server.mock(|when, then| {
        when.method(GET).path("/c");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(entry_page("Gamma"));
    });

    let targets = vec![server.url("/a"), server.url("/b"), server.url("/c")];
    let results = harvester(Duration::from_millis(300)).harvest_details(&targets);

    a.assert();
    b.assert();
    c.assert();

    let sources: Vec<_> = results.iter().map(|r| r.source.as_str()).collect();
    assert_eq!(sources, targets.iter().map(String::as_str).collect::<Vec<_>>());

    assert_eq!(results[0].name, "Alpha");
    assert_eq!(results[0].descriptions, vec!["About Alpha.".to_string()]);
    assert_eq!(
        results[0].tags,
        vec![vec!["Mystery".to_string(), "Romance".to_string()]]
    );
    assert!(results[0].error.is_none());

    let err = results[1].error.as_deref().expect("B should fail");
    assert!(err.contains("timeout"), "unexpected error: {err}");
    assert_eq!(results[1].name, "");
    assert!(results[1].descriptions.is_empty());
    assert!(results[1].tags.is_empty());

    assert_eq!(results[2].name, "Gamma");
    assert!(results[2].error.is_none());
}

#[test]
fn http_error_status_becomes_error_record() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/gone");
        then.status(404).body("<h1>x</h1><h1>Not Found</h1>");
    });

    let results = harvester(Duration::from_secs(5)).harvest_details(&[server.url("/gone")]);

    assert_eq!(results.len(), 1);
    let err = results[0].error.as_deref().unwrap();
    assert!(err.contains("404"), "unexpected error: {err}");
    assert_eq!(results[0].name, "");
}

#[test]
fn user_agent_is_sent_on_every_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/ua")
            .header("user-agent", "catalog-harvest-test");
        then.status(200).body(entry_page("UA"));
    });

    let targets = vec![server.url("/ua"), server.url("/ua")];
    let results = harvester(Duration::from_secs(5)).harvest_details(&targets);

    mock.assert_hits(2);
    assert!(results.iter().all(|r| r.name == "UA"));
}

#[test]
fn listing_links_resolve_against_the_page_origin() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v");
        then.status(200).body(
            r#"<table>
                <tr><td class="tc_title"><a href="/v17" title="Seventeen" lang="en">17</a></td></tr>
                <tr><td class="tc_title"><a href="https://mirror.example/v18">Eighteen</a></td></tr>
            </table>"#,
        );
    });
    server.mock(|when, then| {
        when.method(GET).path("/broken");
        then.status(500);
    });

    let listing = server.url("/v");
    let links = harvester(Duration::from_secs(5))
        .harvest_links(&[server.url("/broken"), listing.clone()]);

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].href, format!("{}/v17", server.base_url()));
    assert_eq!(links[0].title, "Seventeen");
    assert_eq!(links[0].lang, "en");
    assert_eq!(links[0].text, "17");
    assert_eq!(links[0].source, listing);
    assert_eq!(links[1].href, "https://mirror.example/v18");
    assert_eq!(links[1].title, "Eighteen");
}
