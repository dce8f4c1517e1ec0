//! Integration tests for the TMDb client against the in-process mock.

use std::collections::HashMap;

use serde_json::json;
use testkit::{Fixture, MockTmdb, detail, list_of, movie};
use tmdb_client::{DiscoverQuery, TmdbClient, TmdbError, TmdbSettings};

fn client_for(mock: &MockTmdb) -> TmdbClient {
    TmdbClient::new(TmdbSettings::new("test-key").with_base_url(mock.base_url()))
        .expect("Failed to build client")
}

#[tokio::test]
async fn test_discover_parses_paged_results() {
    let mock = MockTmdb::start(Fixture {
        total_pages: 120,
        discover_results: vec![movie(1, "Alien", 1979), movie(2, "Heat", 1995)],
        ..Fixture::default()
    })
    .await;
    let client = client_for(&mock);

    let page = client
        .discover(&DiscoverQuery::new(300, 6.0), 4)
        .await
        .expect("discover failed");

    assert_eq!(page.page, 4);
    assert_eq!(page.total_pages, 120);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].usable_title(), Some("Alien"));
    assert_eq!(page.results[1].release_date.as_deref(), Some("1995-06-01"));
}

#[tokio::test]
async fn test_every_request_carries_key_and_language() {
    let mut details = HashMap::new();
    details.insert(7, detail(7, "Se7en", 1995, "David Fincher"));
    let mut lists = HashMap::new();
    lists.insert("42".to_string(), list_of(vec![movie(7, "Se7en", 1995)]));

    let mock = MockTmdb::start(Fixture {
        total_pages: 1,
        details,
        lists,
        ..Fixture::default()
    })
    .await;
    let client = client_for(&mock);

    client.discover(&DiscoverQuery::new(300, 6.0), 1).await.unwrap();
    client.list("42").await.unwrap();
    client.movie_details(7).await.unwrap();

    let queries = mock.queries();
    assert_eq!(queries.len(), 3);
    for query in &queries {
        assert_eq!(query.get("api_key").map(String::as_str), Some("test-key"));
        assert_eq!(query.get("language").map(String::as_str), Some("en-US"));
    }
    assert_eq!(
        queries[2].get("append_to_response").map(String::as_str),
        Some("credits")
    );
}

#[tokio::test]
async fn test_non_success_carries_status_and_body() {
    let mock = MockTmdb::start(Fixture {
        discover_status: Some(401),
        ..Fixture::default()
    })
    .await;
    let client = client_for(&mock);

    let err = client
        .discover(&DiscoverQuery::new(300, 6.0), 1)
        .await
        .expect_err("discover should fail");

    match err {
        TmdbError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, testkit::FAILURE_BODY);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_movie_details_with_credits() {
    let mut details = HashMap::new();
    details.insert(603, detail(603, "The Matrix", 1999, "Lana Wachowski"));
    let mock = MockTmdb::start(Fixture {
        details,
        ..Fixture::default()
    })
    .await;
    let client = client_for(&mock);

    let movie = client.movie_details(603).await.expect("details failed");

    assert_eq!(movie.id, 603);
    assert_eq!(movie.director(), Some("Lana Wachowski"));
    assert_eq!(movie.rating, Some(7.9));

    let missing = client.movie_details(999).await.expect_err("should 404");
    assert_eq!(missing.status(), Some(404));
}

#[tokio::test]
async fn test_list_without_items() {
    let mut lists = HashMap::new();
    lists.insert("empty".to_string(), json!({ "id": "empty", "name": "Nothing" }));
    let mock = MockTmdb::start(Fixture {
        lists,
        ..Fixture::default()
    })
    .await;
    let client = client_for(&mock);

    let list = client.list("empty").await.expect("list failed");
    assert!(list.items.is_none());
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_error() {
    // Nothing listens on port 9 of the loopback in the test environment
    let client = TmdbClient::new(TmdbSettings::new("k").with_base_url("http://127.0.0.1:9/3"))
        .expect("Failed to build client");

    let err = client.list("1").await.expect_err("should fail");
    assert!(matches!(err, TmdbError::Transport(_)));
}

#[tokio::test]
async fn test_list_id_cannot_leave_the_list_endpoint() {
    let mut details = HashMap::new();
    details.insert(11, detail(11, "Star Wars", 1977, "George Lucas"));
    let mock = MockTmdb::start(Fixture {
        details,
        ..Fixture::default()
    })
    .await;
    let client = client_for(&mock);

    // Reaches the list route as one encoded segment, which names no list
    let err = client.list("../movie/11").await.expect_err("should 404");
    assert_eq!(err.status(), Some(404));

    let err = client.list("..").await.expect_err("should be refused");
    assert!(matches!(err, TmdbError::PathSegment(_)));

    assert_eq!(mock.list_calls(), 1);
    assert_eq!(mock.detail_calls(), 0);
}

#[tokio::test]
async fn test_base_url_trailing_slash() {
    let mut lists = HashMap::new();
    lists.insert("42".to_string(), list_of(vec![movie(7, "Se7en", 1995)]));
    let mock = MockTmdb::start(Fixture {
        lists,
        ..Fixture::default()
    })
    .await;
    let client = TmdbClient::new(
        TmdbSettings::new("test-key").with_base_url(format!("{}/", mock.base_url())),
    )
    .expect("Failed to build client");

    let list = client.list("42").await.expect("list failed");
    assert_eq!(list.items.map(|items| items.len()), Some(1));
}
