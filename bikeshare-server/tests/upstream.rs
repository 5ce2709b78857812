//! The HTTP fetcher and join engine against a local fixture upstream.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use bikeshare_server::gbfs::{FeedError, FeedKind, Fetcher, FetcherConfig, HttpFetcher};
use bikeshare_server::join::{FeedSources, JoinEngine, JoinError};
use bikeshare_server::refresh::RefreshCycle;
use bikeshare_server::view::PublishedView;
use tokio::net::TcpListener;

const INFORMATION: &str = include_str!("fixtures/station_information.json");
const STATUS: &str = include_str!("fixtures/station_status.json");
const STATUS_PARTIAL: &str = include_str!("fixtures/station_status_partial.json");
const CLIENT_ID: &str = "test-test";

fn identified(headers: &HeaderMap) -> bool {
    headers
        .get("client-identifier")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == CLIENT_ID)
}

fn fixture(headers: HeaderMap, body: &'static str) -> Response {
    if !identified(&headers) {
        return (StatusCode::BAD_REQUEST, "missing Client-Identifier").into_response();
    }
    body.into_response()
}

async fn spawn_upstream() -> SocketAddr {
    let app = Router::new()
        .route(
            "/station_information.json",
            get(|headers: HeaderMap| async move { fixture(headers, INFORMATION) }),
        )
        .route(
            "/station_status.json",
            get(|headers: HeaderMap| async move { fixture(headers, STATUS) }),
        )
        .route(
            "/station_status_partial.json",
            get(|headers: HeaderMap| async move { fixture(headers, STATUS_PARTIAL) }),
        )
        .route("/empty.json", get(|| async { "" }))
        .route("/garbled.json", get(|| async { "{#$" }))
        .route(
            "/broken.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
        )
        .route(
            "/slow.json",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                STATUS
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(FetcherConfig::new(CLIENT_ID).with_timeout(1)).unwrap()
}

fn engine(addr: SocketAddr, information: &str, status: &str) -> JoinEngine<HttpFetcher> {
    JoinEngine::new(
        fetcher(),
        FeedSources::new(
            format!("http://{addr}/{information}"),
            format!("http://{addr}/{status}"),
        ),
    )
}

#[tokio::test]
async fn fetch_returns_body_unchanged() {
    let addr = spawn_upstream().await;

    let body = fetcher()
        .fetch(&format!("http://{addr}/station_information.json"))
        .await
        .unwrap();

    assert_eq!(body, INFORMATION.as_bytes());
}

#[tokio::test]
async fn fetch_does_not_parse_200_bodies() {
    let addr = spawn_upstream().await;
    let fetcher = fetcher();

    let empty = fetcher.fetch(&format!("http://{addr}/empty.json")).await.unwrap();
    let garbled = fetcher.fetch(&format!("http://{addr}/garbled.json")).await.unwrap();

    assert!(empty.is_empty());
    assert_eq!(garbled, b"{#$");
}

#[tokio::test]
async fn fetch_sends_client_identifier() {
    let addr = spawn_upstream().await;
    let anonymous = HttpFetcher::new(FetcherConfig::new("someone-else")).unwrap();

    let err = anonymous
        .fetch(&format!("http://{addr}/station_status.json"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(fetcher().fetch(&format!("http://{addr}/station_status.json")).await.is_ok());
}

#[tokio::test]
async fn fetch_non_200_is_transport_error() {
    let addr = spawn_upstream().await;
    let url = format!("http://{addr}/broken.json");

    let err = fetcher().fetch(&url).await.unwrap_err();

    assert_eq!(
        err,
        FeedError::Transport {
            url,
            status: Some(500),
            message: "Internal Server Error".to_string(),
        }
    );
}

#[tokio::test]
async fn fetch_times_out() {
    let addr = spawn_upstream().await;

    let err = fetcher()
        .fetch(&format!("http://{addr}/slow.json"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn fetch_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetcher()
        .fetch(&format!("http://{addr}/station_status.json"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn joins_fixture_feeds() {
    let addr = spawn_upstream().await;

    let snapshot = engine(addr, "station_information.json", "station_status.json")
        .fetch_and_join()
        .await
        .unwrap();

    let rows: Vec<_> = snapshot
        .sorted_by_name()
        .into_iter()
        .map(|s| (s.id.as_str(), s.name.as_str(), s.bikes_available, s.docks_available))
        .collect();
    let expected: [(&str, &str, u32, u32); 3] = [
        ("623", "7 Juni Plassen", 4, 8),
        ("627", "Skøyen Stasjon", 7, 5),
        ("610", "Sotahjørnet", 4, 9),
    ];
    assert_eq!(rows, expected);
    assert_eq!(snapshot.advisory(), None);
    assert_eq!(snapshot.information_updated(), 1553592653);
    assert_eq!(snapshot.status_updated(), 1540219230);
}

#[tokio::test]
async fn partial_status_drops_stations_and_sets_advisory() {
    let addr = spawn_upstream().await;

    let snapshot = engine(addr, "station_information.json", "station_status_partial.json")
        .fetch_and_join()
        .await
        .unwrap();

    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.get("627").is_some());
    assert!(snapshot.get("623").is_none());
    assert!(!snapshot.advisory().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn any_failing_feed_fails_the_join() {
    let addr = spawn_upstream().await;

    let cases = [
        ("broken.json", "station_status.json", FeedKind::Information),
        ("station_information.json", "broken.json", FeedKind::Status),
        ("empty.json", "station_status.json", FeedKind::Information),
        ("station_information.json", "empty.json", FeedKind::Status),
        ("garbled.json", "station_status.json", FeedKind::Information),
        ("station_information.json", "garbled.json", FeedKind::Status),
    ];

    for (information, status, failed) in cases {
        let err = engine(addr, information, status)
            .fetch_and_join()
            .await
            .unwrap_err();
        assert_eq!(err.feed(), Some(failed), "{information} + {status}");
    }
}

#[tokio::test]
async fn status_500_leaves_published_view_unchanged() {
    let addr = spawn_upstream().await;
    let view = PublishedView::new();

    let good = RefreshCycle::new(
        engine(addr, "station_information.json", "station_status.json"),
        view.clone(),
        Duration::from_secs(10),
    );
    good.refresh_once().await.unwrap();
    let before = view.get().await.unwrap();

    let failing = RefreshCycle::new(
        engine(addr, "station_information.json", "broken.json"),
        view.clone(),
        Duration::from_secs(10),
    );
    let err = failing.refresh_once().await.unwrap_err();

    assert!(matches!(
        err,
        JoinError::Feed {
            feed: FeedKind::Status,
            ..
        }
    ));
    assert_eq!(*view.get().await.unwrap(), *before);
}
