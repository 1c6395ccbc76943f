//! htmx lifecycle handling against the in-memory platform.

use issuedraft_client::infrastructure::platform::mock::{RecordingDocument, TestPlatform};
use issuedraft_client::ports::outbound::{container_ids, storage_keys};
use issuedraft_client::ui::presentation::{AfterRequest, LoadingState};
use issuedraft_client::{run, ClientConfig, Route, Runner, RunnerDeps};

const GENERATED: &str = r#"{"id":"gen-1","title":"Export CSV",
    "story":"As an admin I want exports","criteria":"One row per user","requirements":"",
    "created_at":"2024-05-05T12:00:00.000Z"}"#;

fn start(test: &TestPlatform, config: ClientConfig) -> Runner {
    run(RunnerDeps {
        platform: test.platform.clone(),
        config,
        route: Route::Home,
    })
}

fn home() -> TestPlatform {
    TestPlatform::new(RecordingDocument::new().with_container(container_ids::RECENT_ISSUES))
}

#[test]
fn overlay_stays_at_least_the_minimum_time() {
    let test = home();
    let runner = start(&test, ClientConfig::default());

    runner.observer.on_before_request();
    test.clock.advance(500);
    runner.observer.on_after_request(AfterRequest {
        successful: true,
        auto_store_payload: None,
    });

    assert_eq!(test.scheduler.pending_delays(), vec![1500]);
    assert!(test.document.loading_visible());
    test.scheduler.run_all();
    assert!(!test.document.loading_visible());
}

#[test]
fn configured_minimum_is_honoured() {
    let test = home();
    let config = ClientConfig {
        min_loading_time_ms: 300,
        ..ClientConfig::default()
    };
    let runner = start(&test, config);

    runner.observer.on_before_request();
    test.clock.advance(100);
    runner.observer.on_after_request(AfterRequest::default());
    assert_eq!(test.scheduler.pending_delays(), vec![200]);
}

#[test]
fn generated_issue_is_stored_and_shown() {
    let test = home();
    let runner = start(&test, ClientConfig::default());
    let html = test.document.html(container_ids::RECENT_ISSUES).unwrap();
    assert!(html.contains("No issues"));

    runner.observer.on_before_request();
    runner.observer.on_after_request(AfterRequest {
        successful: true,
        auto_store_payload: Some(GENERATED.to_string()),
    });

    let raw = test.storage.raw(storage_keys::ISSUES).unwrap();
    assert!(raw.contains("\"gen-1\""));
    let html = test.document.html(container_ids::RECENT_ISSUES).unwrap();
    assert!(html.contains("Export CSV"));

    assert!(runner.observer.on_after_swap(Some("/generate_issue")));
    assert_eq!(test.document.highlights(), 1);

    test.scheduler.run_all();
    assert_eq!(runner.observer.state(), LoadingState::Idle);
}

#[test]
fn redelivered_issue_keeps_the_first_copy() {
    let test = home();
    let runner = start(&test, ClientConfig::default());
    let changed = GENERATED.replace("Export CSV", "Something else");

    for payload in [GENERATED.to_string(), changed] {
        runner.observer.on_before_request();
        runner.observer.on_after_request(AfterRequest {
            successful: true,
            auto_store_payload: Some(payload),
        });
    }

    let raw = test.storage.raw(storage_keys::ISSUES).unwrap();
    assert!(raw.contains("Export CSV"));
    assert!(!raw.contains("Something else"));
}
