use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;
use wedding_core::SiteConfig;
use wedding_core::rsvp::{RsvpEndpoint, RsvpPayload, TransportError};
use wedding_server::{AppState, router};

#[derive(Default)]
struct MockEndpoint {
    calls: AtomicUsize,
    payloads: Mutex<Vec<RsvpPayload>>,
    fail: bool,
}

#[async_trait]
impl RsvpEndpoint for MockEndpoint {
    async fn send(&self, payload: &RsvpPayload) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(TransportError("dns error".to_string()));
        }
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

fn app(endpoint: Arc<MockEndpoint>) -> Router {
    let site = SiteConfig::builtin().unwrap().validated().unwrap();
    router(AppState::with_endpoint(site, endpoint).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String, Option<String>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap(), content_type)
}

async fn post_form(app: &Router, uri: &str, body: String) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Open the page and return the session id embedded in its form.
async fn open_session(app: &Router, page: &str) -> String {
    let (status, html, _) = get(app, &format!("/{}", page)).await;
    assert_eq!(status, StatusCode::OK);

    let marker = r#"name="session" value=""#;
    let start = html.find(marker).expect("session field") + marker.len();
    html[start..start + 36].to_string()
}

#[tokio::test]
async fn index_lists_every_page() {
    let app = app(Arc::default());
    let (status, html, _) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"href="/wedding""#));
    assert!(html.contains(r#"href="/reception""#));
    assert!(html.contains(r#"href="/sangeet""#));
}

#[tokio::test]
async fn unknown_page_is_not_found() {
    let app = app(Arc::default());
    let (status, _, _) = get(&app, "/honeymoon").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn calendar_downloads() {
    let app = app(Arc::default());

    let (status, ics, content_type) = get(&app, "/reception/calendar.ics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/calendar; charset=utf-8"));
    assert!(ics.starts_with("BEGIN:VCALENDAR"));
    assert!(ics.contains("UID:reception@wedding-site"));

    let (status, ics, _) = get(&app, "/events/ceremony.ics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ics.contains("UID:ceremony@wedding-site"));

    let (status, _, _) = get(&app, "/events/ceremony").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn accepted_rsvp_is_sent_once_and_shows_calendar() {
    let endpoint = Arc::new(MockEndpoint::default());
    let app = app(endpoint.clone());
    let session = open_session(&app, "reception").await;

    let body = format!(
        "session={}&name=Asha&phone=5551234567&attendance=yes&guests=2&meal=vegetarian&drinks=beer&notes=",
        session
    );
    let (status, html) = post_form(&app, "/reception/rsvp", body.clone()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Thank You!"));
    assert!(html.contains(r#"class="confetti""#));
    assert!(html.contains("calendar.google.com"));
    assert!(html.contains("/events/reception.ics"));

    {
        let payloads = endpoint.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].name, "Asha");
        assert_eq!(payloads[0].meal_preference, "vegetarian");
        assert_eq!(payloads[0].drinks, "Beer");
    }

    // Posting the same page load again only re-renders the terminal view
    let (status, html) = post_form(&app, "/reception/rsvp", body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Thank You!"));
    assert!(!html.contains(r#"class="confetti""#));
    assert_eq!(endpoint.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_meal_keeps_form_open() {
    let endpoint = Arc::new(MockEndpoint::default());
    let app = app(endpoint.clone());
    let session = open_session(&app, "reception").await;

    let body = format!(
        "session={}&name=Asha&phone=5551234567&attendance=yes&guests=2&drinks=wine",
        session
    );
    let (status, html) = post_form(&app, "/reception/rsvp", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Please choose a meal preference."));
    assert!(html.contains(r#"value="Asha""#));
    assert!(html.contains(&session));
    assert_eq!(endpoint.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn declined_rsvp_needs_only_name_and_phone() {
    let endpoint = Arc::new(MockEndpoint::default());
    let app = app(endpoint.clone());
    let session = open_session(&app, "reception").await;

    let body = format!(
        "session={}&name=Asha&phone=5551234567&attendance=no",
        session
    );
    let (status, html) = post_form(&app, "/reception/rsvp", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("You will be missed"));
    assert!(!html.contains("calendar.google.com"));
    assert_eq!(endpoint.payloads.lock().unwrap()[0].attendance, "no");
}

#[tokio::test]
async fn transport_failure_allows_retry() {
    let endpoint = Arc::new(MockEndpoint {
        fail: true,
        ..Default::default()
    });
    let app = app(endpoint.clone());
    let session = open_session(&app, "wedding").await;

    let body = format!("session={}&name=Asha&attendance=yes&guests=1", session);
    let (status, html) = post_form(&app, "/wedding/rsvp", body.clone()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("There was an error submitting your RSVP. Please try again."));

    let (status, _) = post_form(&app, "/wedding/rsvp", body).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(endpoint.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unknown_session_gets_a_fresh_form() {
    let endpoint = Arc::new(MockEndpoint::default());
    let app = app(endpoint.clone());

    let body = "session=00000000-0000-0000-0000-000000000000&name=Asha&attendance=no".to_string();
    let (status, html) = post_form(&app, "/wedding/rsvp", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Thank You!"));
    assert_eq!(endpoint.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_guest_count_keeps_the_other_answers() {
    let endpoint = Arc::new(MockEndpoint::default());
    let app = app(endpoint.clone());
    let session = open_session(&app, "reception").await;

    let body = format!(
        "session={}&name=Asha&phone=5551234567&attendance=yes&guests=9&meal=vegan&drinks=beer&notes=Allergic+to+nuts",
        session
    );
    let (status, html) = post_form(&app, "/reception/rsvp", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Number of guests must be between 1 and 5."));
    assert!(html.contains(r#"<option value="vegan" selected>"#));
    assert!(html.contains(r#"value="beer" checked"#));
    assert!(html.contains("Allergic to nuts"));
    assert_eq!(endpoint.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn blank_attendance_clears_the_earlier_answer() {
    let endpoint = Arc::new(MockEndpoint::default());
    let app = app(endpoint.clone());
    let session = open_session(&app, "wedding").await;

    let body = format!("session={}&name=&attendance=no", session);
    let (status, _) = post_form(&app, "/wedding/rsvp", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let body = format!("session={}&name=Asha&attendance=", session);
    let (status, html) = post_form(&app, "/wedding/rsvp", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Please let us know whether you will attend."));
    assert_eq!(endpoint.calls.load(Ordering::SeqCst), 0);
}
