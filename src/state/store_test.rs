use super::*;
use crate::net::error::SERVER_ERROR_NOTICE;
use crate::net::types::Registration;
use crate::router::guard::GuardDecision;
use crate::state::session::{PROFILE_KEY, SessionPhase, TOKEN_KEY};
use crate::testkit::{Harness, RecordingObserver, profile_json, sample_profile};
use crate::util::notify::NoticeLevel;
use crate::util::storage::KeyValueStore;

fn credentials() -> Credentials {
    Credentials { username: "bob".to_owned(), password: "hunter22".to_owned() }
}

fn login_body(token: &str, username: &str) -> String {
    format!(r#"{{"message":"Login successful","access_token":"{token}","user":{}}}"#, profile_json(username))
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn login_success_stores_session_notifies_and_lands() {
    let h = Harness::at(LOGIN_PATH);
    h.transport.respond(200, &login_body("tok-9", "bob"));

    let profile = h.client.store().login(&credentials()).await.unwrap();

    assert_eq!(profile.username, "bob");
    let session = h.client.session();
    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert_eq!(session.token().as_deref(), Some("tok-9"));
    assert_eq!(session.profile(), Some(profile));
    assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("tok-9"));
    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].message, LOGIN_SUCCESS_NOTICE);
    assert_eq!(h.navigator.history(), vec![LANDING_PATH.to_owned()]);
}

#[tokio::test]
async fn login_publishes_session_before_navigating() {
    let h = Harness::at(LOGIN_PATH);
    let observer = Rc::new(RecordingObserver::default());
    h.client.session().subscribe(observer.clone());
    h.transport.respond(200, &login_body("tok", "bob"));

    h.client.store().login(&credentials()).await.unwrap();

    assert_eq!(observer.snapshots.borrow().len(), 1);
    let decision = h.client.guard().evaluate(LOGIN_PATH).decision;
    assert_eq!(decision, GuardDecision::Redirect(LANDING_PATH));
}

#[tokio::test]
async fn login_rejected_leaves_state_and_adds_no_notice() {
    let h = Harness::at(LOGIN_PATH);
    h.transport.respond(401, r#"{"error":"Incorrect username or password"}"#);

    let err = h.client.store().login(&credentials()).await.unwrap_err();

    assert_eq!(err.api(), Some(&ApiError::AuthorizationExpired));
    assert_eq!(h.client.session().phase(), SessionPhase::Unauthenticated);
    assert!(h.notifier.notices().is_empty());
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn login_server_error_is_notified_once_by_interceptor() {
    let h = Harness::at(LOGIN_PATH);
    h.transport.respond(500, "");

    assert!(h.client.store().login(&credentials()).await.is_err());

    assert_eq!(h.notifier.messages(), vec![SERVER_ERROR_NOTICE.to_owned()]);
    assert_eq!(h.client.session().token(), None);
}

#[tokio::test]
async fn login_with_empty_token_is_rejected() {
    let h = Harness::at(LOGIN_PATH);
    h.transport.respond(200, &login_body("", "bob"));

    let err = h.client.store().login(&credentials()).await.unwrap_err();

    assert!(matches!(err.api(), Some(ApiError::Decode(_))));
    assert_eq!(h.client.session().phase(), SessionPhase::Unauthenticated);
    assert!(h.navigator.history().is_empty());
}

// =============================================================
// register
// =============================================================

#[tokio::test]
async fn register_success_prompts_login_without_authenticating() {
    let h = Harness::at(LOGIN_PATH);
    h.transport.respond(201, r#"{"message":"Registration successful"}"#);

    let data = Registration {
        username: "carol".to_owned(),
        email: "carol@example.com".to_owned(),
        password: "longenough".to_owned(),
    };
    h.client.store().register(&data).await.unwrap();

    assert_eq!(h.notifier.messages(), vec![REGISTER_SUCCESS_NOTICE.to_owned()]);
    assert_eq!(h.client.session().phase(), SessionPhase::Unauthenticated);
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn register_failure_has_no_extra_side_effects() {
    let h = Harness::at(LOGIN_PATH);
    h.transport.respond(409, r#"{"error":"Username already exists"}"#);

    let data = Registration {
        username: "carol".to_owned(),
        email: "carol@example.com".to_owned(),
        password: "longenough".to_owned(),
    };
    assert!(h.client.store().register(&data).await.is_err());

    assert_eq!(h.notifier.messages(), vec!["Username already exists".to_owned()]);
    assert_eq!(h.client.session().phase(), SessionPhase::Unauthenticated);
}

// =============================================================
// logout
// =============================================================

#[tokio::test]
async fn logout_clears_session_and_returns_to_login() {
    let h = Harness::signed_in(LANDING_PATH, "tok");
    h.transport.respond(200, r#"{"message":"Logout successful"}"#);

    h.client.store().logout().await;

    assert_eq!(h.client.session().snapshot().phase(), SessionPhase::Unauthenticated);
    assert_eq!(h.storage.get(TOKEN_KEY), None);
    assert_eq!(h.storage.get(PROFILE_KEY), None);
    assert_eq!(h.navigator.history(), vec![LOGIN_PATH.to_owned()]);
    assert_eq!(h.transport.requests()[0].header("Authorization"), Some("Bearer tok"));
}

#[tokio::test]
async fn logout_clears_session_even_when_remote_call_fails() {
    let h = Harness::signed_in(LANDING_PATH, "tok");
    h.transport.fail("offline");

    h.client.store().logout().await;

    assert_eq!(h.client.session().token(), None);
    assert_eq!(h.client.session().profile(), None);
    assert!(h.notifier.notices().is_empty());
    assert_eq!(h.navigator.history(), vec![LOGIN_PATH.to_owned()]);
}

#[tokio::test]
async fn logout_after_expired_token_navigates_once() {
    let h = Harness::signed_in(LANDING_PATH, "tok");
    h.transport.respond(401, "");

    h.client.store().logout().await;

    assert_eq!(h.client.session().token(), None);
    assert!(h.notifier.notices().is_empty());
    assert_eq!(h.navigator.history(), vec![LOGIN_PATH.to_owned()]);
}

// =============================================================
// fetch_profile
// =============================================================

#[tokio::test]
async fn fetch_profile_overwrites_profile_and_persisted_copy() {
    let h = Harness::signed_in(LANDING_PATH, "tok");
    h.transport.respond(200, &format!(r#"{{"user":{}}}"#, profile_json("alice-renamed")));

    let profile = h.client.store().fetch_profile().await.unwrap();

    assert_eq!(profile.username, "alice-renamed");
    assert_eq!(h.client.session().profile(), Some(profile));
    assert!(h.storage.get(PROFILE_KEY).unwrap().contains("alice-renamed"));
    assert_eq!(h.client.session().token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn fetch_profile_failure_keeps_previous_profile() {
    let h = Harness::signed_in(LANDING_PATH, "tok");
    h.transport.respond(500, "");

    let err = h.client.store().fetch_profile().await.unwrap_err();

    assert_eq!(err.api(), Some(&ApiError::ServerFault));
    assert_eq!(h.client.session().profile(), Some(sample_profile()));
    assert_eq!(h.client.session().token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn fetch_profile_network_failure_keeps_previous_profile() {
    let h = Harness::signed_in(LANDING_PATH, "tok");
    h.transport.fail("timeout");

    assert!(h.client.store().fetch_profile().await.is_err());

    assert_eq!(h.client.session().profile(), Some(sample_profile()));
}
