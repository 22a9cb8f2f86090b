mod common;

use common::{PASSWORD, TestApp};
use http::StatusCode;
use shared::models::Role;
use staff_server::auth::gate::PERMISSION_DENIED;
use staff_server::db::{notices, work};
use staff_server::web::Level;

#[tokio::test]
async fn test_anonymous_redirected_to_login_with_next() {
    let app = TestApp::new().await;

    for path in ["/admin-panel/employees/", "/employee-panel/work/", "/accounts/profile/"] {
        let res = app.get(path, None).await;
        assert_eq!(res.status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(res.location(), format!("/accounts/login/?next={path}"));
    }
}

#[tokio::test]
async fn test_root_routes_by_role() {
    let app = TestApp::new().await;
    let admin = app.identity("boss", Role::Admin).await;
    let emp = app.identity("jdoe", Role::Employee).await;

    assert_eq!(app.get("/", None).await.location(), "/accounts/login/");
    assert_eq!(
        app.get("/", Some(&app.session(&admin))).await.location(),
        "/admin-panel/"
    );
    assert_eq!(
        app.get("/", Some(&app.session(&emp))).await.location(),
        "/employee-panel/"
    );
}

#[tokio::test]
async fn test_wrong_role_redirected_to_own_dashboard_with_notice() {
    let app = TestApp::new().await;
    let admin = app.identity("boss", Role::Admin).await;
    let emp = app.identity("jdoe", Role::Employee).await;

    let res = app.get("/admin-panel/", Some(&app.session(&emp))).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), "/employee-panel/");
    let flash = res.flash().unwrap();
    assert_eq!(flash.level, Level::Error);
    assert_eq!(flash.message, PERMISSION_DENIED);

    let res = app.get("/employee-panel/work/", Some(&app.session(&admin))).await;
    assert_eq!(res.location(), "/admin-panel/");
    assert_eq!(res.flash().unwrap().message, PERMISSION_DENIED);
}

#[tokio::test]
async fn test_employee_cannot_mutate_admin_records() {
    let app = TestApp::new().await;
    let emp = app.identity("jdoe", Role::Employee).await;
    let cookie = app.session(&emp);

    let res = app
        .post(
            "/admin-panel/notices/create/",
            Some(&cookie),
            &[("title", "Sneaky"), ("content", "x"), ("is_active", "on")],
        )
        .await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), "/employee-panel/");

    let res = app
        .post(
            "/admin-panel/work/create/",
            Some(&cookie),
            &[
                ("title", "Self-assigned"),
                ("description", "x"),
                ("assigned_to", &emp.id.to_string()),
                ("due_date", "2024-06-30"),
            ],
        )
        .await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);

    assert!(notices::list(app.pool()).await.unwrap().is_empty());
    assert!(work::list(app.pool(), None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bearer_token_accepted() {
    let app = TestApp::new().await;
    let admin = app.identity("boss", Role::Admin).await;
    let token = app.state.sessions.issue(&admin).unwrap();

    let request = http::Request::builder()
        .uri("/admin-panel/")
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let res = tower::ServiceExt::oneshot(app.app.clone(), request).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_deactivated_or_deleted_account_is_anonymous() {
    let app = TestApp::new().await;
    let emp = app.identity("jdoe", Role::Employee).await;
    let cookie = app.session(&emp);

    assert_eq!(app.get("/employee-panel/", Some(&cookie)).await.status, StatusCode::OK);

    sqlx::query("UPDATE identity SET is_active = 0 WHERE id = ?")
        .bind(emp.id)
        .execute(app.pool())
        .await
        .unwrap();
    let res = app.get("/employee-panel/", Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), "/accounts/login/?next=/employee-panel/");
}

#[tokio::test]
async fn test_tampered_session_is_anonymous() {
    let app = TestApp::new().await;
    let res = app.get("/admin-panel/", Some("session=not-a-token")).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert!(res.location().starts_with("/accounts/login/"));
}

#[tokio::test]
async fn test_login_sets_session_and_follows_next() {
    let app = TestApp::new().await;
    app.identity("jdoe", Role::Employee).await;

    let res = app
        .post(
            "/accounts/login/?next=/employee-panel/work/",
            None,
            &[("username", "jdoe"), ("password", PASSWORD)],
        )
        .await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), "/employee-panel/work/");

    let token = res.cookie("session").unwrap();
    let res = app
        .get("/employee-panel/work/", Some(&format!("session={token}")))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.view(), "employee_panel/work_list");
}

#[tokio::test]
async fn test_login_ignores_off_site_next() {
    let app = TestApp::new().await;
    app.identity("jdoe", Role::Employee).await;

    for next in ["/%09/evil.example/", "/%0A", "//evil.example/", "/%5Cevil.example/"] {
        let res = app
            .post(
                &format!("/accounts/login/?next={next}"),
                None,
                &[("username", "jdoe"), ("password", PASSWORD)],
            )
            .await;
        assert_eq!(res.status, StatusCode::SEE_OTHER, "{next}");
        assert_eq!(res.location(), "/", "{next}");
        assert!(res.cookie("session").is_some(), "{next}");
    }
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = TestApp::new().await;
    app.identity("jdoe", Role::Employee).await;

    for (username, password) in [("jdoe", "wrong"), ("nobody", PASSWORD)] {
        let res = app
            .post("/accounts/login/", None, &[("username", username), ("password", password)])
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.view(), "accounts/login");
        assert!(res.errors()["form"][0].as_str().unwrap().contains("correct username"));
        assert!(res.cookie("session").is_none());
    }

    let res = app.post("/accounts/login/", None, &[("username", "jdoe")]).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.errors()["password"].is_array());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = TestApp::new().await;
    let emp = app.identity("jdoe", Role::Employee).await;

    let res = app.post("/accounts/logout/", Some(&app.session(&emp)), &[]).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), "/accounts/login/");
    assert_eq!(res.cookie("session").as_deref(), Some(""));
    assert_eq!(res.flash().unwrap().level, Level::Info);
}

#[tokio::test]
async fn test_health_outside_gate() {
    let app = TestApp::new().await;
    let res = app.get("/health", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
}
