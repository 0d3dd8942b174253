mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_capacity_upsert_and_validation() {
    let app = TestApp::new().await;
    let (garage, auth) = app.owner_session("capacity", "UTC").await;
    let uri = format!("/api/v1/{}/capacity/waiter", garage.id);

    let res = app.send("PUT", &uri, Some(&auth), Some(json!({
        "timeslot_interval": 45,
        "scheduling_hours": [{ "day": "Tuesday", "start": "8:00 AM", "end": "11:00 AM" }]
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["mode"], "waiter");
    assert_eq!(body["schedule_mode"], "automatic");
    assert_eq!(body["timeslot_interval"], 45);
    assert_eq!(body["scheduling_hours"][0]["day"], "tuesday");

    // Partial update keeps earlier fields.
    let res = app.send("PUT", &uri, Some(&auth), Some(json!({ "show_timeslots": false }))).await;
    let body = parse_body(res).await;
    assert_eq!(body["timeslot_interval"], 45);
    assert_eq!(body["show_timeslots"], false);

    let res = app.send("PUT", &uri, Some(&auth), Some(json!({ "timeslot_interval": 0 }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send("PUT", &uri, Some(&auth), Some(json!({ "timeslot_interval": 1441 }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send("PUT", &uri, Some(&auth), Some(json!({ "schedule_mode": "sometimes" }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send("PUT", &uri, Some(&auth), Some(json!({
        "scheduling_hours": [{ "day": "monday", "start": "late", "end": "later" }]
    }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send("GET", &format!("/api/v1/{}/capacity/teleport", garage.id), Some(&auth), None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_misc_settings_window_bounds() {
    let app = TestApp::new().await;
    let (garage, auth) = app.owner_session("misc", "UTC").await;
    let uri = format!("/api/v1/{}/misc-settings", garage.id);

    let res = app.send("PUT", &uri, Some(&auth), Some(json!({ "booking_window": 25 }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send("PUT", &uri, Some(&auth), Some(json!({ "booking_window": 6, "is_use_single_service_duration": true }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["booking_window"], 6);
    assert_eq!(body["is_use_single_service_duration"], true);
}

#[tokio::test]
async fn test_blocker_crud() {
    let app = TestApp::new().await;
    let (garage, auth) = app.owner_session("blockers", "UTC").await;
    let uri = format!("/api/v1/{}/blockers", garage.id);

    let res = app.send("POST", &uri, Some(&auth), Some(json!({ "block_type": "vacation" }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send("POST", &uri, Some(&auth), Some(json!({
        "block_type": "holiday_blocker",
        "selected_holiday": { "name": "Christmas", "date": "2026-12-25" },
        "apply_to_appointment_types": "dropoff,pickup"
    }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    let blocker_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["holiday_name"], "Christmas");
    assert_eq!(body["apply_to_appointment_types"], json!(["dropoff", "pickup"]));

    let res = app.send("POST", &uri, Some(&auth), Some(json!({
        "block_type": "schedule_blocker",
        "block_after_days": "2",
        "block_for_days": 5
    }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.send("GET", &uri, Some(&auth), None).await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 2);

    let res = app.send("PUT", &format!("{}/{}", uri, blocker_id), Some(&auth), Some(json!({
        "block_type": "holiday_blocker",
        "is_enable": false,
        "selected_holiday": { "name": "Boxing Day", "date": "2026-12-26" }
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["is_enable"], false);
    assert_eq!(body["holiday_date"], "2026-12-26");
    assert_eq!(body["apply_to_appointment_types"], json!(["all"]));

    let res = app.send("DELETE", &format!("{}/{}", uri, blocker_id), Some(&auth), None).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app.send("DELETE", &format!("{}/{}", uri, blocker_id), Some(&auth), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_services_crud() {
    let app = TestApp::new().await;
    let (garage, auth) = app.owner_session("services", "UTC").await;
    let uri = format!("/api/v1/{}/services", garage.id);

    let res = app.send("POST", &uri, Some(&auth), Some(json!({ "name": "Oil change", "estimated_minutes": 30, "is_waiter": true }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let service_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.send("POST", &uri, Some(&auth), Some(json!({ "name": "Broken", "estimated_minutes": -5 }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send("POST", &uri, Some(&auth), Some(json!({ "name": "Forever", "estimated_minutes": i32::MAX }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send("GET", &uri, Some(&auth), None).await;
    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["is_waiter"], true);

    let res = app.send("DELETE", &format!("{}/{}", uri, service_id), Some(&auth), None).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_configuration_is_owner_only() {
    let app = TestApp::new().await;
    let (garage, _) = app.owner_session("guarded", "UTC").await;
    let (_, intruder) = app.owner_session("intruder", "UTC").await;

    let res = app.send("GET", &format!("/api/v1/{}/blockers", garage.id), Some(&intruder), None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.send("PUT", &format!("/api/v1/{}/shop-hours", garage.id), Some(&intruder), Some(json!({ "shop_hours": [] }))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.send("GET", "/api/v1/no-such-garage/blockers", Some(&intruder), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
