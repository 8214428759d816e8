//! End-to-end tests against a live server on an ephemeral port.
//! They need a reachable Postgres (`DATABASE_URL`); otherwise they skip.

use migration::MigratorTrait;
use serde_json::{json, Value};
use uuid::Uuid;

async fn spawn_app() -> Option<(String, reqwest::Client)> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = models::db::connect().await.ok()?;
    migration::Migrator::up(&db, None).await.ok()?;
    drop(db);

    let media = std::env::temp_dir().join(format!("e2e-media-{}", Uuid::new_v4()));
    let app = server::startup::build_app(media.to_str()?).await.ok()?;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.ok()?;
    let addr = listener.local_addr().ok()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Some((format!("http://{}", addr), reqwest::Client::new()))
}

#[tokio::test]
async fn health_reports_service() {
    let Some((base, client)) = spawn_app().await else { return };
    let res = client.get(format!("{base}/health/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "business-backend");
}

#[tokio::test]
async fn employee_crud_and_photo_flow() {
    let Some((base, client)) = spawn_app().await else { return };
    let marker = Uuid::new_v4().simple().to_string();

    // create
    let res = client
        .post(format!("{base}/api/employees/employee/create/"))
        .json(&json!({
            "name": "Eva",
            "last_name_paternal": "Rojas",
            "email": format!("eva_{marker}@example.com"),
            "gender": "F",
            "birth_date": "1991-06-20",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let body: Value = res.json().await.unwrap();
    let id = body["employee"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["employee"]["full_name"], "Eva Rojas");

    // detail
    let res = client
        .get(format!("{base}/api/employees/employee/{id}/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    // search hits the marker, case-insensitively
    let res = client
        .get(format!("{base}/api/employees/employee/"))
        .query(&[("search", marker.to_uppercase())])
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    let found = body["employees"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["id"] == json!(id));
    assert!(found);

    // partial edit
    let res = client
        .put(format!("{base}/api/employees/employee/{id}/edit/"))
        .json(&json!({ "phone": "999-000-111" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["employee"]["phone"], "999-000-111");

    // an explicit null clears the phone while untouched fields survive
    let res = client
        .put(format!("{base}/api/employees/employee/{id}/edit/"))
        .json(&json!({ "phone": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert!(body["employee"]["phone"].is_null());
    assert_eq!(body["employee"]["full_name"], "Eva Rojas");

    // photo upload
    let part = reqwest::multipart::Part::bytes(vec![0x89, b'P', b'N', b'G'])
        .file_name("photo.png")
        .mime_str("image/png")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("photo", part);
    let res = client
        .post(format!("{base}/api/employees/employee/{id}/photo/"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    let photo_url = body["photo_url"].as_str().unwrap().to_string();
    assert!(photo_url.starts_with("/media/employee_photos/"));

    // bad content type is rejected with a field error map
    let part = reqwest::multipart::Part::bytes(b"not an image".to_vec())
        .file_name("notes.txt")
        .mime_str("text/plain")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("photo", part);
    let res = client
        .post(format!("{base}/api/employees/employee/{id}/photo/"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert!(body["errors"]["photo"].is_array());

    // a body past the route limit comes back in the same field error map
    let part = reqwest::multipart::Part::bytes(vec![0u8; 9 * 1024 * 1024])
        .file_name("huge.png")
        .mime_str("image/png")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("photo", part);
    let res = client
        .post(format!("{base}/api/employees/employee/{id}/photo/"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert!(body["errors"]["photo"].is_array());

    // photo delete clears the url
    let res = client
        .delete(format!("{base}/api/employees/employee/{id}/photo/delete/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert!(body["photo_url"].is_null());

    // soft delete, then the detail 404s
    let res = client
        .delete(format!("{base}/api/employees/employee/{id}/delete/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "deleted");

    let res = client
        .get(format!("{base}/api/employees/employee/{id}/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn category_requires_api_key() {
    let Some((base, client)) = spawn_app().await else { return };

    let res = client
        .get(format!("{base}/api/products/category/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    // register a key, then the same request passes
    let key = format!("e2e-{}", Uuid::new_v4().simple());
    let res = client
        .post(format!("{base}/admin/api-keys"))
        .json(&json!({ "consumer": "e2e", "api_key": key }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let res = client
        .get(format!("{base}/api/products/category/"))
        .header("x-api-key", &key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert!(body["category"].is_array());

    let res = client
        .delete(format!("{base}/admin/api-keys/e2e"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);
}

#[tokio::test]
async fn missing_rows_return_404_and_bad_json_400() {
    let Some((base, client)) = spawn_app().await else { return };

    let res = client
        .delete(format!("{base}/api/products/brand/{}/delete/", Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let res = client
        .get(format!("{base}/api/products/supplier/{}/", Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let res = client
        .post(format!("{base}/api/products/brand/create/"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid json");

    // brand create without a country reports a field error
    let res = client
        .post(format!("{base}/api/products/brand/create/"))
        .json(&json!({ "name": "No Country" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert!(body["errors"]["country"].is_array());
}
