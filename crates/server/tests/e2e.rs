use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::product::InMemoryProductRepository;
use tokio::net::TcpListener;

use server::{build_router, AppState};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let state = AppState::new(Arc::new(InMemoryProductRepository::new()));
    let app = build_router(state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_product_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/products", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    assert_eq!(res.text().await?, "[]");

    let res = c.post(format!("{}/product", app.base_url))
        .json(&json!({"name": "test product", "price": 11.22}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created, json!({"id": 1, "name": "test product", "price": 11.22}));

    let res = c.put(format!("{}/product/1", app.base_url))
        .json(&json!({"name": "updated Product", "price": 12.5}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["name"], "updated Product");

    let res = c.get(format!("{}/products?limit=5&offset=0", app.base_url)).send().await?;
    let list = res.json::<Value>().await?;
    assert_eq!(list, json!([{"id": 1, "name": "updated Product", "price": 12.5}]));

    let res = c.delete(format!("{}/product/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"result": "success"}));

    let res = c.get(format!("{}/product/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Product not found"}));
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_get_distinct_ids() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let mut handles = vec![];
    for i in 0..8 {
        let c = c.clone();
        let url = format!("{}/product", app.base_url);
        handles.push(tokio::spawn(async move {
            let res = c.post(url).json(&json!({"name": format!("p{i}")})).send().await?;
            let v = res.json::<Value>().await?;
            Ok::<i64, reqwest::Error>(v["id"].as_i64().unwrap_or_default())
        }));
    }
    let mut ids = vec![];
    for h in handles {
        ids.push(h.await??);
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<i64>>());
    Ok(())
}
