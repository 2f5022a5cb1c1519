use actix_web::dev::Server;
use actix_web::{web, App, HttpMessage, HttpRequest, HttpResponse, HttpServer, Responder};
use chrono::Utc;
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::order::{Order, OrderRecord};
use crate::metrics::Metrics;

/// Build the echo endpoint on an already bound listener.
///
/// `POST /api/cupcakes` answers with the order it received plus `id` and
/// `createdAt`, the same contract as the public reference endpoint. The
/// order is validated but echoed as sent, not normalised.
pub fn run(listener: TcpListener, metrics: Arc<Metrics>) -> std::io::Result<Server> {
    tracing::info!("🧁 Starting order endpoint on http://{}", listener.local_addr()?);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(metrics.clone()))
            .route("/api/cupcakes", web::post().to(echo_order))
            .route("/metrics", web::get().to(metrics_handler))
            .route("/health", web::get().to(health_handler))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

async fn echo_order(
    metrics: web::Data<Arc<Metrics>>,
    request: HttpRequest,
    body: web::Bytes,
) -> impl Responder {
    if request.content_type() != "application/json" {
        tracing::warn!(content_type = request.content_type(), "Rejected order payload");
        metrics.orders_rejected.inc();
        return HttpResponse::UnsupportedMediaType()
            .json(serde_json::json!({ "error": "expected Content-Type: application/json" }));
    }

    let record: OrderRecord = match serde_json::from_slice(&body) {
        Ok(record) => record,
        Err(e) => return reject(&metrics, e.to_string()),
    };
    let order = match Order::try_from(record.clone()) {
        Ok(order) => order,
        Err(e) => return reject(&metrics, e.to_string()),
    };

    let mut echo = match serde_json::to_value(&record) {
        Ok(value) => value,
        Err(e) => return HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    };

    let id = Uuid::new_v4();
    if let Some(fields) = echo.as_object_mut() {
        fields.insert("id".to_string(), serde_json::json!(id.to_string()));
        fields.insert("createdAt".to_string(), serde_json::json!(Utc::now().to_rfc3339()));
    }

    tracing::info!(
        order_id = %id,
        cake_type = %order.cake_type(),
        quantity = order.quantity(),
        "Order received"
    );
    metrics.orders_echoed.inc();

    HttpResponse::Created().json(echo)
}

fn reject(metrics: &Metrics, error: String) -> HttpResponse {
    tracing::warn!(error = %error, "Rejected order payload");
    metrics.orders_rejected.inc();
    HttpResponse::BadRequest().json(serde_json::json!({ "error": error }))
}

async fn metrics_handler(metrics: web::Data<Arc<Metrics>>) -> impl Responder {
    match metrics.render() {
        Ok(text) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(text),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render metrics");
            HttpResponse::InternalServerError().finish()
        }
    }
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "cupcake-corner"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    fn app_metrics() -> Arc<Metrics> {
        Arc::new(Metrics::new().unwrap())
    }

    fn order_json() -> serde_json::Value {
        serde_json::json!({
            "type": 2,
            "quantity": 10,
            "specialRequestEnabled": true,
            "extraFrosting": true,
            "addSprinkles": false,
            "name": "Taylor",
            "streetAddress": "1 Infinite Loop",
            "city": "Cupertino",
            "zip": "95014"
        })
    }

    #[actix_web::test]
    async fn test_echo_adds_bookkeeping_fields() {
        let metrics = app_metrics();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(metrics.clone()))
                .route("/api/cupcakes", web::post().to(echo_order)),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/cupcakes")
            .set_json(order_json())
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["type"], 2);
        assert_eq!(body["quantity"], 10);
        assert_eq!(body["extraFrosting"], true);
        assert!(body["id"].is_string());
        assert!(body["createdAt"].is_string());
        assert_eq!(metrics.orders_echoed.get(), 1);
    }

    #[actix_web::test]
    async fn test_invalid_order_is_rejected() {
        let metrics = app_metrics();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(metrics.clone()))
                .route("/api/cupcakes", web::post().to(echo_order)),
        )
        .await;

        let mut payload = order_json();
        payload["quantity"] = serde_json::json!(1);

        let request = test::TestRequest::post()
            .uri("/api/cupcakes")
            .set_json(payload)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(metrics.orders_rejected.get(), 1);
        assert_eq!(metrics.orders_echoed.get(), 0);
    }

    #[actix_web::test]
    async fn test_echo_keeps_fields_as_sent() {
        let metrics = app_metrics();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(metrics.clone()))
                .route("/api/cupcakes", web::post().to(echo_order)),
        )
        .await;

        let mut payload = order_json();
        payload["specialRequestEnabled"] = serde_json::json!(false);

        let request = test::TestRequest::post()
            .uri("/api/cupcakes")
            .set_json(payload)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["specialRequestEnabled"], false);
        assert_eq!(body["extraFrosting"], true);
    }

    #[actix_web::test]
    async fn test_non_json_content_type_is_rejected() {
        let metrics = app_metrics();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(metrics.clone()))
                .route("/api/cupcakes", web::post().to(echo_order)),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/cupcakes")
            .insert_header(("content-type", "text/plain"))
            .set_payload(order_json().to_string())
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(metrics.orders_rejected.get(), 1);
        assert_eq!(metrics.orders_echoed.get(), 0);
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().route("/health", web::get().to(health_handler))).await;

        let request = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_metrics_endpoint() {
        let metrics = app_metrics();
        metrics.orders_echoed.inc();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(metrics))
                .route("/metrics", web::get().to(metrics_handler)),
        )
        .await;

        let request = test::TestRequest::get().uri("/metrics").to_request();
        let body = test::call_and_read_body(&app, request).await;

        assert!(String::from_utf8_lossy(&body).contains("orders_echoed_total 1"));
    }
}
