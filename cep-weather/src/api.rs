use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use cep_weather_core::{
    ErrorResult, InvalidCep, PipelineError, TemperatureResult, ViaCepClient, WeatherApiClient,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

/// Shared, read-only handles to both upstream clients.
#[derive(Debug, Clone)]
pub struct AppState {
    pub location: Arc<ViaCepClient>,
    pub weather: Arc<WeatherApiClient>,
}

impl AppState {
    pub fn new(location: ViaCepClient, weather: WeatherApiClient) -> Self {
        Self { location: Arc::new(location), weather: Arc::new(weather) }
    }
}

/// Renders a [`PipelineError`] as its fixed status and public message.
#[derive(Debug)]
pub struct ApiError(PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            PipelineError::InvalidZipcode(e) => tracing::debug!(error = %e, "rejected CEP"),
            PipelineError::ZipcodeNotFound(e) => tracing::info!(error = %e, "CEP lookup failed"),
            PipelineError::Weather(e) => tracing::error!(error = %e, "error getting weather info"),
        }

        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResult::new(self.0.public_message()))).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/weather/{cep}", get(weather_by_cep))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn weather_by_cep(
    State(state): State<AppState>,
    uri: Uri,
    cep: Result<Path<String>, PathRejection>,
) -> Result<Json<TemperatureResult>, ApiError> {
    // A segment that does not decode to UTF-8 cannot be a CEP.
    let Path(cep) = cep.map_err(|rejection| {
        tracing::debug!(error = %rejection, "undecodable CEP path segment");
        let raw = uri.path().trim_start_matches("/weather/").to_string();
        PipelineError::InvalidZipcode(InvalidCep(raw))
    })?;

    let result = cep_weather_core::resolve(&cep, &state.location, &state.weather).await?;
    Ok(Json(result))
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use cep_weather_core::http::stub::StubHttp;
    use tower::ServiceExt;

    const VIACEP_PAULISTA: &str = "https://viacep.com.br/ws/01310100/json/";
    const WEATHER_SAO_PAULO: &str =
        "https://api.weatherapi.com/v1/current.json?key=test-api-key&q=Sao%20Paulo,SP,Brazil&aqi=no";

    const PAULISTA: &str = r#"{
        "cep": "01310-100",
        "logradouro": "Avenida Paulista",
        "complemento": "",
        "bairro": "Bela Vista",
        "localidade": "São Paulo",
        "uf": "SP",
        "ibge": "3550308",
        "gia": "1004",
        "ddd": "11",
        "siafi": "7107"
    }"#;

    const SUNNY_25: &str = r#"{
        "location": {
            "name": "São Paulo",
            "region": "Sao Paulo",
            "country": "Brazil",
            "lat": -23.55,
            "lon": -46.64,
            "tz_id": "America/Sao_Paulo",
            "localtime_epoch": 1234567890,
            "localtime": "2023-01-01 12:00"
        },
        "current": {
            "last_updated_epoch": 1234567890,
            "last_updated": "2023-01-01 12:00",
            "temp_c": 25.0,
            "temp_f": 77.0,
            "is_day": 1,
            "condition": {
                "text": "Sunny",
                "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png",
                "code": 1000
            }
        }
    }"#;

    fn app(stub: Arc<StubHttp>) -> Router {
        let location = ViaCepClient::new(stub.clone());
        let weather = WeatherApiClient::new(stub, "test-api-key".to_string());
        build_app(AppState::new(location, weather))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, content_type, json)
    }

    #[tokio::test]
    async fn returns_temperature_in_three_units() {
        let stub = Arc::new(
            StubHttp::new()
                .with_response(VIACEP_PAULISTA, 200, PAULISTA)
                .with_response(WEATHER_SAO_PAULO, 200, SUNNY_25),
        );

        let (status, content_type, json) = get_json(app(stub), "/weather/01310-100").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(json, serde_json::json!({"temp_C": 25, "temp_F": 77, "temp_K": 298}));
    }

    #[tokio::test]
    async fn percent_encoded_separators_are_decoded() {
        let stub = Arc::new(
            StubHttp::new()
                .with_response(VIACEP_PAULISTA, 200, PAULISTA)
                .with_response(WEATHER_SAO_PAULO, 200, SUNNY_25),
        );

        let (status, _, json) = get_json(app(stub), "/weather/01310%20100").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["temp_K"], 298.0);
    }

    #[tokio::test]
    async fn malformed_cep_is_unprocessable_without_outbound_calls() {
        let stub = Arc::new(StubHttp::new());

        let (status, content_type, json) = get_json(app(stub.clone()), "/weather/123").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(json, serde_json::json!({"message": "invalid zipcode"}));
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn non_utf8_cep_is_unprocessable_without_outbound_calls() {
        let stub = Arc::new(StubHttp::new());

        let (status, content_type, json) = get_json(app(stub.clone()), "/weather/%FF%FE").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(json, serde_json::json!({"message": "invalid zipcode"}));
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn unknown_cep_is_not_found() {
        let stub = Arc::new(StubHttp::new().with_response(
            "https://viacep.com.br/ws/99999999/json/",
            200,
            r#"{"erro": true}"#,
        ));

        let (status, content_type, json) = get_json(app(stub), "/weather/99999999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(json, serde_json::json!({"message": "can not find zipcode"}));
    }

    #[tokio::test]
    async fn location_transport_failure_is_not_found() {
        let stub = Arc::new(StubHttp::new().with_failure(VIACEP_PAULISTA, "connection error"));

        let (status, _, json) = get_json(app(stub), "/weather/01310100").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "can not find zipcode");
    }

    #[tokio::test]
    async fn weather_failure_is_internal_error() {
        let stub = Arc::new(
            StubHttp::new()
                .with_response(VIACEP_PAULISTA, 200, PAULISTA)
                .with_response(WEATHER_SAO_PAULO, 400, r#"{"error": {"code": 1006}}"#),
        );

        let (status, content_type, json) = get_json(app(stub.clone()), "/weather/01310100").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(json, serde_json::json!({"message": "error getting weather information"}));
        assert_eq!(stub.requests(), vec![VIACEP_PAULISTA, WEATHER_SAO_PAULO]);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, _, json) = get_json(app(Arc::new(StubHttp::new())), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }
}
