use aws_lambda_events::{
    apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse},
    encodings::Body,
};
use lambda_runtime::{Error, LambdaEvent};
use tracing::{Instrument, info_span};
use weather_core::{IncomingRequest, OutgoingResponse, WeatherHandler};

/// Handle one API Gateway invocation. Always answers with a proxy response;
/// failures are already mapped to status codes by [`WeatherHandler`].
pub(crate) async fn function_handler(
    handler: &WeatherHandler,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let LambdaEvent { payload, context } = event;
    let span = info_span!("invocation", request_id = %context.request_id);

    let response = handler.handle(&incoming(payload)).instrument(span).await;

    Ok(outgoing(response))
}

fn incoming(event: ApiGatewayProxyRequest) -> IncomingRequest {
    IncomingRequest { body: event.body }
}

fn outgoing(response: OutgoingResponse) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code: i64::from(response.status_code),
        body: Some(Body::Text(response.body)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lambda_runtime::Context;
    use std::collections::HashMap;
    use weather_core::{
        HttpCaller, LocalSecretStore, NetworkError, UpstreamResponse,
        secret::WEATHER_API_KEY_SECRET,
    };

    #[derive(Debug)]
    struct SunnyHttp;

    #[async_trait]
    impl HttpCaller for SunnyHttp {
        async fn get(&self, _url: &str) -> Result<UpstreamResponse, NetworkError> {
            Ok(UpstreamResponse {
                status: 200,
                body: Some(r#"{"temperature":10}"#.to_string()),
            })
        }
    }

    fn handler() -> WeatherHandler {
        let secrets = LocalSecretStore::new(HashMap::from([(
            WEATHER_API_KEY_SECRET.to_string(),
            r#"{"WeatherApiKey":"test-key"}"#.to_string(),
        )]));
        WeatherHandler::new(Box::new(SunnyHttp), Box::new(secrets))
    }

    fn event(body: Option<&str>) -> LambdaEvent<ApiGatewayProxyRequest> {
        let payload = ApiGatewayProxyRequest {
            body: body.map(str::to_string),
            ..Default::default()
        };
        LambdaEvent::new(payload, Context::default())
    }

    fn text(response: &ApiGatewayProxyResponse) -> &str {
        match &response.body {
            Some(Body::Text(text)) => text,
            other => panic!("expected text body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn proxies_weather_body() {
        let response = function_handler(&handler(), event(Some(r#"{"city":"Stockholm"}"#)))
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(text(&response), r#"{"temperature":10}"#);
    }

    #[tokio::test]
    async fn event_without_body_is_missing_city() {
        let response = function_handler(&handler(), event(None)).await.unwrap();

        assert_eq!(response.status_code, 400);
        assert_eq!(text(&response), "Missing required parameter: city");
    }

    #[tokio::test]
    async fn invalid_json_still_answers() {
        let response = function_handler(&handler(), event(Some("Invalid JSON"))).await.unwrap();

        assert_eq!(response.status_code, 400);
        assert_eq!(text(&response), "Invalid JSON format");
    }

    #[test]
    fn outgoing_keeps_status_and_body() {
        let response = outgoing(OutgoingResponse::new(500, "Weather Api Error 503"));

        assert_eq!(response.status_code, 500);
        assert_eq!(text(&response), "Weather Api Error 503");
        assert!(response.headers.is_empty());
    }
}
