//! 示例接口：返回中间件为当前请求解析出的地理数据

use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, web};
use serde::Serialize;
use tracing::trace;

use crate::api::middleware::RemoteAddr;
use crate::services::geoip::GeoRecord;

#[derive(Debug, Serialize)]
pub struct GeoResponse {
    pub remote_addr: Option<String>,
    pub geo_data: Option<GeoRecord>,
}

pub struct GeoService;

impl GeoService {
    pub async fn whoami(req: HttpRequest) -> impl Responder {
        let extensions = req.extensions();
        let remote_addr = extensions.get::<RemoteAddr>().map(|a| a.0.clone());
        let geo_data = extensions.get::<GeoRecord>().cloned();
        trace!("Serving geo data for {:?}", remote_addr);

        HttpResponse::Ok().json(GeoResponse {
            remote_addr,
            geo_data,
        })
    }
}

pub fn geo_routes() -> actix_web::Resource {
    web::resource("/")
        .route(web::get().to(GeoService::whoami))
        .route(web::head().to(GeoService::whoami))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::geoip::GeoFields;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn test_whoami_reads_extensions() {
        let app = test::init_service(App::new().service(geo_routes())).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let record = GeoRecord::new(
            "8.8.8.8",
            GeoFields {
                country_code: Some("US".to_string()),
                ..GeoFields::default()
            },
        );
        req.extensions_mut().insert(RemoteAddr("8.8.8.8".to_string()));
        req.extensions_mut().insert(record);

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["remote_addr"], "8.8.8.8");
        assert_eq!(body["geo_data"]["country_code"], "US");
    }

    #[actix_web::test]
    async fn test_whoami_without_middleware() {
        let app = test::init_service(App::new().service(geo_routes())).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["remote_addr"].is_null());
        assert!(body["geo_data"].is_null());
    }
}
