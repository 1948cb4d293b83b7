use actix_web::{web, HttpResponse};
use device_tracking::data::LocationRecord;
use device_tracking::errors::LocationStoreError;
use device_tracking::Udid;
use itertools::Itertools;
use serde::Serialize;

use crate::app_container::Application;
use crate::routes::path_params::{parse_coordinate, split_pair, unmatched};

/// Wire form of a location. The internal id is never exposed and a missing
/// username is sent as an empty string.
#[derive(Serialize, Debug, Default, PartialEq)]
pub struct LocationResponse {
    pub username: String,
    pub udid: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LocationRecord> for LocationResponse {
    fn from(value: LocationRecord) -> Self {
        Self {
            username: value.username.unwrap_or_default(),
            udid: value.udid.into_inner(),
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

pub fn to_responses(records: Vec<LocationRecord>) -> Vec<LocationResponse> {
    records.into_iter().map_into().collect_vec()
}

#[tracing::instrument(skip(app), level = "info")]
async fn get_index(app: web::Data<Application>) -> web::Json<Vec<LocationResponse>> {
    let locations = app.locations.get_all().await.unwrap_or_else(|err| {
        tracing::error!("Failed to list locations: {err:?}");
        vec![]
    });
    web::Json(to_responses(locations))
}

#[tracing::instrument(skip(app), level = "info")]
async fn get_location(
    path: web::Path<String>,
    app: web::Data<Application>,
) -> web::Json<LocationResponse> {
    let udid = Udid::from(path.into_inner());
    let location = match app.locations.get(&udid).await {
        Ok(location) => location.into(),
        Err(LocationStoreError::NotFound(_)) => LocationResponse::default(),
        Err(err) => {
            tracing::error!("Failed to fetch location for {udid}: {err:?}");
            LocationResponse::default()
        }
    };
    web::Json(location)
}

#[tracing::instrument(skip(app), level = "info")]
async fn set_location(
    path: web::Path<(String, String, String)>,
    app: web::Data<Application>,
) -> HttpResponse {
    let (username, udid, coordinates) = path.into_inner();
    let Some((lat, lng)) = split_pair(&coordinates) else {
        return unmatched();
    };
    let latitude = parse_coordinate(lat);
    let longitude = parse_coordinate(lng);
    let udid = Udid::from(udid);

    if let Err(err) = app
        .locations
        .upsert(udid.clone(), Some(username.clone()), latitude, longitude)
        .await
    {
        tracing::error!("Failed to set location for {udid}: {err:?}");
    }

    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(format!(
        "Location set for {udid}: username={username} lat={latitude:.6} lng={longitude:.6}"
    ))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/getindex").to(get_index))
        .service(web::resource("/get/{udid}").to(get_location))
        .service(web::resource("/set/{username}/{udid}/{coordinates}").to(set_location));
}

#[cfg(test)]
mod tests {
    use super::LocationResponse;
    use crate::test_utils::TestApplication;
    use actix_web::http::{header, StatusCode};
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_set_then_get_location() {
        let fixture = TestApplication::default();
        let app = crate::init_test_service!(fixture.application());

        let req = test::TestRequest::get()
            .uri("/set/alice/dev1/1.5&-2.25")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(
            body,
            "Location set for dev1: username=alice lat=1.500000 lng=-2.250000"
        );

        let req = test::TestRequest::get().uri("/get/dev1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({"username": "alice", "udid": "dev1", "latitude": 1.5, "longitude": -2.25})
        );
    }

    #[actix_web::test]
    async fn test_set_location_accepts_post() {
        let fixture = TestApplication::default();
        let app = crate::init_test_service!(fixture.application());

        let req = test::TestRequest::post()
            .uri("/set/bob/dev2/3&4")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let stored = fixture.stored_locations().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].latitude, 3.0);
        assert_eq!(stored[0].longitude, 4.0);
    }

    #[actix_web::test]
    async fn test_unparsable_coordinates_are_stored_as_zero() {
        let fixture = TestApplication::default();
        let app = crate::init_test_service!(fixture.application());

        let req = test::TestRequest::get()
            .uri("/set/alice/dev1/north&east")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(
            body,
            "Location set for dev1: username=alice lat=0.000000 lng=0.000000"
        );
    }

    #[actix_web::test]
    async fn test_coordinates_split_at_the_last_separator() {
        let fixture = TestApplication::default();
        let app = crate::init_test_service!(fixture.application());

        let req = test::TestRequest::get()
            .uri("/set/alice/dev1/1&2&3")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(
            body,
            "Location set for dev1: username=alice lat=0.000000 lng=3.000000"
        );
    }

    #[actix_web::test]
    async fn test_set_without_separator_is_not_found() {
        let fixture = TestApplication::default();
        let app = crate::init_test_service!(fixture.application());

        let req = test::TestRequest::get()
            .uri("/set/alice/dev1/1.5")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(fixture.stored_locations().await.is_empty());
    }

    #[actix_web::test]
    async fn test_unknown_device_is_a_zero_valued_record() {
        let fixture = TestApplication::default();
        let app = crate::init_test_service!(fixture.application());

        let req = test::TestRequest::get().uri("/get/ghost").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            json!({"username": "", "udid": "", "latitude": 0.0, "longitude": 0.0})
        );
    }

    #[actix_web::test]
    async fn test_get_index_lists_every_location_with_trailing_slash() {
        let fixture = TestApplication::default();
        fixture.seed_location("dev2", "bob", 3.0, 4.0).await;
        fixture.seed_location("dev1", "alice", 1.0, 2.0).await;
        let app = crate::init_test_service!(fixture.application());

        let req = test::TestRequest::get().uri("/getindex/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
        let body: Vec<Value> = test::read_body_json(resp).await;

        let udids = body
            .iter()
            .map(|location| location["udid"].as_str().unwrap_or_default().to_string())
            .collect::<Vec<_>>();
        assert_eq!(udids, vec!["dev1", "dev2"]);
        assert!(body.iter().all(|location| location.get("id").is_none()));
    }

    #[actix_web::test]
    async fn test_get_index_on_empty_store_is_an_empty_array() {
        let fixture = TestApplication::default();
        let app = crate::init_test_service!(fixture.application());

        let req = test::TestRequest::get().uri("/getindex").to_request();
        let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;

        assert!(body.is_empty())
    }

    #[actix_web::test]
    async fn test_missing_username_is_sent_as_empty_string() {
        let record = device_tracking::data::LocationRecord {
            udid: "dev9".into(),
            latitude: 1.0,
            ..Default::default()
        };

        let response = LocationResponse::from(record);

        assert_eq!(
            response,
            LocationResponse {
                username: String::new(),
                udid: "dev9".to_string(),
                latitude: 1.0,
                longitude: 0.0,
            }
        );
    }
}
