use actix_web::{web, HttpResponse};
use device_tracking::errors::PairingError;
use device_tracking::Udid;

use crate::app_container::Application;
use crate::errors::ApiError;
use crate::routes::locations::{to_responses, LocationResponse};
use crate::routes::path_params::{split_pair, unmatched};

fn pair_from_path(segment: &str) -> Option<(Udid, Udid)> {
    split_pair(segment).map(|(a, b)| (Udid::from(a), Udid::from(b)))
}

#[tracing::instrument(err, skip(app), level = "info")]
async fn create_pair(
    path: web::Path<String>,
    app: web::Data<Application>,
) -> Result<HttpResponse, ApiError> {
    let Some((a, b)) = pair_from_path(&path) else {
        return Ok(unmatched());
    };

    match app.pairings.create_pair(&a, &b).await {
        Ok(()) => {}
        Err(err @ PairingError::PartialPairing { .. }) => {
            tracing::error!("{err:?}");
            if let Err(cleanup) = app.pairings.remove_pair(&a, &b).await {
                tracing::error!("Failed to roll back partial pairing {a}&{b}: {cleanup:?}");
            }
            return Err(ApiError::PartialPairing(format!("{a}&{b}")));
        }
        Err(err) => {
            tracing::error!("Failed to pair {a} with {b}: {err:?}");
        }
    }

    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(err, skip(app), level = "info")]
async fn remove_pair(
    path: web::Path<String>,
    app: web::Data<Application>,
) -> Result<HttpResponse, ApiError> {
    let Some((a, b)) = pair_from_path(&path) else {
        return Ok(unmatched());
    };

    match app.pairings.remove_pair(&a, &b).await {
        Ok(()) => {}
        Err(err @ PairingError::PartialUnpairing { .. }) => {
            tracing::error!("{err:?}");
            // Only `b -> a` is left, so removing from b's side clears it.
            if let Err(cleanup) = app.pairings.remove_pair(&b, &a).await {
                tracing::error!("Failed to remove dangling edge {b}->{a}: {cleanup:?}");
                return Err(ApiError::PartialUnpairing(format!("{a}&{b}")));
            }
        }
        Err(err) => {
            tracing::error!("Failed to unpair {a} from {b}: {err:?}");
        }
    }

    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(app), level = "info")]
async fn visible_locations(
    path: web::Path<String>,
    app: web::Data<Application>,
) -> web::Json<Vec<LocationResponse>> {
    let udid = Udid::from(path.into_inner());
    let locations = app
        .pairings
        .visible_locations(&udid)
        .await
        .unwrap_or_else(|err| {
            tracing::error!("Failed to resolve locations visible to {udid}: {err:?}");
            vec![]
        });
    web::Json(to_responses(locations))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/create/{pair}").to(create_pair))
        .service(web::resource("/remove/{pair}").to(remove_pair))
        .service(web::resource("/getall/{udid}").to(visible_locations));
}
