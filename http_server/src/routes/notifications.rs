use actix_web::{web, HttpResponse};
use device_tracking::Udid;
use notifications::sender::PushNotification;

use crate::app_container::Application;
use crate::routes::path_params::{split_pair, unmatched};

#[tracing::instrument(skip(app), level = "info")]
async fn send_notification(path: web::Path<String>, app: web::Data<Application>) -> HttpResponse {
    let Some((udid, message)) = split_pair(&path) else {
        return unmatched();
    };

    let notification = PushNotification::alert(
        Udid::from(udid),
        message.to_string(),
        app.push_badge,
        app.push_sound.clone(),
    );
    let report = app.notifier.send(&notification).await;
    if !report.success {
        tracing::warn!("Push notification to {udid} was not delivered: {report:?}");
    }

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!(
            "  Alert: {}  Success: {}  Error: {}",
            notification.payload_string(),
            report.success,
            report.error.unwrap_or_default()
        ))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/notification/{target}").to(send_notification));
}
