//! Endpoints for the services vets publish for appointment booking.

use crate::{api, rest::AppState};
use ntex::web;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVetServiceRequest {
    pub vet_id: i64,
    pub service_name: String,
    #[serde(default)]
    pub descriptions: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct VetPath {
    pub vet_id: i64,
}

#[web::post("")]
pub async fn create_vet_service(
    form: web::types::Json<CreateVetServiceRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let service = api::catalog::add_vet_service(
        api::catalog::NewVetService {
            vet_id: form.vet_id,
            service_name: form.service_name.clone(),
            descriptions: form.descriptions.clone(),
            price: form.price,
        },
        &app_state.repo,
    )
    .await?;

    Ok(web::HttpResponse::Created().json(&service))
}

#[web::get("/vet/{vet_id}")]
pub async fn services_by_vet(
    path: web::types::Path<VetPath>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let services = api::catalog::vet_services(path.vet_id, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&services))
}
