//! Buyer, seller and vet registration endpoints.

use crate::{api, rest::AppState};
use ntex::web;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVetRequest {
    pub name: String,
    pub email: String,
    pub clinic_name: String,
}

#[derive(Debug, Deserialize)]
pub struct BuyerPath {
    pub buyer_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SellerPath {
    pub seller_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct VetPath {
    pub vet_id: i64,
}

#[web::post("/buyers")]
pub async fn register_buyer(
    form: web::types::Json<CreateAccountRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let buyer = api::catalog::register_buyer(
        api::catalog::NewAccount {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
        },
        &app_state.repo,
    )
    .await?;

    Ok(web::HttpResponse::Created().json(&buyer))
}

#[web::get("/buyers/{buyer_id}")]
pub async fn buyer_details(
    path: web::types::Path<BuyerPath>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let buyer = api::catalog::get_buyer(path.buyer_id, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&buyer))
}

#[web::post("/sellers")]
pub async fn register_seller(
    form: web::types::Json<CreateAccountRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let seller = api::catalog::register_seller(
        api::catalog::NewAccount {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
        },
        &app_state.repo,
    )
    .await?;

    Ok(web::HttpResponse::Created().json(&seller))
}

#[web::get("/sellers/{seller_id}")]
pub async fn seller_details(
    path: web::types::Path<SellerPath>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let seller = api::catalog::get_seller(path.seller_id, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&seller))
}

#[web::post("/vets")]
pub async fn register_vet(
    form: web::types::Json<CreateVetRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let vet = api::catalog::register_vet(
        api::catalog::NewVet {
            name: form.name.clone(),
            email: form.email.clone(),
            clinic_name: form.clinic_name.clone(),
        },
        &app_state.repo,
    )
    .await?;

    Ok(web::HttpResponse::Created().json(&vet))
}

#[web::get("/vets/{vet_id}")]
pub async fn vet_details(
    path: web::types::Path<VetPath>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let vet = api::catalog::get_vet(path.vet_id, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&vet))
}
