//! Pet listing endpoints.

use crate::{api, rest::AppState};
use ntex::web;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub seller_id: i64,
    pub animal_type: String,
    pub breed: String,
    pub pet_name: String,
    pub pet_age: i64,
    #[serde(default)]
    pub descriptions: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PetPath {
    pub pet_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SellerPath {
    pub seller_id: i64,
}

/// Publishes a seller's pet on the marketplace.
#[web::post("")]
pub async fn create_pet(
    form: web::types::Json<CreatePetRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet = api::catalog::list_pet(
        api::catalog::NewPetListing {
            seller_id: form.seller_id,
            animal_type: form.animal_type.clone(),
            breed: form.breed.clone(),
            pet_name: form.pet_name.clone(),
            pet_age: form.pet_age,
            descriptions: form.descriptions.clone(),
            image_urls: form.image_urls.clone(),
        },
        &app_state.repo,
    )
    .await?;

    Ok(web::HttpResponse::Created().json(&pet))
}

/// Pets currently open for adoption.
#[web::get("")]
pub async fn available_pets(
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pets = api::catalog::available_pets(&app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&pets))
}

#[web::get("/{pet_id}")]
pub async fn pet_details(
    path: web::types::Path<PetPath>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet = api::catalog::get_pet(path.pet_id, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&pet))
}

#[web::get("/seller/{seller_id}")]
pub async fn seller_pets(
    path: web::types::Path<SellerPath>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pets = api::catalog::seller_pets(path.seller_id, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&pets))
}
