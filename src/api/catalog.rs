//! Supporting marketplace surface: buyer/seller/vet accounts, pet listings
//! and the services vets publish for appointment booking.

use crate::{consts, models, repo, rest::errors::ApiError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Registration input shared by buyers and sellers.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewVet {
    pub name: String,
    pub email: String,
    pub clinic_name: String,
}

pub async fn register_buyer(
    input: NewAccount,
    repo: &repo::ImplAppRepo,
) -> Result<models::account::Buyer, ApiError> {
    let buyer = models::account::Buyer {
        id: 0,
        name: input.name,
        email: input.email,
        phone: input.phone,
        created_at: Utc::now(),
    };

    let buyer_id = repo.insert_buyer(&buyer).await?;

    Ok(models::account::Buyer {
        id: buyer_id,
        ..buyer
    })
}

pub async fn get_buyer(
    buyer_id: i64,
    repo: &repo::ImplAppRepo,
) -> Result<models::account::Buyer, ApiError> {
    repo.get_buyer(buyer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("buyer {buyer_id} does not exist")))
}

pub async fn register_seller(
    input: NewAccount,
    repo: &repo::ImplAppRepo,
) -> Result<models::account::Seller, ApiError> {
    let seller = models::account::Seller {
        id: 0,
        name: input.name,
        email: input.email,
        phone: input.phone,
        created_at: Utc::now(),
    };

    let seller_id = repo.insert_seller(&seller).await?;

    Ok(models::account::Seller {
        id: seller_id,
        ..seller
    })
}

pub async fn get_seller(
    seller_id: i64,
    repo: &repo::ImplAppRepo,
) -> Result<models::account::Seller, ApiError> {
    repo.get_seller(seller_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("seller {seller_id} does not exist")))
}

pub async fn register_vet(
    input: NewVet,
    repo: &repo::ImplAppRepo,
) -> Result<models::account::Vet, ApiError> {
    let vet = models::account::Vet {
        id: 0,
        name: input.name,
        email: input.email,
        clinic_name: input.clinic_name,
        created_at: Utc::now(),
    };

    let vet_id = repo.insert_vet(&vet).await?;

    Ok(models::account::Vet { id: vet_id, ..vet })
}

pub async fn get_vet(
    vet_id: i64,
    repo: &repo::ImplAppRepo,
) -> Result<models::account::Vet, ApiError> {
    repo.get_vet(vet_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("vet {vet_id} does not exist")))
}

/// Input for a seller's new pet listing.
#[derive(Debug, Clone)]
pub struct NewPetListing {
    pub seller_id: i64,
    pub animal_type: String,
    pub breed: String,
    pub pet_name: String,
    pub pet_age: i64,
    pub descriptions: String,
    pub image_urls: Vec<String>,
}

/// Wire shape of a pet listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetSchema {
    pub id: i64,
    pub external_id: Uuid,
    pub seller_id: i64,
    pub animal_type: String,
    pub breed: String,
    pub pet_name: String,
    pub pet_age: i64,
    pub descriptions: String,
    pub image_urls: Vec<String>,
    pub status: models::pet::PetStatus,
    pub created_at: DateTime<Utc>,
}

impl From<models::pet::Pet> for PetSchema {
    fn from(val: models::pet::Pet) -> Self {
        PetSchema {
            id: val.id,
            external_id: val.external_id,
            seller_id: val.seller_id,
            animal_type: val.animal_type,
            breed: val.breed,
            pet_name: val.pet_name,
            pet_age: val.pet_age,
            descriptions: val.descriptions,
            image_urls: val.image_urls,
            status: val.status,
            created_at: val.created_at,
        }
    }
}

/// Publishes a seller's pet on the marketplace.
///
/// New listings always start `available`; only the booking lifecycle moves
/// them out of that state afterwards.
pub async fn list_pet(
    input: NewPetListing,
    repo: &repo::ImplAppRepo,
) -> Result<PetSchema, ApiError> {
    get_seller(input.seller_id, repo).await?;

    if input.image_urls.len() > consts::MAX_PET_IMAGE_URLS {
        return Err(ApiError::Validation(format!(
            "a listing holds at most {} pictures",
            consts::MAX_PET_IMAGE_URLS
        )));
    }

    let now = Utc::now();
    let pet = models::pet::Pet {
        id: 0,
        external_id: Uuid::new_v4(),
        seller_id: input.seller_id,
        animal_type: input.animal_type,
        breed: input.breed,
        pet_name: input.pet_name,
        pet_age: input.pet_age,
        descriptions: input.descriptions,
        image_urls: input.image_urls,
        status: models::pet::PetStatus::default(),
        created_at: now,
        updated_at: now,
    };

    let pet_id = repo.insert_pet(&pet).await?;

    Ok(models::pet::Pet { id: pet_id, ..pet }.into())
}

pub async fn get_pet(pet_id: i64, repo: &repo::ImplAppRepo) -> Result<PetSchema, ApiError> {
    Ok(repo
        .get_pet(pet_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("pet {pet_id} does not exist")))?
        .into())
}

/// Pets currently open for adoption, newest listing first.
pub async fn available_pets(repo: &repo::ImplAppRepo) -> Result<Vec<PetSchema>, ApiError> {
    Ok(repo
        .get_available_pets()
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub async fn seller_pets(
    seller_id: i64,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<PetSchema>, ApiError> {
    Ok(repo
        .get_pets_by_seller(seller_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Input for a vet's new published service.
#[derive(Debug, Clone)]
pub struct NewVetService {
    pub vet_id: i64,
    pub service_name: String,
    pub descriptions: String,
    pub price: Decimal,
}

pub async fn add_vet_service(
    input: NewVetService,
    repo: &repo::ImplAppRepo,
) -> Result<models::service::VetService, ApiError> {
    get_vet(input.vet_id, repo).await?;

    let service = models::service::VetService {
        id: 0,
        vet_id: input.vet_id,
        service_name: input.service_name,
        descriptions: input.descriptions,
        price: input.price,
        created_at: Utc::now(),
    };

    let service_id = repo.insert_vet_service(&service).await?;

    Ok(models::service::VetService {
        id: service_id,
        ..service
    })
}

pub async fn vet_services(
    vet_id: i64,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<models::service::VetService>, ApiError> {
    Ok(repo.get_services_by_vet(vet_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use mockall::predicate::*;

    fn create_test_seller(id: i64) -> models::account::Seller {
        models::account::Seller {
            id,
            name: "Marta".to_string(),
            email: "marta@example.com".to_string(),
            phone: None,
            created_at: Utc::now(),
        }
    }

    fn new_listing_input(seller_id: i64) -> NewPetListing {
        NewPetListing {
            seller_id,
            animal_type: "cat".to_string(),
            breed: "siamese".to_string(),
            pet_name: "Mishi".to_string(),
            pet_age: 2,
            descriptions: "calm indoor cat".to_string(),
            image_urls: vec!["pets/mishi-1.jpg".to_string()],
        }
    }

    #[ntex::test]
    async fn test_list_pet_starts_available() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_seller()
            .with(eq(1))
            .times(1)
            .returning(|seller_id| Ok(Some(create_test_seller(seller_id))));
        mock_repo
            .expect_insert_pet()
            .withf(|pet| pet.seller_id == 1 && pet.status == models::pet::PetStatus::Available)
            .times(1)
            .returning(|_| Ok(10));

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let pet = list_pet(new_listing_input(1), &repo).await.unwrap();

        assert_eq!(pet.id, 10);
        assert_eq!(pet.status, models::pet::PetStatus::Available);
    }

    #[ntex::test]
    async fn test_list_pet_unknown_seller() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_seller()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_insert_pet().times(0);

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = list_pet(new_listing_input(404), &repo).await.unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[ntex::test]
    async fn test_list_pet_caps_picture_count() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_seller()
            .times(1)
            .returning(|seller_id| Ok(Some(create_test_seller(seller_id))));
        mock_repo.expect_insert_pet().times(0);

        let mut input = new_listing_input(1);
        input.image_urls = (0..=consts::MAX_PET_IMAGE_URLS)
            .map(|n| format!("pets/mishi-{n}.jpg"))
            .collect();

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = list_pet(input, &repo).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[ntex::test]
    async fn test_register_buyer_assigns_id() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_insert_buyer()
            .withf(|buyer| buyer.email == "ana@example.com")
            .times(1)
            .returning(|_| Ok(3));

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let buyer = register_buyer(
            NewAccount {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                phone: None,
            },
            &repo,
        )
        .await
        .unwrap();

        assert_eq!(buyer.id, 3);
    }
}
