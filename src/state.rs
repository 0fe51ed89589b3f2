//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, ResourceService};
use crate::domain::entities::{Brands, CarTypes, Cars, Rents};
use crate::infrastructure::persistence::{
    PgBrandRepository, PgCarRepository, PgCarTypeRepository, PgRentRepository,
};

pub type BrandService = ResourceService<Brands, PgBrandRepository>;
pub type CarTypeService = ResourceService<CarTypes, PgCarTypeRepository>;
pub type CarService = ResourceService<Cars, PgCarRepository>;
pub type RentService = ResourceService<Rents, PgRentRepository>;

/// Connection pool plus the immutable service graph built on it.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub auth_service: Arc<AuthService>,
    pub brand_service: Arc<BrandService>,
    pub car_type_service: Arc<CarTypeService>,
    pub car_service: Arc<CarService>,
    pub rent_service: Arc<RentService>,
}

impl AppState {
    /// Wires one PostgreSQL repository and service per resource.
    pub fn new(pool: Arc<PgPool>, auth_service: AuthService) -> Self {
        Self {
            brand_service: Arc::new(ResourceService::new(Arc::new(PgBrandRepository::new(
                pool.clone(),
            )))),
            car_type_service: Arc::new(ResourceService::new(Arc::new(
                PgCarTypeRepository::new(pool.clone()),
            ))),
            car_service: Arc::new(ResourceService::new(Arc::new(PgCarRepository::new(
                pool.clone(),
            )))),
            rent_service: Arc::new(ResourceService::new(Arc::new(PgRentRepository::new(
                pool.clone(),
            )))),
            auth_service: Arc::new(auth_service),
            pool,
        }
    }
}
