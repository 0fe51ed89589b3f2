//! HTTP description of each resource: DTOs, mount path and access policy.

use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::api::dto::brand::{BrandResponse, CreateBrandRequest, UpdateBrandRequest};
use crate::api::dto::car::{CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::api::dto::car_type::{CarTypeResponse, CreateCarTypeRequest, UpdateCarTypeRequest};
use crate::api::dto::rent::{CreateRentRequest, RentResponse, UpdateRentRequest};
use crate::application::services::ResourceService;
use crate::domain::entities::{Brands, CarTypes, Cars, Rents};
use crate::domain::repositories::ResourceRepository;
use crate::domain::resource::Resource;
use crate::infrastructure::persistence::{
    PgBrandRepository, PgCarRepository, PgCarTypeRepository, PgRentRepository,
};
use crate::state::AppState;

/// Whether a route needs a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Bearer,
}

/// Access rules for the read routes of a resource.
///
/// Create and partial update always require a bearer token. `replace`
/// controls whether `PUT /{id}` is mounted at all; when it is not, the verb
/// answers `405`.
#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    pub list: Access,
    pub count: Access,
    pub fetch: Access,
    pub replace: bool,
}

/// A [`Resource`] exposed over HTTP.
pub trait ApiResource: Resource + Sized {
    type Repository: ResourceRepository<Self>;
    type CreateRequest: DeserializeOwned + Validate + Into<Self::Draft> + Send + 'static;
    type UpdateRequest: DeserializeOwned + Validate + Into<Self::Patch> + Send + 'static;
    type Response: Serialize + From<Self::Entity> + Send + 'static;

    /// Mount point under the application root.
    const PATH: &'static str;
    const POLICY: RoutePolicy;

    fn service(state: &AppState) -> &ResourceService<Self, Self::Repository>;
}

impl ApiResource for Brands {
    type Repository = PgBrandRepository;
    type CreateRequest = CreateBrandRequest;
    type UpdateRequest = UpdateBrandRequest;
    type Response = BrandResponse;

    const PATH: &'static str = "/brands";
    const POLICY: RoutePolicy = RoutePolicy {
        list: Access::Public,
        count: Access::Public,
        fetch: Access::Public,
        replace: true,
    };

    fn service(state: &AppState) -> &ResourceService<Self, Self::Repository> {
        &state.brand_service
    }
}

impl ApiResource for CarTypes {
    type Repository = PgCarTypeRepository;
    type CreateRequest = CreateCarTypeRequest;
    type UpdateRequest = UpdateCarTypeRequest;
    type Response = CarTypeResponse;

    const PATH: &'static str = "/types";
    const POLICY: RoutePolicy = RoutePolicy {
        list: Access::Public,
        count: Access::Bearer,
        fetch: Access::Public,
        replace: true,
    };

    fn service(state: &AppState) -> &ResourceService<Self, Self::Repository> {
        &state.car_type_service
    }
}

impl ApiResource for Cars {
    type Repository = PgCarRepository;
    type CreateRequest = CreateCarRequest;
    type UpdateRequest = UpdateCarRequest;
    type Response = CarResponse;

    const PATH: &'static str = "/cars";
    const POLICY: RoutePolicy = RoutePolicy {
        list: Access::Public,
        count: Access::Bearer,
        fetch: Access::Public,
        replace: true,
    };

    fn service(state: &AppState) -> &ResourceService<Self, Self::Repository> {
        &state.car_service
    }
}

impl ApiResource for Rents {
    type Repository = PgRentRepository;
    type CreateRequest = CreateRentRequest;
    type UpdateRequest = UpdateRentRequest;
    type Response = RentResponse;

    const PATH: &'static str = "/rents";
    const POLICY: RoutePolicy = RoutePolicy {
        list: Access::Bearer,
        count: Access::Bearer,
        fetch: Access::Bearer,
        replace: false,
    };

    fn service(state: &AppState) -> &ResourceService<Self, Self::Repository> {
        &state.rent_service
    }
}
