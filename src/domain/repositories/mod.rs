//! Repository trait definitions for the domain layer.
//!
//! A single generic trait, [`ResourceRepository`], abstracts storage for
//! every resource. Implementations live in `crate::infrastructure::persistence`.
//!
//! # Testing
//!
//! Services are unit-tested against `mockall` mocks of this trait; see
//! `tests/repository_*.rs` for the PostgreSQL implementations.

pub mod resource_repository;

pub use resource_repository::ResourceRepository;
