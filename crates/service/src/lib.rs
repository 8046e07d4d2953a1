//! Service layer providing the land parcel CRUD rules on top of models.
//! - Separates business logic from data access behind `LandParcelRepository`.
//! - Reuses validation and entity definitions in `models` crate.
//! - Raises `ServiceError::NotFound` for update/delete of unknown ids and
//!   propagates every other failure unchanged.

pub mod errors;
pub mod land_parcel;
#[cfg(test)]
pub mod test_support;
