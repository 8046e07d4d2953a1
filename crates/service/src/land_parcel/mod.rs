//! Land parcel CRUD: the storage port (`repository`) and the business rules
//! on top of it (`service`).

pub mod repository;
pub mod service;

pub use repository::{memory::InMemoryLandParcelRepository, LandParcelRepository, SeaOrmLandParcelRepository};
pub use service::ParcelService;
