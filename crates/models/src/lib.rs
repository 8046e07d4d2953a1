pub mod errors;
pub mod db;
pub mod land_parcel;

pub use land_parcel::{LandParcel, LandParcelResponse, NewLandParcel, Status};
