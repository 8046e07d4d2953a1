use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const NAME_MAX_LEN: usize = 255;

/// Classification of a parcel. No transition rules: any value may replace any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "SAVED")]
    Saved,
    #[sea_orm(string_value = "SHORT_LISTED")]
    ShortListed,
    #[sea_orm(string_value = "UNDER_CONSIDERATION")]
    UnderConsideration,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Saved => "SAVED",
            Status::ShortListed => "SHORT_LISTED",
            Status::UnderConsideration => "UNDER_CONSIDERATION",
            Status::Approved => "APPROVED",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "land_parcel")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub status: Status,
    #[sea_orm(column_type = "Double")]
    pub area: f64,
    pub has_constraints: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A stored land parcel.
pub type LandParcel = Model;

impl Model {
    /// Replace the mutable fields wholesale; the id is left untouched.
    pub fn apply(&mut self, fields: NewLandParcel) {
        self.name = fields.name;
        self.status = fields.status;
        self.area = fields.area;
        self.has_constraints = fields.has_constraints;
    }
}

/// The four client-controlled fields of a parcel, without an identifier.
///
/// Built through [`NewLandParcel::new`], which validates, or from an existing
/// record, which copies everything except the id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewLandParcel {
    name: String,
    status: Status,
    area: f64,
    has_constraints: bool,
}

impl NewLandParcel {
    pub fn new(name: impl Into<String>, status: Status, area: f64, has_constraints: bool) -> Result<Self, ModelError> {
        let name = name.into();
        validate_name(&name)?;
        validate_area(area)?;
        Ok(Self { name, status, area, has_constraints })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn status(&self) -> Status { self.status }
    pub fn area(&self) -> f64 { self.area }
    pub fn has_constraints(&self) -> bool { self.has_constraints }

    /// Attach an identifier, producing a full record.
    pub fn into_parcel(self, id: i64) -> Model {
        Model {
            id,
            name: self.name,
            status: self.status,
            area: self.area,
            has_constraints: self.has_constraints,
        }
    }
}

impl From<Model> for NewLandParcel {
    fn from(m: Model) -> Self {
        Self { name: m.name, status: m.status, area: m.area, has_constraints: m.has_constraints }
    }
}

/// Envelope returned by the list operation: `{"landParcels": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandParcelResponse {
    pub land_parcels: Vec<Model>,
}

impl LandParcelResponse {
    pub fn new(land_parcels: Vec<Model>) -> Self { Self { land_parcels } }
    pub fn is_empty(&self) -> bool { self.land_parcels.is_empty() }
    pub fn len(&self) -> usize { self.land_parcels.len() }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(ModelError::Validation(format!("name longer than {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

pub fn validate_area(area: f64) -> Result<(), ModelError> {
    if !area.is_finite() || area < 0.0 {
        return Err(ModelError::Validation("area must be a non-negative number".into()));
    }
    Ok(())
}

/// Insert a new row; the database assigns the id.
pub async fn create(db: &DatabaseConnection, fields: NewLandParcel) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(fields.name),
        status: Set(fields.status),
        area: Set(fields.area),
        has_constraints: Set(fields.has_constraints),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite the mutable columns of the row identified by `parcel.id`.
pub async fn overwrite(db: &DatabaseConnection, parcel: Model) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Unchanged(parcel.id),
        name: Set(parcel.name),
        status: Set(parcel.status),
        area: Set(parcel.area),
        has_constraints: Set(parcel.has_constraints),
    };
    Ok(am.update(db).await?)
}
