use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{district, document_type, errors, province, region, role};

pub const GENDERS: [&str; 3] = ["M", "F", "O"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub last_name_paternal: Option<String>,
    pub last_name_maternal: Option<String>,
    pub document_type_id: Option<Uuid>,
    pub document_number: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<Date>,
    pub region_id: Option<Uuid>,
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub role_id: Option<Uuid>,
    pub salary: Option<Decimal>,
    pub address: Option<String>,
    /// Storage-relative path of the profile photo, e.g. `employee_photos/<id>.jpg`.
    pub photo: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    DocumentType,
    Region,
    Province,
    District,
    Role,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::DocumentType => Entity::belongs_to(document_type::Entity)
                .from(Column::DocumentTypeId)
                .to(document_type::Column::Id)
                .into(),
            Relation::Region => Entity::belongs_to(region::Entity)
                .from(Column::RegionId)
                .to(region::Column::Id)
                .into(),
            Relation::Province => Entity::belongs_to(province::Entity)
                .from(Column::ProvinceId)
                .to(province::Column::Id)
                .into(),
            Relation::District => Entity::belongs_to(district::Entity)
                .from(Column::DistrictId)
                .to(district::Column::Id)
                .into(),
            Relation::Role => Entity::belongs_to(role::Entity)
                .from(Column::RoleId)
                .to(role::Column::Id)
                .into(),
        }
    }
}

impl Related<document_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Concatenation of the name parts that are present.
    pub fn full_name(&self) -> String {
        [&self.name, &self.last_name_paternal, &self.last_name_maternal]
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_gender(gender: &str) -> Result<(), errors::ModelError> {
    if !GENDERS.contains(&gender) {
        return Err(errors::ModelError::Validation("gender must be one of M, F, O".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(name: Option<&str>, pat: Option<&str>, mat: Option<&str>) -> Model {
        let now = Utc::now().into();
        Model {
            id: Uuid::new_v4(),
            name: name.map(Into::into),
            last_name_paternal: pat.map(Into::into),
            last_name_maternal: mat.map(Into::into),
            document_type_id: None,
            document_number: None,
            email: "e@example.com".into(),
            gender: None,
            phone: None,
            birth_date: None,
            region_id: None,
            province_id: None,
            district_id: None,
            role_id: None,
            salary: None,
            address: None,
            photo: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn full_name_skips_missing_parts() {
        assert_eq!(model(Some("Ana"), Some("Diaz"), None).full_name(), "Ana Diaz");
        assert_eq!(model(None, None, None).full_name(), "");
        assert_eq!(model(Some("Ana"), Some("Diaz"), Some("Leon")).full_name(), "Ana Diaz Leon");
    }

    #[test]
    fn gender_choices() {
        assert!(validate_gender("M").is_ok());
        assert!(validate_gender("F").is_ok());
        assert!(validate_gender("O").is_ok());
        assert!(validate_gender("X").is_err());
    }
}
