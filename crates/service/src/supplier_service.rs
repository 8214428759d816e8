use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use models::supplier;

use crate::{errors::ServiceError, geo};

/// Incoming supplier fields; every field is optional except that the
/// database enforces uniqueness on ruc/email/account_number.
#[derive(Debug, Clone, Default)]
pub struct SupplierInput {
    pub ruc: Option<String>,
    pub company_name: Option<String>,
    pub business_name: Option<String>,
    pub representative: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub account_number: Option<String>,
    pub region_id: Option<Uuid>,
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
}

/// Partial update. `None` keeps the stored value, `Some(None)` clears the
/// column, `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default)]
pub struct SupplierUpdate {
    pub ruc: Option<Option<String>>,
    pub company_name: Option<Option<String>>,
    pub business_name: Option<Option<String>>,
    pub representative: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub account_number: Option<Option<String>>,
    pub region_id: Option<Option<Uuid>>,
    pub province_id: Option<Option<Uuid>>,
    pub district_id: Option<Option<Uuid>>,
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<supplier::Model>, ServiceError> {
    supplier::Entity::find()
        .order_by_asc(supplier::Column::CompanyName)
        .order_by_asc(supplier::Column::Ruc)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<supplier::Model>, ServiceError> {
    supplier::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn create(db: &DatabaseConnection, input: SupplierInput) -> Result<supplier::Model, ServiceError> {
    if let Some(email) = &input.email {
        supplier::validate_email(email)?;
    }
    geo::validate_hierarchy(db, input.region_id, input.province_id, input.district_id).await?;

    let now = Utc::now().into();
    let am = supplier::ActiveModel {
        id: Set(Uuid::new_v4()),
        ruc: Set(input.ruc),
        company_name: Set(input.company_name),
        business_name: Set(input.business_name),
        representative: Set(input.representative),
        phone: Set(input.phone),
        email: Set(input.email),
        address: Set(input.address),
        account_number: Set(input.account_number),
        region_id: Set(input.region_id),
        province_id: Set(input.province_id),
        district_id: Set(input.district_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Partial update. Geo consistency is checked against the effective
/// combination of incoming and already-stored levels.
pub async fn update(db: &DatabaseConnection, id: Uuid, input: SupplierUpdate) -> Result<supplier::Model, ServiceError> {
    let found = get_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("supplier"))?;

    if let Some(Some(email)) = &input.email {
        supplier::validate_email(email)?;
    }
    let region_id = input.region_id.unwrap_or(found.region_id);
    let province_id = input.province_id.unwrap_or(found.province_id);
    let district_id = input.district_id.unwrap_or(found.district_id);
    geo::validate_hierarchy(db, region_id, province_id, district_id).await?;

    let mut am: supplier::ActiveModel = found.into();
    if let Some(v) = input.ruc { am.ruc = Set(v); }
    if let Some(v) = input.company_name { am.company_name = Set(v); }
    if let Some(v) = input.business_name { am.business_name = Set(v); }
    if let Some(v) = input.representative { am.representative = Set(v); }
    if let Some(v) = input.phone { am.phone = Set(v); }
    if let Some(v) = input.email { am.email = Set(v); }
    if let Some(v) = input.address { am.address = Set(v); }
    if let Some(v) = input.account_number { am.account_number = Set(v); }
    if let Some(v) = input.region_id { am.region_id = Set(v); }
    if let Some(v) = input.province_id { am.province_id = Set(v); }
    if let Some(v) = input.district_id { am.district_id = Set(v); }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Hard delete; `false` means the id did not exist.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = supplier::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_geo};

    #[tokio::test]
    async fn supplier_geo_mismatch_is_rejected() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(_) => return Ok(()),
        };
        let geo = seed_geo(&db).await?;

        // province from another region
        let bad = SupplierInput {
            company_name: Some("Mismatch SAC".into()),
            region_id: Some(geo.other_region.id),
            province_id: Some(geo.province.id),
            ..Default::default()
        };
        let res = create(&db, bad).await;
        assert!(matches!(res, Err(ServiceError::FieldValidation { ref field, .. }) if field == "province"));

        // district from another province
        let bad = SupplierInput {
            company_name: Some("Mismatch SAC".into()),
            region_id: Some(geo.region.id),
            province_id: Some(geo.province.id),
            district_id: Some(geo.other_district.id),
            ..Default::default()
        };
        let res = create(&db, bad).await;
        assert!(matches!(res, Err(ServiceError::FieldValidation { ref field, .. }) if field == "district"));

        geo.cleanup(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn supplier_crud_round_trip() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(_) => return Ok(()),
        };
        let geo = seed_geo(&db).await?;

        let suffix = Uuid::new_v4();
        let input = SupplierInput {
            ruc: Some(format!("20{}", &suffix.simple().to_string()[..9])),
            company_name: Some("Comercial Andina SAC".into()),
            email: Some(format!("contacto_{}@example.com", suffix)),
            region_id: Some(geo.region.id),
            province_id: Some(geo.province.id),
            district_id: Some(geo.district.id),
            ..Default::default()
        };
        let created = create(&db, input.clone()).await?;
        let fetched = get_by_id(&db, created.id).await?.unwrap();
        assert_eq!(fetched.company_name, input.company_name);
        assert_eq!(fetched.district_id, Some(geo.district.id));

        let updated = update(&db, created.id, SupplierUpdate { phone: Some(Some("01-555-0100".into())), ..Default::default() }).await?;
        assert_eq!(updated.phone.as_deref(), Some("01-555-0100"));
        assert_eq!(updated.company_name, input.company_name);

        // explicit null clears the column while absent fields keep theirs
        let cleared = update(&db, created.id, SupplierUpdate { phone: Some(None), ..Default::default() }).await?;
        assert!(cleared.phone.is_none());
        assert_eq!(cleared.company_name, input.company_name);

        assert!(delete(&db, created.id).await?);
        assert!(!delete(&db, created.id).await?);

        geo.cleanup(&db).await?;
        Ok(())
    }
}
