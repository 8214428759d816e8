use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use models::{document_type, employee, role};

use crate::{document_rules, errors::ServiceError, geo, photo, photo::PhotoStore};

/// Incoming employee fields for create. Email is the only required field;
/// everything else mirrors the nullable columns.
#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub name: Option<String>,
    pub last_name_paternal: Option<String>,
    pub last_name_maternal: Option<String>,
    pub document_type_id: Option<Uuid>,
    pub document_number: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub region_id: Option<Uuid>,
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub role_id: Option<Uuid>,
    pub salary: Option<Decimal>,
    pub address: Option<String>,
}

/// Partial update. The outer `Option` tracks field presence: `None` keeps
/// the stored value, `Some(None)` clears the column, `Some(Some(v))` sets
/// it. Email is not nullable, so it only carries set-or-keep.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<Option<String>>,
    pub last_name_paternal: Option<Option<String>>,
    pub last_name_maternal: Option<Option<String>>,
    pub document_type_id: Option<Option<Uuid>>,
    pub document_number: Option<Option<String>>,
    pub email: Option<String>,
    pub gender: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub birth_date: Option<Option<NaiveDate>>,
    pub region_id: Option<Option<Uuid>>,
    pub province_id: Option<Option<Uuid>>,
    pub district_id: Option<Option<Uuid>>,
    pub role_id: Option<Option<Uuid>>,
    pub salary: Option<Option<Decimal>>,
    pub address: Option<Option<String>>,
}

pub fn validate_birth_date(birth_date: NaiveDate) -> Result<(), String> {
    let today = Utc::now().date_naive();
    if birth_date > today {
        return Err("birth date cannot be in the future".into());
    }
    if today.years_since(birth_date).unwrap_or(0) < 18 {
        return Err("employee must be at least 18 years old".into());
    }
    Ok(())
}

/// Format rules apply only when the document type can be resolved.
async fn validate_document(
    db: &DatabaseConnection,
    document_type_id: Option<Uuid>,
    document_number: Option<&str>,
) -> Result<(), ServiceError> {
    let (Some(type_id), Some(number)) = (document_type_id, document_number) else {
        if let Some(type_id) = document_type_id {
            document_type::Entity::find_by_id(type_id)
                .one(db)
                .await
                .map_err(|e| ServiceError::Db(e.to_string()))?
                .ok_or_else(|| ServiceError::field("document_type", "document type does not exist"))?;
        }
        return Ok(());
    };
    let doc_type = document_type::Entity::find_by_id(type_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::field("document_type", "document type does not exist"))?;
    document_rules::validate_document_number(&doc_type.name, number)
        .map_err(|m| ServiceError::field("document_number", m))
}

async fn ensure_role(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    role::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::field("role", "role does not exist"))?;
    Ok(())
}

fn active_filter(search: Option<&str>) -> Condition {
    let mut cond = Condition::all().add(employee::Column::DeletedAt.is_null());
    if let Some(q) = search {
        let q = q.trim();
        if !q.is_empty() {
            let pat = format!("%{}%", q);
            cond = cond.add(
                Condition::any()
                    .add(Expr::col(employee::Column::Name).ilike(pat.clone()))
                    .add(Expr::col(employee::Column::LastNamePaternal).ilike(pat.clone()))
                    .add(Expr::col(employee::Column::LastNameMaternal).ilike(pat.clone()))
                    .add(Expr::col(employee::Column::DocumentNumber).ilike(pat.clone()))
                    .add(Expr::col(employee::Column::Email).ilike(pat)),
            );
        }
    }
    cond
}

/// Active rows ordered by name parts; `search` matches name, last names,
/// document number and email case-insensitively.
pub async fn list_active(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<employee::Model>, ServiceError> {
    employee::Entity::find()
        .filter(active_filter(search))
        .order_by_asc(employee::Column::Name)
        .order_by_asc(employee::Column::LastNamePaternal)
        .order_by_asc(employee::Column::LastNameMaternal)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_active(db: &DatabaseConnection, id: Uuid) -> Result<Option<employee::Model>, ServiceError> {
    employee::Entity::find_by_id(id)
        .filter(employee::Column::DeletedAt.is_null())
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn create(db: &DatabaseConnection, input: EmployeeInput) -> Result<employee::Model, ServiceError> {
    employee::validate_email(&input.email)?;
    if let Some(g) = &input.gender {
        employee::validate_gender(g)?;
    }
    if let Some(d) = input.birth_date {
        validate_birth_date(d).map_err(|m| ServiceError::field("birth_date", m))?;
    }
    validate_document(db, input.document_type_id, input.document_number.as_deref()).await?;
    geo::validate_hierarchy(db, input.region_id, input.province_id, input.district_id).await?;
    if let Some(rid) = input.role_id {
        ensure_role(db, rid).await?;
    }

    let now = Utc::now().into();
    let am = employee::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        last_name_paternal: Set(input.last_name_paternal),
        last_name_maternal: Set(input.last_name_maternal),
        document_type_id: Set(input.document_type_id),
        document_number: Set(input.document_number),
        email: Set(input.email),
        gender: Set(input.gender),
        phone: Set(input.phone),
        birth_date: Set(input.birth_date),
        region_id: Set(input.region_id),
        province_id: Set(input.province_id),
        district_id: Set(input.district_id),
        role_id: Set(input.role_id),
        salary: Set(input.salary),
        address: Set(input.address),
        photo: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Partial update. Cross-field rules are re-checked against the effective
/// combination of incoming and stored values.
pub async fn update(db: &DatabaseConnection, id: Uuid, input: EmployeeUpdate) -> Result<employee::Model, ServiceError> {
    let found = get_active(db, id).await?.ok_or_else(|| ServiceError::not_found("employee"))?;

    if let Some(email) = &input.email {
        employee::validate_email(email)?;
    }
    if let Some(Some(g)) = &input.gender {
        employee::validate_gender(g)?;
    }
    if let Some(Some(d)) = input.birth_date {
        validate_birth_date(d).map_err(|m| ServiceError::field("birth_date", m))?;
    }

    let document_type_id = input.document_type_id.unwrap_or(found.document_type_id);
    let document_number = input.document_number.clone().unwrap_or_else(|| found.document_number.clone());
    validate_document(db, document_type_id, document_number.as_deref()).await?;

    let region_id = input.region_id.unwrap_or(found.region_id);
    let province_id = input.province_id.unwrap_or(found.province_id);
    let district_id = input.district_id.unwrap_or(found.district_id);
    geo::validate_hierarchy(db, region_id, province_id, district_id).await?;
    if let Some(Some(rid)) = input.role_id {
        ensure_role(db, rid).await?;
    }

    let mut am: employee::ActiveModel = found.into();
    if let Some(v) = input.name { am.name = Set(v); }
    if let Some(v) = input.last_name_paternal { am.last_name_paternal = Set(v); }
    if let Some(v) = input.last_name_maternal { am.last_name_maternal = Set(v); }
    if let Some(v) = input.document_type_id { am.document_type_id = Set(v); }
    if let Some(v) = input.document_number { am.document_number = Set(v); }
    if let Some(email) = input.email { am.email = Set(email); }
    if let Some(v) = input.gender { am.gender = Set(v); }
    if let Some(v) = input.phone { am.phone = Set(v); }
    if let Some(v) = input.birth_date { am.birth_date = Set(v); }
    if let Some(v) = input.region_id { am.region_id = Set(v); }
    if let Some(v) = input.province_id { am.province_id = Set(v); }
    if let Some(v) = input.district_id { am.district_id = Set(v); }
    if let Some(v) = input.role_id { am.role_id = Set(v); }
    if let Some(v) = input.salary { am.salary = Set(v); }
    if let Some(v) = input.address { am.address = Set(v); }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Stamp `deleted_at`; the row stays fetchable by raw primary key.
pub async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> Result<employee::Model, ServiceError> {
    let found = get_active(db, id).await?.ok_or_else(|| ServiceError::not_found("employee"))?;
    let mut am: employee::ActiveModel = found.into();
    am.deleted_at = Set(Some(Utc::now().into()));
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Store a new profile photo. The prior file is removed from storage
/// before the new one is written; a crash in between leaves the column
/// pointing at a missing file, which `PhotoStore::remove` tolerates.
pub async fn set_photo(
    db: &DatabaseConnection,
    store: &PhotoStore,
    id: Uuid,
    content_type: &str,
    bytes: &[u8],
) -> Result<employee::Model, ServiceError> {
    let found = get_active(db, id).await?.ok_or_else(|| ServiceError::not_found("employee"))?;
    photo::validate_photo(content_type, bytes.len())?;
    if let Some(prior) = &found.photo {
        store.remove(prior).await?;
    }
    let rel = store.save(found.id, content_type, bytes).await?;
    let mut am: employee::ActiveModel = found.into();
    am.photo = Set(Some(rel));
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Remove the stored file and clear the column reference.
pub async fn clear_photo(
    db: &DatabaseConnection,
    store: &PhotoStore,
    id: Uuid,
) -> Result<employee::Model, ServiceError> {
    let found = get_active(db, id).await?.ok_or_else(|| ServiceError::not_found("employee"))?;
    if let Some(prior) = &found.photo {
        store.remove(prior).await?;
    }
    let mut am: employee::ActiveModel = found.into();
    am.photo = Set(None);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_geo};

    fn base_input(email: String) -> EmployeeInput {
        EmployeeInput {
            name: Some("Ana".into()),
            last_name_paternal: Some("Diaz".into()),
            last_name_maternal: None,
            document_type_id: None,
            document_number: None,
            email,
            gender: Some("F".into()),
            phone: None,
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 12),
            region_id: None,
            province_id: None,
            district_id: None,
            role_id: None,
            salary: None,
            address: None,
        }
    }

    #[test]
    fn birth_date_bounds() {
        assert!(validate_birth_date(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()).is_ok());
        let future = Utc::now().date_naive() + chrono::Days::new(1);
        assert!(validate_birth_date(future).is_err());
        let minor = Utc::now().date_naive() - chrono::Days::new(365 * 10);
        assert!(validate_birth_date(minor).is_err());
    }

    #[tokio::test]
    async fn employee_crud_soft_delete_and_search() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(_) => return Ok(()),
        };

        let marker = Uuid::new_v4().simple().to_string();
        let email = format!("ana_{}@example.com", marker);
        let created = create(&db, base_input(email.clone())).await?;
        assert_eq!(created.email, email);
        assert_eq!(created.full_name(), "Ana Diaz");

        // round trip
        let fetched = get_active(&db, created.id).await?.unwrap();
        assert_eq!(fetched.name.as_deref(), Some("Ana"));
        assert_eq!(fetched.gender.as_deref(), Some("F"));

        // search by email fragment, case-insensitive
        let hits = list_active(&db, Some(&marker.to_uppercase())).await?;
        assert!(hits.iter().any(|e| e.id == created.id));
        let misses = list_active(&db, Some("no-such-employee-fragment")).await?;
        assert!(misses.iter().all(|e| e.id != created.id));

        let updated = update(&db, created.id, EmployeeUpdate { phone: Some(Some("999-111-222".into())), ..Default::default() }).await?;
        assert_eq!(updated.phone.as_deref(), Some("999-111-222"));

        // an explicit null clears the column, an absent field keeps it
        let cleared = update(&db, created.id, EmployeeUpdate { phone: Some(None), ..Default::default() }).await?;
        assert!(cleared.phone.is_none());
        assert_eq!(cleared.name.as_deref(), Some("Ana"));

        let deleted = soft_delete(&db, created.id).await?;
        assert!(deleted.deleted_at.is_some());
        assert!(get_active(&db, created.id).await?.is_none());
        // still fetchable by raw primary key
        let raw = employee::Entity::find_by_id(created.id).one(&db).await?;
        assert!(raw.is_some());

        // deleting again reports not found
        assert!(matches!(soft_delete(&db, created.id).await, Err(ServiceError::NotFound(_))));

        employee::Entity::delete_by_id(created.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn employee_geo_and_document_rules() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(_) => return Ok(()),
        };
        let geo = seed_geo(&db).await?;

        // province outside the region is rejected
        let mut input = base_input(format!("geo_{}@example.com", Uuid::new_v4()));
        input.region_id = Some(geo.other_region.id);
        input.province_id = Some(geo.province.id);
        let res = create(&db, input).await;
        assert!(matches!(res, Err(ServiceError::FieldValidation { ref field, .. }) if field == "province"));

        // DNI of 7 digits is rejected, 8 accepted
        let dni = document_type::create(&db, &format!("DNI-{}", Uuid::new_v4()), None).await?;
        // rule matching is on the exact name; create a plain "DNI" alias row
        let dni_named = document_type::create(&db, "DNI", None).await;
        let doc_type = match dni_named { Ok(d) => d, Err(_) => dni.clone() };

        let mut short = base_input(format!("dni_{}@example.com", Uuid::new_v4()));
        short.document_type_id = Some(doc_type.id);
        short.document_number = Some("1234567".into());
        if doc_type.name == "DNI" {
            assert!(matches!(create(&db, short).await, Err(ServiceError::FieldValidation { ref field, .. }) if field == "document_number"));

            let mut ok = base_input(format!("dni_ok_{}@example.com", Uuid::new_v4()));
            ok.document_type_id = Some(doc_type.id);
            ok.document_number = Some("12345678".into());
            let created = create(&db, ok).await?;
            employee::Entity::delete_by_id(created.id).exec(&db).await?;
        }

        document_type::Entity::delete_by_id(dni.id).exec(&db).await?;
        if doc_type.id != dni.id {
            document_type::Entity::delete_by_id(doc_type.id).exec(&db).await?;
        }
        geo.cleanup(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn photo_set_replaces_prior_file() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(_) => return Ok(()),
        };
        let store = PhotoStore::new(std::env::temp_dir().join(format!("emp-photos-{}", Uuid::new_v4())));

        let created = create(&db, base_input(format!("photo_{}@example.com", Uuid::new_v4()))).await?;

        let with_photo = set_photo(&db, &store, created.id, "image/png", b"first").await?;
        let first_rel = with_photo.photo.clone().unwrap();
        assert!(store.exists(&first_rel));

        // re-upload under a different content type removes the old file
        let replaced = set_photo(&db, &store, created.id, "image/jpeg", b"second").await?;
        let second_rel = replaced.photo.clone().unwrap();
        assert!(store.exists(&second_rel));
        assert!(!store.exists(&first_rel));

        // oversize and bad content types are rejected before storage
        let big = vec![0u8; photo::MAX_PHOTO_BYTES + 1];
        assert!(set_photo(&db, &store, created.id, "image/png", &big).await.is_err());
        assert!(set_photo(&db, &store, created.id, "text/plain", b"x").await.is_err());

        let cleared = clear_photo(&db, &store, created.id).await?;
        assert!(cleared.photo.is_none());
        assert!(!store.exists(&second_rel));

        employee::Entity::delete_by_id(created.id).exec(&db).await?;
        Ok(())
    }
}
