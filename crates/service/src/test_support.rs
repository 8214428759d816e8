#![cfg(test)]
use migration::MigratorTrait;
use models::db::connect;
use models::{district, province, region};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tokio::sync::OnceCell;
use uuid::Uuid;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect().await?;
    MIGRATED
        .get_or_try_init(|| async {
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;
    Ok(db)
}

/// Two regions, a province in each, a district in each province. Lets a
/// test pick levels that agree or deliberately cross parents.
pub struct GeoFixture {
    pub region: region::Model,
    pub other_region: region::Model,
    pub province: province::Model,
    pub other_province: province::Model,
    pub district: district::Model,
    pub other_district: district::Model,
}

impl GeoFixture {
    pub async fn cleanup(&self, db: &DatabaseConnection) -> Result<(), anyhow::Error> {
        district::Entity::delete_by_id(self.district.id).exec(db).await?;
        district::Entity::delete_by_id(self.other_district.id).exec(db).await?;
        province::Entity::delete_by_id(self.province.id).exec(db).await?;
        province::Entity::delete_by_id(self.other_province.id).exec(db).await?;
        region::Entity::delete_by_id(self.region.id).exec(db).await?;
        region::Entity::delete_by_id(self.other_region.id).exec(db).await?;
        Ok(())
    }
}

pub async fn seed_geo(db: &DatabaseConnection) -> Result<GeoFixture, anyhow::Error> {
    let tag = Uuid::new_v4().simple().to_string();

    let region = region::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("region_a_{tag}")),
    }
    .insert(db)
    .await?;
    let other_region = region::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("region_b_{tag}")),
    }
    .insert(db)
    .await?;

    let province = province::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("province_a_{tag}")),
        region_id: Set(region.id),
    }
    .insert(db)
    .await?;
    let other_province = province::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("province_b_{tag}")),
        region_id: Set(other_region.id),
    }
    .insert(db)
    .await?;

    let district = district::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("district_a_{tag}")),
        province_id: Set(province.id),
    }
    .insert(db)
    .await?;
    let other_district = district::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("district_b_{tag}")),
        province_id: Set(other_province.id),
    }
    .insert(db)
    .await?;

    Ok(GeoFixture { region, other_region, province, other_province, district, other_district })
}
