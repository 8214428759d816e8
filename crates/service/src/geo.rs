//! Hierarchical consistency checks for the Region -> Province -> District
//! reference chain. Validation happens at request time; the database only
//! enforces that each FK points at an existing row.

use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use models::{district, province, region};

use crate::errors::ServiceError;

/// Reject attribute combinations that cross hierarchy boundaries.
/// Each level is optional; a level is only checked against its parent
/// when both are present.
pub async fn validate_hierarchy(
    db: &DatabaseConnection,
    region_id: Option<Uuid>,
    province_id: Option<Uuid>,
    district_id: Option<Uuid>,
) -> Result<(), ServiceError> {
    if let Some(rid) = region_id {
        region::Entity::find_by_id(rid)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::field("region", "region does not exist"))?;
    }

    let province = match province_id {
        Some(pid) => Some(
            province::Entity::find_by_id(pid)
                .one(db)
                .await
                .map_err(|e| ServiceError::Db(e.to_string()))?
                .ok_or_else(|| ServiceError::field("province", "province does not exist"))?,
        ),
        None => None,
    };

    if let (Some(p), Some(rid)) = (&province, region_id) {
        if p.region_id != rid {
            return Err(ServiceError::field(
                "province",
                "the selected province does not belong to the region",
            ));
        }
    }

    if let Some(did) = district_id {
        let d = district::Entity::find_by_id(did)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::field("district", "district does not exist"))?;
        if let Some(p) = &province {
            if d.province_id != p.id {
                return Err(ServiceError::field(
                    "district",
                    "the selected district does not belong to the province",
                ));
            }
        }
    }

    Ok(())
}
