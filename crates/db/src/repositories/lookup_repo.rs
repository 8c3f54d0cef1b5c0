//! Repository for the read-only lookup tables.

use assetman_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::lookup::{AssetStatus, AssetType, Location, Lookups, OrgUnit};

/// Provides read operations for asset types, statuses, org units and locations.
pub struct LookupRepo;

impl LookupRepo {
    /// List all asset types ordered by name.
    pub async fn list_types<'e, E: PgExecutor<'e>>(
        executor: E,
    ) -> Result<Vec<AssetType>, sqlx::Error> {
        sqlx::query_as::<_, AssetType>(
            "SELECT type_id, name, category FROM asset_types ORDER BY name",
        )
        .fetch_all(executor)
        .await
    }

    /// List all asset statuses ordered by name.
    pub async fn list_statuses<'e, E: PgExecutor<'e>>(
        executor: E,
    ) -> Result<Vec<AssetStatus>, sqlx::Error> {
        sqlx::query_as::<_, AssetStatus>(
            "SELECT status_id, name, is_active FROM asset_status ORDER BY name",
        )
        .fetch_all(executor)
        .await
    }

    /// List all org units ordered by name.
    pub async fn list_org_units<'e, E: PgExecutor<'e>>(
        executor: E,
    ) -> Result<Vec<OrgUnit>, sqlx::Error> {
        sqlx::query_as::<_, OrgUnit>(
            "SELECT org_unit_id, name, parent_org_unit_id FROM org_units ORDER BY name, org_unit_id",
        )
        .fetch_all(executor)
        .await
    }

    /// List all locations ordered by name.
    pub async fn list_locations<'e, E: PgExecutor<'e>>(
        executor: E,
    ) -> Result<Vec<Location>, sqlx::Error> {
        sqlx::query_as::<_, Location>(
            "SELECT location_id, name, address, room, rack, rack_unit \
             FROM locations ORDER BY name, location_id",
        )
        .fetch_all(executor)
        .await
    }

    /// Find a status by its ID.
    pub async fn find_status_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<AssetStatus>, sqlx::Error> {
        sqlx::query_as::<_, AssetStatus>(
            "SELECT status_id, name, is_active FROM asset_status WHERE status_id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Load all four lookup lists.
    pub async fn all(pool: &PgPool) -> Result<Lookups, sqlx::Error> {
        Ok(Lookups {
            types: Self::list_types(pool).await?,
            statuses: Self::list_statuses(pool).await?,
            org_units: Self::list_org_units(pool).await?,
            locations: Self::list_locations(pool).await?,
        })
    }
}
