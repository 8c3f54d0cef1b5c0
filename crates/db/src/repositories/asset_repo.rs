//! Repository for the `assets` table and the asset listing projection.

use assetman_core::listing::{escape_like, AssetListQuery, SortKey};
use assetman_core::types::DbId;
use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::models::asset::{Asset, AssetDetail, AssetListItem, AssetPatch, CreateAsset};
use crate::models::lookup::AssetStatus;

/// Column list for `assets` queries.
const COLUMNS: &str = "\
    asset_id, asset_tag, type_id, status_id, \
    manufacturer, model, serial_number, description, \
    purchase_date, purchase_price, currency, warranty_end, \
    owner_org_unit_id, notes, created_at, updated_at";

/// Same as [`COLUMNS`], qualified with the `a` alias for joined queries.
const PREFIXED_COLUMNS: &str = "\
    a.asset_id, a.asset_tag, a.type_id, a.status_id, \
    a.manufacturer, a.model, a.serial_number, a.description, \
    a.purchase_date, a.purchase_price, a.currency, a.warranty_end, \
    a.owner_org_unit_id, a.notes, a.created_at, a.updated_at";

/// Listing projection: one row per asset, joined with at most one open
/// assignment through the lateral subquery `aa`.
const LIST_SELECT: &str = "\
    SELECT \
        a.asset_id, a.asset_tag, \
        atype.name AS type, ast.name AS status, \
        a.manufacturer, a.model, a.serial_number, a.description, \
        a.owner_org_unit_id, ou.name AS owner_org_unit, a.updated_at, \
        (aa.assignment_id IS NOT NULL) AS assigned, \
        aa.assignment_id, aa.assigned_from, aa.assigned_to, \
        aa.person_id, per.display_name AS person, per.email AS person_email, \
        aa.location_id, loc.name AS location, loc.room AS location_room, \
        loc.rack AS location_rack, loc.rack_unit AS location_rack_unit \
    FROM assets a \
    JOIN asset_types atype ON atype.type_id = a.type_id \
    JOIN asset_status ast ON ast.status_id = a.status_id \
    LEFT JOIN org_units ou ON ou.org_unit_id = a.owner_org_unit_id \
    LEFT JOIN LATERAL ( \
        SELECT x.assignment_id, x.assigned_from, x.assigned_to, x.person_id, x.location_id \
        FROM asset_assignments x \
        WHERE x.asset_id = a.asset_id AND x.assigned_to IS NULL \
        ORDER BY x.assigned_from DESC, x.assignment_id DESC \
        LIMIT 1 \
    ) aa ON TRUE \
    LEFT JOIN people per ON per.person_id = aa.person_id \
    LEFT JOIN locations loc ON loc.location_id = aa.location_id \
    WHERE TRUE";

/// Column behind each whitelisted sort key.
fn sort_column(key: SortKey) -> &'static str {
    match key {
        SortKey::AssetTag => "a.asset_tag",
        SortKey::Status => "ast.name",
        SortKey::Type => "atype.name",
        SortKey::Owner => "ou.name",
        SortKey::Location => "loc.name",
        SortKey::Updated => "a.updated_at",
    }
}

/// Provides CRUD operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert a new asset with the caller-chosen initial status.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateAsset,
    ) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (\
                asset_tag, type_id, status_id, manufacturer, model, serial_number, \
                description, purchase_date, purchase_price, currency, warranty_end, \
                owner_org_unit_id, notes\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.asset_tag)
            .bind(input.type_id)
            .bind(input.status_id)
            .bind(input.manufacturer.as_deref())
            .bind(input.model.as_deref())
            .bind(input.serial_number.as_deref())
            .bind(input.description.as_deref())
            .bind(input.purchase_date)
            .bind(input.purchase_price)
            .bind(input.currency.as_deref())
            .bind(input.warranty_end)
            .bind(input.owner_org_unit_id)
            .bind(input.notes.as_deref())
            .fetch_one(executor)
            .await
    }

    /// Find an asset with its type, status and owner names resolved.
    pub async fn find_detail<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<AssetDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS}, \
                atype.name AS type, ast.name AS status, ou.name AS owner_org_unit \
             FROM assets a \
             JOIN asset_types atype ON atype.type_id = a.type_id \
             JOIN asset_status ast ON ast.status_id = a.status_id \
             LEFT JOIN org_units ou ON ou.org_unit_id = a.owner_org_unit_id \
             WHERE a.asset_id = $1"
        );
        sqlx::query_as::<_, AssetDetail>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Read the current status of an asset and lock the asset row until the
    /// surrounding transaction ends.
    ///
    /// Concurrent status changes or assignment creates for the same asset
    /// queue behind the lock instead of validating against a stale status.
    pub async fn lock_current_status<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<AssetStatus>, sqlx::Error> {
        sqlx::query_as::<_, AssetStatus>(
            "SELECT s.status_id, s.name, s.is_active \
             FROM assets a \
             JOIN asset_status s ON s.status_id = a.status_id \
             WHERE a.asset_id = $1 \
             FOR UPDATE OF a",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Apply a partial update. Only populated fields are written, through a
    /// fixed whitelist of columns. Returns `None` if the asset does not exist.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        patch: &AssetPatch,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE assets SET ");
        let mut set = qb.separated(", ");

        if let Some(v) = patch.asset_tag.as_deref() {
            set.push("asset_tag = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.type_id {
            set.push("type_id = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.status_id {
            set.push("status_id = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.manufacturer.as_deref() {
            set.push("manufacturer = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.model.as_deref() {
            set.push("model = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.serial_number.as_deref() {
            set.push("serial_number = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.description.as_deref() {
            set.push("description = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.purchase_date {
            set.push("purchase_date = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.purchase_price {
            set.push("purchase_price = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.currency.as_deref() {
            set.push("currency = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.warranty_end {
            set.push("warranty_end = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.owner_org_unit_id {
            set.push("owner_org_unit_id = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.notes.as_deref() {
            set.push("notes = ").push_bind_unseparated(v);
        }

        // An empty patch still touches the row so the caller gets it back.
        set.push("updated_at = NOW()");

        qb.push(" WHERE asset_id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(COLUMNS);

        qb.build_query_as::<Asset>().fetch_optional(executor).await
    }

    /// Hard-delete an asset; its assignments go with it. Returns true if a
    /// row was deleted.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE asset_id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether an asset exists.
    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM assets WHERE asset_id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// List assets matching `query`, sorted by its whitelisted key with asset
    /// tag ascending as the tie-break.
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        query: &AssetListQuery,
    ) -> Result<Vec<AssetListItem>, sqlx::Error> {
        let filter = &query.filter;
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(LIST_SELECT);

        if let Some(search) = filter.search.as_deref() {
            let pattern = format!("%{}%", escape_like(search));
            qb.push(" AND (a.asset_tag ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR a.serial_number ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR a.model ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR a.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if !filter.statuses.is_empty() {
            qb.push(" AND ast.name = ANY(")
                .push_bind(filter.statuses.clone())
                .push(")");
        }
        if !filter.types.is_empty() {
            qb.push(" AND atype.name = ANY(")
                .push_bind(filter.types.clone())
                .push(")");
        }
        if let Some(owner) = filter.owner_org_unit_id {
            qb.push(" AND a.owner_org_unit_id = ").push_bind(owner);
        }
        match filter.assigned {
            Some(true) => {
                qb.push(" AND aa.assignment_id IS NOT NULL");
            }
            Some(false) => {
                qb.push(" AND aa.assignment_id IS NULL");
            }
            None => {}
        }

        qb.push(" ORDER BY ")
            .push(sort_column(query.sort.key))
            .push(" ")
            .push(query.sort.direction.as_sql())
            .push(" NULLS LAST, a.asset_tag ASC");

        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }
        if query.offset > 0 {
            qb.push(" OFFSET ").push_bind(query.offset);
        }

        qb.build_query_as::<AssetListItem>()
            .fetch_all(executor)
            .await
    }
}
