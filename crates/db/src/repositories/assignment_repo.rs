//! Repository for the `asset_assignments` table.

use assetman_core::types::DbId;
use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::models::assignment::{
    Assignment, AssignmentPatch, AssignmentWithNames, CreateAssignment,
};

/// Column list for `asset_assignments` queries.
const COLUMNS: &str = "\
    assignment_id, asset_id, person_id, location_id, \
    assigned_from, assigned_to, purpose, notes, created_at, updated_at";

/// Assignment columns plus resolved person/location names.
const WITH_NAMES_SELECT: &str = "\
    SELECT aa.assignment_id, aa.asset_id, aa.person_id, aa.location_id, \
        aa.assigned_from, aa.assigned_to, aa.purpose, aa.notes, \
        aa.created_at, aa.updated_at, \
        per.display_name AS person, per.email AS person_email, \
        loc.name AS location \
    FROM asset_assignments aa \
    LEFT JOIN people per ON per.person_id = aa.person_id \
    LEFT JOIN locations loc ON loc.location_id = aa.location_id";

/// Provides CRUD operations for assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert an assignment. A missing `assigned_from` becomes `NOW()` at
    /// insert time.
    ///
    /// Prior open assignments for the asset are not closed here; a second open
    /// row fails on `uq_asset_assignments_open`.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateAssignment,
    ) -> Result<Assignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO asset_assignments \
                (asset_id, person_id, location_id, assigned_from, assigned_to, purpose, notes) \
             VALUES ($1, $2, $3, COALESCE($4, NOW()), $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(input.asset_id)
            .bind(input.person_id)
            .bind(input.location_id)
            .bind(input.assigned_from)
            .bind(input.assigned_to)
            .bind(input.purpose.as_deref())
            .bind(input.notes.as_deref())
            .fetch_one(executor)
            .await
    }

    /// Find an assignment by ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM asset_assignments WHERE assignment_id = $1");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Apply a partial update. Returns `None` if the assignment does not exist.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        patch: &AssignmentPatch,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("UPDATE asset_assignments SET ");
        let mut set = qb.separated(", ");

        if let Some(v) = patch.assigned_to {
            set.push("assigned_to = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.purpose.as_deref() {
            set.push("purpose = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.notes.as_deref() {
            set.push("notes = ").push_bind_unseparated(v);
        }
        set.push("updated_at = NOW()");

        qb.push(" WHERE assignment_id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(COLUMNS);

        qb.build_query_as::<Assignment>()
            .fetch_optional(executor)
            .await
    }

    /// Hard-delete an assignment. Returns true if a row was deleted.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM asset_assignments WHERE assignment_id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assignment history for an asset, newest `assigned_from` first.
    pub async fn list_for_asset<'e, E: PgExecutor<'e>>(
        executor: E,
        asset_id: DbId,
    ) -> Result<Vec<AssignmentWithNames>, sqlx::Error> {
        let query = format!(
            "{WITH_NAMES_SELECT} \
             WHERE aa.asset_id = $1 \
             ORDER BY aa.assigned_from DESC, aa.assignment_id DESC"
        );
        sqlx::query_as::<_, AssignmentWithNames>(&query)
            .bind(asset_id)
            .fetch_all(executor)
            .await
    }

    /// The open assignment for an asset, if any.
    pub async fn find_open_for_asset<'e, E: PgExecutor<'e>>(
        executor: E,
        asset_id: DbId,
    ) -> Result<Option<AssignmentWithNames>, sqlx::Error> {
        let query = format!(
            "{WITH_NAMES_SELECT} \
             WHERE aa.asset_id = $1 AND aa.assigned_to IS NULL \
             ORDER BY aa.assigned_from DESC, aa.assignment_id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, AssignmentWithNames>(&query)
            .bind(asset_id)
            .fetch_optional(executor)
            .await
    }
}
