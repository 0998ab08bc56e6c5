//! Repository for the `project_members` pivot table.

use std::collections::HashMap;

use sqlx::PgPool;
use pulse_core::board::MemberRef;
use pulse_core::roles::ROLE_OWNER;
use pulse_core::types::DbId;

use crate::models::project_member::{
    ProjectMember, ProjectMemberDetail, RosterEntry, RosterRemoval,
};

const COLUMNS: &str = "id, project_id, member_id, role, created_at, updated_at";

/// Manages which members belong to which project, and in what role.
pub struct ProjectMemberRepo;

impl ProjectMemberRepo {
    /// Attach a member to a project with the given role.
    ///
    /// Fails with a `uq_project_members` violation if already attached.
    pub async fn add(
        pool: &PgPool,
        project_id: DbId,
        member_id: DbId,
        role: &str,
    ) -> Result<ProjectMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_members (project_id, member_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .bind(member_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Take a member off a project's roster.
    ///
    /// The project's owner rows are locked first, so concurrent removals
    /// cannot leave a project without an owner. Tasks of the project that
    /// were assigned to the member are unassigned in the same transaction.
    pub async fn remove_from_project(
        pool: &PgPool,
        project_id: DbId,
        member_id: DbId,
    ) -> Result<RosterRemoval, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owners: Vec<DbId> = sqlx::query_scalar(
            "SELECT member_id FROM project_members
             WHERE project_id = $1 AND role = $2
             FOR UPDATE",
        )
        .bind(project_id)
        .bind(ROLE_OWNER)
        .fetch_all(&mut *tx)
        .await?;

        let on_roster: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM project_members WHERE project_id = $1 AND member_id = $2 FOR UPDATE",
        )
        .bind(project_id)
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?;
        if on_roster.is_none() {
            return Ok(RosterRemoval::NotOnProject);
        }
        if owners.contains(&member_id) && owners.len() <= 1 {
            return Ok(RosterRemoval::LastOwner);
        }

        let unassigned = sqlx::query(
            "UPDATE tasks SET assignee_id = NULL, updated_at = NOW()
             WHERE project_id = $1 AND assignee_id = $2",
        )
        .bind(project_id)
        .bind(member_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND member_id = $2")
            .bind(project_id)
            .bind(member_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(RosterRemoval::Removed { unassigned })
    }

    /// The member's role in the project, or `None` if not a member.
    pub async fn find_role(
        pool: &PgPool,
        project_id: DbId,
        member_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT role FROM project_members WHERE project_id = $1 AND member_id = $2",
        )
        .bind(project_id)
        .bind(member_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(role,)| role))
    }

    /// The roster of a project, joined with member details, in join order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMemberDetail>, sqlx::Error> {
        sqlx::query_as::<_, ProjectMemberDetail>(
            "SELECT m.id AS member_id, m.name, m.email, pm.role, pm.created_at AS joined_at
             FROM project_members pm
             JOIN members m ON m.id = pm.member_id
             WHERE pm.project_id = $1
             ORDER BY pm.created_at, pm.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Rosters of several projects in one query, keyed by project id.
    ///
    /// Projects without members are absent from the map.
    pub async fn rosters_for_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<ProjectMemberDetail>>, sqlx::Error> {
        let entries = sqlx::query_as::<_, RosterEntry>(
            "SELECT pm.project_id, m.id AS member_id, m.name, m.email, pm.role,
                    pm.created_at AS joined_at
             FROM project_members pm
             JOIN members m ON m.id = pm.member_id
             WHERE pm.project_id = ANY($1)
             ORDER BY pm.created_at, pm.id",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await?;

        let mut rosters: HashMap<DbId, Vec<ProjectMemberDetail>> = HashMap::new();
        for entry in entries {
            rosters.entry(entry.project_id).or_default().push(entry.member);
        }
        Ok(rosters)
    }

    /// Member lookup table for board filtering and assignment.
    pub async fn list_member_refs(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MemberRef>, sqlx::Error> {
        let rows: Vec<(DbId, String)> = sqlx::query_as(
            "SELECT m.id, m.name
             FROM project_members pm
             JOIN members m ON m.id = pm.member_id
             WHERE pm.project_id = $1
             ORDER BY m.name, m.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| MemberRef { id, name })
            .collect())
    }
}
