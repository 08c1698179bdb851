//! System users and their project participation

use super::execute;
use crate::auth::ProjectRoleLookup;
use crate::models::user::{ProjectUser, SystemUser, UserProject};
use crate::queries::user as queries;
use crate::storage::database::DbConnection;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Active system user for a token's user identifier
pub async fn get_system_user(
    connection: &mut dyn DbConnection,
    user_identifier: &str,
) -> Result<Option<SystemUser>> {
    let response = execute(
        connection,
        queries::get_user_by_identifier(user_identifier),
        "get system user",
    )
    .await?;
    response.first_as()
}

pub async fn get_project_user(
    connection: &mut dyn DbConnection,
    project_id: i64,
    system_user_id: i64,
) -> Result<Option<ProjectUser>> {
    let response = execute(
        connection,
        queries::get_project_participation(project_id, system_user_id),
        "get project participation",
    )
    .await?;
    response.first_as()
}

pub async fn get_user_projects(
    connection: &mut dyn DbConnection,
    system_user_id: i64,
) -> Result<Vec<UserProject>> {
    let response = execute(
        connection,
        queries::get_user_projects(system_user_id),
        "get user projects",
    )
    .await?;
    response.rows_as()
}

/// Resolves project roles on the request's own connection
pub struct ConnectionRoleLookup<'a> {
    connection: &'a mut dyn DbConnection,
}

impl<'a> ConnectionRoleLookup<'a> {
    pub fn new(connection: &'a mut dyn DbConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ProjectRoleLookup for ConnectionRoleLookup<'_> {
    async fn project_user(
        &mut self,
        project_id: i64,
        system_user_id: i64,
    ) -> Result<Option<ProjectUser>> {
        get_project_user(&mut *self.connection, project_id, system_user_id).await
    }
}
