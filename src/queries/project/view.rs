//! Project reads

use crate::queries::positive;
use crate::storage::database::SqlStatement;
use tracing::debug;

/// Columns of a project row. Single-column children are aggregated to JSON arrays.
const PROJECT_COLUMNS: &str = "p.id, p.pt_id AS project_type, p.name, p.objectives, p.caveats, \
     p.comments, p.location_description, p.start_date::text AS start_date, \
     p.end_date::text AS end_date, p.coordinator_first_name, p.coordinator_last_name, \
     p.coordinator_email_address, p.coordinator_agency_name, p.coordinator_public, \
     public.ST_AsGeoJSON(p.geography)::json AS geometry, \
     p.publish_timestamp::text AS publish_timestamp, p.revision_count, \
     (SELECT json_agg(pa.a_id) FROM project_activity pa WHERE pa.p_id = p.id) AS project_activities, \
     (SELECT json_agg(pci.cci_id) FROM project_climate_initiative pci WHERE pci.p_id = p.id) AS climate_change_initiatives, \
     (SELECT json_agg(pr.name) FROM project_region pr WHERE pr.p_id = p.id) AS regions, \
     (SELECT json_agg(fs.name) FROM focal_species fs WHERE fs.p_id = p.id) AS focal_species, \
     (SELECT json_agg(anc.name) FROM ancillary_species anc WHERE anc.p_id = p.id) AS ancillary_species, \
     (SELECT json_agg(pfn.fn_id) FROM project_first_nation pfn WHERE pfn.p_id = p.id) AS indigenous_partnerships, \
     (SELECT json_agg(sp.name) FROM stakeholder_partnership sp WHERE sp.p_id = p.id) AS stakeholder_partnerships";

pub fn get_project(project_id: i64) -> Option<SqlStatement> {
    debug!(project_id, "get_project");

    Some(SqlStatement::with_values(
        format!("SELECT {PROJECT_COLUMNS} FROM project p WHERE p.id = $1"),
        vec![positive(project_id)?.into()],
    ))
}

pub fn get_project_permits(project_id: i64) -> Option<SqlStatement> {
    debug!(project_id, "get_project_permits");

    Some(SqlStatement::with_values(
        "SELECT number, type FROM permit WHERE p_id = $1 ORDER BY id",
        vec![positive(project_id)?.into()],
    ))
}

pub fn get_project_iucn(project_id: i64) -> Option<SqlStatement> {
    debug!(project_id, "get_project_iucn");

    Some(SqlStatement::with_values(
        "SELECT ic1.id AS classification, ic2.id AS sub_classification1, \
           ic3.id AS sub_classification2 \
         FROM project_iucn_action_classification piac \
         LEFT JOIN iucn_conservation_action_level_3_subclassification ic3 ON piac.iucn3_id = ic3.id \
         LEFT JOIN iucn_conservation_action_level_2_subclassification ic2 ON ic3.iucn2_id = ic2.id \
         LEFT JOIN iucn_conservation_action_level_1_classification ic1 ON ic2.iucn1_id = ic1.id \
         WHERE piac.p_id = $1 \
         ORDER BY ic1.id, ic2.id, ic3.id",
        vec![positive(project_id)?.into()],
    ))
}

pub fn get_project_funding(project_id: i64) -> Option<SqlStatement> {
    debug!(project_id, "get_project_funding");

    Some(SqlStatement::with_values(
        "SELECT pfs.id, pfs.iac_id AS investment_action_category, \
           iac.name AS investment_action_category_name, fs.name AS agency_name, \
           pfs.funding_source_project_id AS agency_project_id, \
           pfs.funding_amount::float8 AS funding_amount, \
           pfs.funding_start_date::text AS start_date, pfs.funding_end_date::text AS end_date \
         FROM project_funding_source pfs \
         LEFT JOIN investment_action_category iac ON pfs.iac_id = iac.id \
         LEFT JOIN funding_source fs ON iac.fs_id = fs.id \
         WHERE pfs.p_id = $1 \
         ORDER BY pfs.funding_start_date",
        vec![positive(project_id)?.into()],
    ))
}

/// Projects list. `None` for `system_user_id` lists every project.
pub fn get_project_list(system_user_id: Option<i64>) -> Option<SqlStatement> {
    debug!(?system_user_id, "get_project_list");

    let mut statement = SqlStatement::new(
        "SELECT p.id, p.name, p.start_date::text AS start_date, p.end_date::text AS end_date, \
           p.coordinator_agency_name AS coordinator_agency, pt.name AS project_type, \
           p.publish_timestamp::text AS publish_timestamp, \
           (SELECT json_agg(pr.name) FROM project_region pr WHERE pr.p_id = p.id) AS regions \
         FROM project p \
         LEFT JOIN project_type pt ON p.pt_id = pt.id",
    );

    if let Some(system_user_id) = system_user_id {
        statement
            .push(" WHERE p.id IN (SELECT pp.p_id FROM project_participation pp WHERE pp.su_id = ")
            .push_bind(positive(system_user_id)?)
            .push(")");
    }

    statement.push(" ORDER BY p.id DESC");

    Some(statement)
}
