//! Parameterized SQL builders
//!
//! Every builder returns `None` when its input cannot produce a valid
//! statement. Callers turn that into a `400` through
//! [`ApiError::statement_build`](crate::ApiError::statement_build).

pub mod attachments;
pub mod occurrence;
pub mod permit;
pub mod project;
pub mod public;
pub mod survey;
pub mod user;

use crate::storage::database::SqlStatement;
use serde_json::Value as JsonValue;

/// Ids generated by the database are always positive
pub(crate) fn positive(id: i64) -> Option<i64> {
    (id > 0).then_some(id)
}

/// Reject blank required text
pub(crate) fn non_blank(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}

/// Append a geography expression for a list of GeoJSON features
///
/// No features binds nothing and appends `null`. Several features are
/// collected into one geometry collection. Coordinates are flattened to 2D
/// in SRID 4326.
pub(crate) fn push_geography(statement: &mut SqlStatement, features: &[JsonValue]) {
    if features.is_empty() {
        statement.push("null");
        return;
    }

    statement.push("public.geography(public.ST_Force2D(public.ST_SetSRID(");

    if let [feature] = features {
        push_geometry(statement, feature);
    } else {
        statement.push("public.ST_Collect(array[");
        for (index, feature) in features.iter().enumerate() {
            if index > 0 {
                statement.push(", ");
            }
            push_geometry(statement, feature);
        }
        statement.push("])");
    }

    statement.push(", 4326)))");
}

fn push_geometry(statement: &mut SqlStatement, feature: &JsonValue) {
    // Bare geometries are accepted as well as features
    let geometry = feature.get("geometry").unwrap_or(feature);
    statement
        .push("public.ST_GeomFromGeoJSON(")
        .push_bind(geometry.to_string())
        .push(")");
}
