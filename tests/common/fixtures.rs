//! Row and request body fixtures

use serde_json::{Value, json};

pub const USER_ID: i64 = 14;

/// `system_user` row for `jdoe` holding `roles`
pub fn system_user(roles: &[&str]) -> Value {
    json!({
        "id": USER_ID,
        "user_identifier": "jdoe",
        "role_ids": (1..=roles.len() as i64).collect::<Vec<_>>(),
        "role_names": roles,
    })
}

/// Participation row for `jdoe` on `project_id`
pub fn project_user(project_id: i64, roles: &[&str]) -> Value {
    json!({
        "project_id": project_id,
        "system_user_id": USER_ID,
        "project_role_ids": (1..=roles.len() as i64).collect::<Vec<_>>(),
        "project_role_names": roles,
    })
}

pub fn id_row(id: i64) -> Value {
    json!({ "id": id })
}

pub fn survey_body() -> Value {
    json!({
        "survey_name": "Spring count",
        "survey_purpose": "Count caribou",
        "start_date": "2021-04-01",
        "end_date": "2021-05-01",
        "biologist_first_name": "Sam",
        "biologist_last_name": "Lee",
        "survey_area_name": "Tweedsmuir",
        "focal_species": ["Caribou"],
        "ancillary_species": []
    })
}

/// `multipart/form-data` body with one `media` file and optional text fields
pub fn multipart(file_name: &str, content: &str, fields: &[(&str, &str)]) -> (String, String) {
    const BOUNDARY: &str = "biohub-test-boundary";

    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"media\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n{content}\r\n"
    );
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
