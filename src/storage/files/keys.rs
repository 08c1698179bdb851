//! Object key layout
//!
//! Keys are hierarchical: `projects/{projectId}/surveys/{surveyId}/{folder}/{fileName}`.
//! Every segment is optional; absent segments are skipped.

/// Parts of an object key
#[derive(Debug, Clone, Default)]
pub struct ObjectKey<'a> {
    pub project_id: Option<i64>,
    pub survey_id: Option<i64>,
    pub folder: Option<&'a str>,
    pub file_name: Option<&'a str>,
}

impl<'a> ObjectKey<'a> {
    /// Key for a project level attachment
    pub fn project_file(project_id: i64, file_name: &'a str) -> Self {
        Self {
            project_id: Some(project_id),
            file_name: Some(file_name),
            ..Self::default()
        }
    }

    /// Key for a survey level attachment
    pub fn survey_file(project_id: i64, survey_id: i64, file_name: &'a str) -> Self {
        Self {
            project_id: Some(project_id),
            survey_id: Some(survey_id),
            file_name: Some(file_name),
            ..Self::default()
        }
    }

    /// Key for an observation submission file
    pub fn submission_file(
        project_id: i64,
        survey_id: i64,
        folder: &'a str,
        file_name: &'a str,
    ) -> Self {
        Self {
            project_id: Some(project_id),
            survey_id: Some(survey_id),
            folder: Some(folder),
            file_name: Some(file_name),
        }
    }

    pub fn build(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(6);

        if let Some(project_id) = self.project_id {
            parts.push("projects".to_string());
            parts.push(project_id.to_string());
        }
        if let Some(survey_id) = self.survey_id {
            parts.push("surveys".to_string());
            parts.push(survey_id.to_string());
        }
        if let Some(folder) = self.folder.filter(|f| !f.is_empty()) {
            parts.push(folder.to_string());
        }
        if let Some(file_name) = self.file_name.filter(|f| !f.is_empty()) {
            parts.push(file_name.to_string());
        }

        parts.join("/")
    }
}
