use crate::dashboard::*;
use snafu::prelude::*;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROGRAMS: [&str; 4] = ["Band", "Choir", "Dance", "Theatre"];
pub const DEFAULT_EXCLUDED_DIRECTORIES: [&str; 3] = [".git", ".agent", "recruitment_dashboard"];
pub const DEFAULT_OUTPUT_FILE: &str = "dashboard_data.json";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TeacherBucket {
    pub program: String,
    pub teachers: Vec<String>,
}

/// The programs of a school that are assigned by teacher rather than by folder.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SchoolBuckets {
    pub school: String,
    pub buckets: Vec<TeacherBucket>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(rename = "headerScanRows")]
    pub header_scan_rows: Option<usize>,
    #[serde(rename = "maxRejectedIdentityLength")]
    pub max_rejected_identity_length: Option<usize>,
    #[serde(rename = "shiftProbeMinLength")]
    pub shift_probe_min_length: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "rootDirectory")]
    pub root_directory: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
    pub programs: Option<Vec<String>>,
    #[serde(rename = "excludedDirectories")]
    pub excluded_directories: Option<Vec<String>>,
    #[serde(rename = "fileExtensions")]
    pub file_extensions: Option<Vec<String>>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "teacherBuckets")]
    pub teacher_buckets: Option<Vec<SchoolBuckets>>,
    pub rules: Option<RulesConfig>,
}

impl DashboardConfig {
    pub fn root(&self) -> PathBuf {
        PathBuf::from(self.root_directory.clone().unwrap_or_else(|| ".".to_string()))
    }

    pub fn output_path(&self) -> PathBuf {
        match self.output_file.clone() {
            Some(p) => PathBuf::from(p),
            None => self.root().join(DEFAULT_OUTPUT_FILE),
        }
    }

    pub fn programs(&self) -> Vec<String> {
        self.programs
            .clone()
            .unwrap_or_else(|| DEFAULT_PROGRAMS.iter().map(|s| s.to_string()).collect())
    }

    pub fn excluded_directories(&self) -> Vec<String> {
        self.excluded_directories.clone().unwrap_or_else(|| {
            DEFAULT_EXCLUDED_DIRECTORIES
                .iter()
                .map(|s| s.to_string())
                .collect()
        })
    }

    /// Lowercase, without the leading dot.
    pub fn file_extensions(&self) -> Vec<String> {
        self.file_extensions
            .clone()
            .unwrap_or_else(|| vec!["xlsx".to_string()])
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect()
    }

    pub fn buckets_for(&self, school: &str) -> Option<&[TeacherBucket]> {
        self.teacher_buckets
            .as_ref()?
            .iter()
            .find(|sb| sb.school == school)
            .map(|sb| sb.buckets.as_slice())
    }

    pub fn rules(&self) -> ExtractionRules {
        let d = ExtractionRules::DEFAULT_RULES;
        match &self.rules {
            None => d,
            Some(r) => ExtractionRules {
                header_scan_rows: r.header_scan_rows.unwrap_or(d.header_scan_rows),
                max_rejected_identity_len: r
                    .max_rejected_identity_length
                    .unwrap_or(d.max_rejected_identity_len),
                shift_probe_min_len: r.shift_probe_min_length.unwrap_or(d.shift_probe_min_len),
            },
        }
    }
}

/// Reads the configuration file. Relative directories in the file are relative
/// to the folder of the configuration file.
pub fn read_config(path: &str) -> DashboardResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.to_string(),
    })?;
    let mut config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    let parent = Path::new(path)
        .parent()
        .context(MissingParentDirSnafu {
            path: path.to_string(),
        })?;
    config.root_directory = Some(
        parent
            .join(config.root_directory.clone().unwrap_or_default())
            .display()
            .to_string(),
    );
    if let Some(out) = config.output_file.clone() {
        if out != "stdout" {
            config.output_file = Some(parent.join(out).display().to_string());
        }
    }
    debug!("read_config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let c = DashboardConfig::default();
        assert_eq!(c.programs(), vec!["Band", "Choir", "Dance", "Theatre"]);
        assert_eq!(c.file_extensions(), vec!["xlsx"]);
        assert_eq!(c.rules(), ExtractionRules::DEFAULT_RULES);
        assert_eq!(c.output_path(), PathBuf::from(".").join(DEFAULT_OUTPUT_FILE));
        assert!(c.buckets_for("March Middle School").is_none());
    }

    #[test]
    fn reads_file_relative_to_its_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut f = fs::File::create(&path).unwrap();
        write!(
            f,
            r#"{{
                "rootDirectory": "Recruitment",
                "outputFile": "out.json",
                "fileExtensions": [".XLSX", "csv"],
                "teacherBuckets": [{{"school": "March", "buckets": [{{"program": "Band", "teachers": ["Gray"]}}]}}],
                "rules": {{"maxRejectedIdentityLength": 3}}
            }}"#
        )
        .unwrap();

        let c = read_config(path.to_str().unwrap()).unwrap();
        assert_eq!(c.root(), dir.path().join("Recruitment"));
        assert_eq!(c.output_path(), dir.path().join("out.json"));
        assert_eq!(c.file_extensions(), vec!["xlsx", "csv"]);
        assert_eq!(c.buckets_for("March").unwrap()[0].teachers, vec!["Gray"]);
        let rules = c.rules();
        assert_eq!(rules.max_rejected_identity_len, 3);
        assert_eq!(rules.header_scan_rows, 20);
    }

    #[test]
    fn missing_file_is_an_error() {
        let res = read_config("/does/not/exist/config.json");
        assert!(matches!(res, Err(DashboardError::OpeningJson { .. })));
    }
}
