use std::collections::BTreeMap;

use snafu::prelude::*;

use crate::dashboard::{io_common::has_extension, *};

/// The source files of one school, grouped by program.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SchoolSources {
    pub name: String,
    /// Only programs with at least one file are present.
    pub programs: BTreeMap<String, Vec<PathBuf>>,
}

fn list_dir(path: &Path) -> DashboardResult<Vec<PathBuf>> {
    let mut res: Vec<PathBuf> = Vec::new();
    let entries = fs::read_dir(path).context(ReadingDirectorySnafu {
        path: path.display().to_string(),
    })?;
    for entry_r in entries {
        let entry = entry_r.context(ReadingDirectorySnafu {
            path: path.display().to_string(),
        })?;
        res.push(entry.path());
    }
    res.sort();
    Ok(res)
}

fn sub_dirs(path: &Path) -> DashboardResult<Vec<PathBuf>> {
    Ok(list_dir(path)?.into_iter().filter(|p| p.is_dir()).collect())
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn source_files(dir: &Path, config: &DashboardConfig) -> DashboardResult<Vec<PathBuf>> {
    let extensions = config.file_extensions();
    Ok(list_dir(dir)?
        .into_iter()
        .filter(|p| p.is_file() && has_extension(p, &extensions))
        .collect())
}

/// Picks the program of a file from the teacher named in its metadata.
///
/// Buckets are tried in order. A teacher match always wins over the folder the
/// file was found in, which is only the fallback.
pub fn assign_program(teacher_name: &str, folder_program: &str, buckets: &[TeacherBucket]) -> String {
    for bucket in buckets.iter() {
        if bucket
            .teachers
            .iter()
            .any(|t| !t.is_empty() && teacher_name.contains(t.as_str()))
        {
            return bucket.program.clone();
        }
    }
    folder_program.to_string()
}

fn collect_by_teacher(
    program_dirs: &[(String, PathBuf)],
    buckets: &[TeacherBucket],
    config: &DashboardConfig,
) -> DashboardResult<BTreeMap<String, Vec<PathBuf>>> {
    let mut res: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for (folder_program, dir) in program_dirs.iter() {
        for path in source_files(dir, config)? {
            let layout = locate_file(&path, config);
            let program = assign_program(&layout.metadata.teacher_name, folder_program, buckets);
            debug!(
                "collect_by_teacher: {}: teacher {:?} -> {}",
                path.display(),
                layout.metadata.teacher_name,
                program
            );
            res.entry(program).or_default().push(path);
        }
    }
    Ok(res)
}

fn collect_by_folder(
    program_dirs: &[(String, PathBuf)],
    config: &DashboardConfig,
) -> DashboardResult<BTreeMap<String, Vec<PathBuf>>> {
    let mut res: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for (program, dir) in program_dirs.iter() {
        let files = source_files(dir, config)?;
        if files.is_empty() {
            continue;
        }
        res.insert(program.clone(), files);
    }
    Ok(res)
}

/// Walks the root directory: one folder per school, one sub-folder per program.
pub fn discover_schools(config: &DashboardConfig) -> DashboardResult<Vec<SchoolSources>> {
    let root = config.root();
    let excluded = config.excluded_directories();
    let programs = config.programs();
    info!("Looking for schools in {}", root.display());

    let mut res: Vec<SchoolSources> = Vec::new();
    for school_dir in sub_dirs(&root)? {
        let name = dir_name(&school_dir);
        if excluded.contains(&name) {
            continue;
        }
        let children = sub_dirs(&school_dir)?;
        if children.is_empty() {
            debug!("discover_schools: skipping {:?}, no sub-directory", name);
            continue;
        }
        let program_dirs: Vec<(String, PathBuf)> = children
            .into_iter()
            .map(|d| (dir_name(&d), d))
            .filter(|(p, _)| programs.contains(p))
            .collect();

        let school_programs = match config.buckets_for(&name) {
            Some(buckets) => {
                info!("  Using teacher-based bucketing for {}", name);
                collect_by_teacher(&program_dirs, buckets, config)?
            }
            None => collect_by_folder(&program_dirs, config)?,
        };
        res.push(SchoolSources {
            name,
            programs: school_programs,
        });
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(program: &str, teachers: &[&str]) -> TeacherBucket {
        TeacherBucket {
            program: program.to_string(),
            teachers: teachers.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn write_year(dir: &Path, name: &str, teacher: &str) {
        fs::create_dir_all(dir).unwrap();
        let contents = format!(
            "Teacher\n{}\nStudent ID,Student Name,GR\n4021056,\"Doe, Jane\",7\n",
            teacher
        );
        fs::write(dir.join(name), contents).unwrap();
    }

    fn csv_config(root: &Path) -> DashboardConfig {
        DashboardConfig {
            root_directory: Some(root.display().to_string()),
            file_extensions: Some(vec!["csv".to_string()]),
            ..DashboardConfig::default()
        }
    }

    #[test]
    fn teacher_match_wins_over_folder() {
        let buckets = vec![
            bucket("Band", &["Gray"]),
            bucket("Dance", &["Delgado", "Pelagio"]),
        ];
        assert_eq!(assign_program("Mr. Gray", "Choir", &buckets), "Band");
        assert_eq!(assign_program("Ms. Pelagio", "Band", &buckets), "Dance");
        assert_eq!(assign_program("Unknown", "Theatre", &buckets), "Theatre");
        assert_eq!(assign_program("Mr. Grayson", "Choir", &buckets), "Band");
    }

    #[test]
    fn schools_and_programs_by_folder() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_year(&root.join("Lincoln").join("Band"), "2022-2023.csv", "Gray");
        write_year(&root.join("Lincoln").join("Band"), "2021-2022.csv", "Gray");
        write_year(&root.join("Lincoln").join("Robotics"), "2021-2022.csv", "X");
        fs::write(root.join("Lincoln").join("Band").join("notes.txt"), "x").unwrap();
        fs::create_dir_all(root.join("Lincoln").join("Choir")).unwrap();
        write_year(&root.join(".git").join("Band"), "2021-2022.csv", "Gray");
        fs::create_dir_all(root.join("Empty School")).unwrap();

        let schools = discover_schools(&csv_config(root)).unwrap();
        assert_eq!(schools.len(), 1);
        assert_eq!(schools[0].name, "Lincoln");
        let programs: Vec<&String> = schools[0].programs.keys().collect();
        assert_eq!(programs, vec!["Band"]);
        let band = &schools[0].programs["Band"];
        assert_eq!(band.len(), 2);
        assert!(band[0].ends_with("2021-2022.csv"));
    }

    #[test]
    fn schools_bucketed_by_teacher() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let march = root.join("March Middle School");
        write_year(&march.join("Band"), "2021-2022.csv", "Mr. Gray");
        // Filed in the wrong folder, the teacher tells where it belongs.
        write_year(&march.join("Band"), "2022-2023.csv", "Ms. Mosley");
        write_year(&march.join("Theatre"), "2022-2023.csv", "Someone Else");

        let mut config = csv_config(root);
        config.teacher_buckets = Some(vec![SchoolBuckets {
            school: "March Middle School".to_string(),
            buckets: vec![bucket("Band", &["Gray"]), bucket("Choir", &["Mosley"])],
        }]);
        let schools = discover_schools(&config).unwrap();
        let programs = &schools[0].programs;
        assert_eq!(programs["Band"].len(), 1);
        assert_eq!(programs["Choir"].len(), 1);
        assert!(programs["Choir"][0].starts_with(march.join("Band")));
        assert_eq!(programs["Theatre"].len(), 1);
    }
}
