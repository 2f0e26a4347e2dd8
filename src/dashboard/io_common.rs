use std::path::Path;

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// The year a file reports on: the file name without its extension, cut at the
/// first space ("2023-2024 (1).xlsx" is "2023-2024").
pub fn year_label(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    stem.split(' ').next().unwrap_or_default().to_string()
}

pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn year_labels() {
        assert_eq!(year_label(Path::new("/a/Band/2023-2024.xlsx")), "2023-2024");
        assert_eq!(year_label(Path::new("2023-2024 (1).xlsx")), "2023-2024");
        assert_eq!(year_label(Path::new("2021-2022 Band.final.xlsx")), "2021-2022");
        assert_eq!(year_label(&PathBuf::from("2020")), "2020");
    }

    #[test]
    fn extensions() {
        let exts = vec!["xlsx".to_string(), "csv".to_string()];
        assert!(has_extension(Path::new("a/2023.XLSX"), &exts));
        assert!(has_extension(Path::new("a/2023.csv"), &exts));
        assert!(!has_extension(Path::new("a/2023.xls"), &exts));
        assert!(!has_extension(Path::new("a/README"), &exts));
        assert_eq!(simplify_file_name(Path::new("a/b/2023.csv")), "2023.csv");
    }
}
