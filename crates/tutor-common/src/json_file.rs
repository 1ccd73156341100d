use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::CommonError;

/// Read and decode a JSON document from disk.
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T, CommonError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CommonError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CommonError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = read::<Vec<String>>(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CommonError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn decodes_json_document() {
        let path = std::env::temp_dir().join(format!("tutor-common-{}.json", std::process::id()));
        std::fs::write(&path, r#"["a", "b"]"#).expect("write temp file");
        let values: Vec<String> = read(&path).expect("decode");
        std::fs::remove_file(&path).ok();
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let path =
            std::env::temp_dir().join(format!("tutor-common-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{not json").expect("write temp file");
        let err = read::<Vec<String>>(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, CommonError::Json { .. }));
    }
}
