use std::path::Path;

/// The file name of a path, used to name a resource in messages.
pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Resource ids are compared without surrounding whitespace or leading slash,
/// so that `/resultsPC24.csv` and `resultsPC24.csv` name the same resource.
pub fn normalize_resource_id(resource_id: &str) -> String {
    resource_id.trim().trim_start_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_ids() {
        assert_eq!(normalize_resource_id("/TN2019.csv"), "TN2019.csv");
        assert_eq!(normalize_resource_id(" TN2019.csv "), "TN2019.csv");
        assert_ne!(
            normalize_resource_id("/TN2019.csv"),
            normalize_resource_id("/resultsPC24.csv")
        );
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/data/2024/resultsPC24.csv"), "resultsPC24.csv");
        assert_eq!(simplify_file_name("results.csv"), "results.csv");
    }
}
