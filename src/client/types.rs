use serde::Deserialize;

/// Response of the search API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(rename = "resultsCount", default)]
    pub result_count: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub query: Vec<String>,
}

impl SearchResponse {
    /// True if the service reported no hits
    pub fn is_empty(&self) -> bool {
        self.result_count == "0" || self.results.is_empty()
    }
}

/// A single release found by a search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "release")]
    pub dirname: String,
    /// e.g. `2014-06-16 17:35:26`
    #[serde(default)]
    pub date: String,
    #[serde(rename = "hasNFO", default)]
    pub has_nfo_response: String,
    #[serde(rename = "hasSRS", default)]
    pub has_srs_response: String,
}

impl SearchResult {
    pub fn has_nfo(&self) -> bool {
        self.has_nfo_response == "yes"
    }

    pub fn has_srs(&self) -> bool {
        self.has_srs_response == "yes"
    }
}

/// Response of an SRR upload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}

/// Per file result of an SRR upload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadedFile {
    #[serde(rename = "name")]
    pub dirname: String,
    #[serde(default)]
    pub color: i64,
    #[serde(default)]
    pub message: String,
}

impl UploadedFile {
    /// One line describing the result, always starting with the dirname.
    pub fn summary(&self) -> String {
        if self.message.starts_with(&self.dirname) {
            self.message.clone()
        } else if self.message.starts_with(" - ") {
            format!("{}{}", self.dirname, self.message)
        } else {
            format!("{} - {}", self.dirname, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response() {
        let json = r#"{
            "results": [
                {"release": "Some.Release-GRP", "date": "2014-06-16 17:35:26", "hasNFO": "yes", "hasSRS": "no"}
            ],
            "resultsCount": "1",
            "warnings": [],
            "query": ["some", "release"]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(!response.is_empty());
        assert_eq!(response.results[0].dirname, "Some.Release-GRP");
        assert!(response.results[0].has_nfo());
        assert!(!response.results[0].has_srs());
        assert_eq!(response.query, ["some", "release"]);
    }

    #[test]
    fn test_empty_search_response() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"results": [], "resultsCount": "0"}"#).unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn test_upload_summary() {
        let file = |message: &str| UploadedFile {
            dirname: "Rel-GRP".into(),
            color: 0,
            message: message.into(),
        };
        assert_eq!(file("Rel-GRP was added.").summary(), "Rel-GRP was added.");
        assert_eq!(file(" - already exists").summary(), "Rel-GRP - already exists");
        assert_eq!(file("added").summary(), "Rel-GRP - added");
        assert_eq!(file("").summary(), "Rel-GRP - ");
    }
}
