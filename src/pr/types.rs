use std::fmt;

/// An open pull request as listed from the GitHub API.
/// Not Deserialize — constructed from the raw API record so that a missing
/// diff_url degrades to None instead of failing the whole page.
#[derive(Debug, Clone)]
pub struct PullRequest {
    /// PR number (unique within the project)
    pub number: u64,
    /// PR title
    pub title: String,
    /// Author's GitHub login
    pub author: String,
    /// Location of the raw diff, when the record carried one
    pub diff_url: Option<DiffLocation>,
}

/// URL of a pull request's raw diff, e.g.
/// `https://github.com/org/repo/pull/42.diff`.
///
/// Doubles as the key for re-associating a fetched diff body with its
/// originating pull request: the pull number is parsed back out of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLocation(String);

impl DiffLocation {
    pub fn new(url: impl Into<String>) -> Self {
        DiffLocation(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the pull number embedded in the URL path: the digits between
    /// the last `/pull/` segment and `.diff`. Returns None when the URL does
    /// not follow that shape.
    pub fn pull_id(&self) -> Option<&str> {
        let (_, rest) = self.0.rsplit_once("/pull/")?;
        let (id, _) = rest.split_once(".diff")?;
        if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
            Some(id)
        } else {
            None
        }
    }
}

impl fmt::Display for DiffLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
