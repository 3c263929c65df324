/// Title markers Jenkins appends when a job is (or returns to) healthy.
const OK_MARKERS: [&str; 2] = ["(stable)", "(back to normal)"];

/// One record from the build feed, as parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    /// `YYYY-MM-DDTHH:MM:SSZ` as served, or its localized form.
    pub published: String,
    pub link: String,
}

/// Health of a build as far as its title tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Alert,
    Ok,
}

impl FeedEntry {
    pub fn new(
        title: impl Into<String>,
        published: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            published: published.into(),
            link: link.into(),
        }
    }

    pub fn status(&self) -> BuildStatus {
        if OK_MARKERS.iter().any(|m| self.title.contains(m)) {
            BuildStatus::Ok
        } else {
            BuildStatus::Alert
        }
    }
}
