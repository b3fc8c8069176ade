//! Post performance and dashboard figures.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Whether a post has been promoted.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PostStatus {
    /// Unpaid distribution only
    #[default]
    Organic,
    /// Currently or previously boosted
    Boosted,
}

/// Performance of one published post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PostPerformance {
    id: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    page_id: String,
    #[serde(default)]
    page_name: String,
    #[serde(default, with = "graph_time")]
    created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    reach: u64,
    #[serde(default)]
    engagement: u64,
    #[serde(default)]
    likes: u64,
    #[serde(default)]
    comments: u64,
    #[serde(default)]
    shares: u64,
    #[serde(default)]
    status: PostStatus,
    #[serde(default)]
    boost_eligible: bool,
}

impl PostPerformance {
    /// Create a post record with zeroed metrics.
    pub fn new(
        id: impl Into<String>,
        page_id: impl Into<String>,
        page_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            page_id: page_id.into(),
            page_name: page_name.into(),
            created_time: None,
            reach: 0,
            engagement: 0,
            likes: 0,
            comments: 0,
            shares: 0,
            status: PostStatus::Organic,
            boost_eligible: true,
        }
    }

    /// Set reach and interaction counts.
    pub fn with_metrics(mut self, reach: u64, likes: u64, comments: u64, shares: u64) -> Self {
        self.reach = reach;
        self.likes = likes;
        self.comments = comments;
        self.shares = shares;
        self.engagement = likes + comments + shares;
        self
    }

    /// Mark the post as boosted (and no longer eligible for another boost).
    pub fn boosted(mut self) -> Self {
        self.status = PostStatus::Boosted;
        self.boost_eligible = false;
        self
    }

    /// Whether the console should offer the boost action for this post.
    pub fn can_boost(&self) -> bool {
        self.boost_eligible && self.status == PostStatus::Organic
    }
}

/// Aggregate figures over a set of posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Sum of post reach
    #[serde(default)]
    pub total_reach: u64,
    /// Sum of post engagement
    #[serde(default)]
    pub total_engagement: u64,
    /// Sum of post shares
    #[serde(default)]
    pub total_shares: u64,
    /// Posts currently boosted
    #[serde(default, alias = "active_boosted_posts")]
    pub boosted_posts_count: u64,
}

impl PerformanceStats {
    /// Compute the figures from a list of posts.
    pub fn from_posts(posts: &[PostPerformance]) -> Self {
        posts.iter().fold(Self::default(), |mut acc, post| {
            acc.total_reach += post.reach;
            acc.total_engagement += post.engagement;
            acc.total_shares += post.shares;
            if post.status == PostStatus::Boosted {
                acc.boosted_posts_count += 1;
            }
            acc
        })
    }
}

/// Post performance listing as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsReport {
    /// Posts, most recent first
    #[serde(default)]
    pub posts: Vec<PostPerformance>,
    /// Aggregates; recomputed locally when the service omits them
    #[serde(default)]
    pub stats: Option<PerformanceStats>,
}

impl PostsReport {
    /// Build a report and compute its stats.
    pub fn new(posts: Vec<PostPerformance>) -> Self {
        let stats = Some(PerformanceStats::from_posts(&posts));
        Self { posts, stats }
    }

    /// Service stats, or stats computed from the posts.
    pub fn stats(&self) -> PerformanceStats {
        self.stats
            .unwrap_or_else(|| PerformanceStats::from_posts(&self.posts))
    }

    /// Posts published on the named page.
    pub fn for_page<'a>(&'a self, page_name: &'a str) -> impl Iterator<Item = &'a PostPerformance> {
        self.posts.iter().filter(move |p| p.page_name == page_name)
    }

    /// Distinct page names in first-seen order, for filter menus.
    pub fn page_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for post in &self.posts {
            if !names.contains(&post.page_name.as_str()) {
                names.push(&post.page_name);
            }
        }
        names
    }

    /// Find a post by id.
    pub fn find(&self, post_id: &str) -> Option<&PostPerformance> {
        self.posts.iter().find(|p| p.id == post_id)
    }
}

/// One line of the dashboard's recent activity feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    /// What happened
    #[serde(default)]
    pub activity: String,
    /// Activity category (post, ad, boost)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Status label
    #[serde(default)]
    pub status: String,
    /// Relative time label
    #[serde(default)]
    pub time: String,
}

/// Headline numbers for the dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardOverview {
    /// Pages known to the service
    #[serde(default)]
    pub pages_count: u64,
    /// Posts published today
    #[serde(default)]
    pub posts_today: u64,
    /// Reach over recent posts
    #[serde(default)]
    pub total_reach: u64,
    /// Interactions over recent posts
    #[serde(default)]
    pub engagement: u64,
    /// Latest console actions, newest first
    #[serde(default)]
    pub recent_activities: Vec<RecentActivity>,
}

/// A post queued for later publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ScheduledPost {
    id: String,
    #[serde(default)]
    message: String,
    /// Names of the destination pages.
    #[serde(default)]
    pages: Vec<String>,
    #[serde(default, with = "graph_time")]
    scheduled_time: Option<DateTime<Utc>>,
    #[serde(default)]
    status: String,
}

impl ScheduledPost {
    /// Whether the publication time has passed at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_time.is_some_and(|at| at <= now)
    }
}

/// Order scheduled posts by publication time, undated ones last.
pub fn sort_by_schedule(posts: &mut [ScheduledPost]) {
    posts.sort_by_key(|p| (p.scheduled_time.is_none(), p.scheduled_time));
}

/// Graph API timestamps come as `2025-06-20T10:30:00+0000`; RFC 3339 is accepted too.
pub(crate) mod graph_time {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => serializer.serialize_some(&t.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        DateTime::parse_from_rfc3339(&raw)
            .or_else(|_| DateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%z"))
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_graph_api_timestamps() {
        let json = r#"{"id":"post_1","created_time":"2025-06-20T10:30:00+0000"}"#;
        let post: PostPerformance = serde_json::from_str(json).unwrap();
        let created = post.created_time().unwrap();
        assert_eq!(created.to_rfc3339(), "2025-06-20T10:30:00+00:00");
    }

    #[test]
    fn parses_rfc3339_timestamps() {
        let json = r#"{"id":"post_1","created_time":"2025-06-20T10:30:00Z"}"#;
        let post: PostPerformance = serde_json::from_str(json).unwrap();
        assert!(post.created_time().is_some());
    }

    #[test]
    fn missing_fields_default() {
        let post: PostPerformance = serde_json::from_str(r#"{"id":"p"}"#).unwrap();
        assert_eq!(*post.status(), PostStatus::Organic);
        assert!(post.created_time().is_none());
        assert!(!post.boost_eligible());
    }

    #[test]
    fn stats_are_recomputed_when_absent() {
        let report = PostsReport {
            posts: vec![
                PostPerformance::new("a", "p1", "Bakery", "hi").with_metrics(100, 5, 2, 1),
                PostPerformance::new("b", "p2", "Garage", "yo")
                    .with_metrics(50, 1, 0, 4)
                    .boosted(),
            ],
            stats: None,
        };
        let stats = report.stats();
        assert_eq!(stats.total_reach, 150);
        assert_eq!(stats.total_engagement, 13);
        assert_eq!(stats.total_shares, 5);
        assert_eq!(stats.boosted_posts_count, 1);
    }

    #[test]
    fn page_names_are_unique_in_order() {
        let report = PostsReport::new(vec![
            PostPerformance::new("a", "p1", "Bakery", ""),
            PostPerformance::new("b", "p2", "Garage", ""),
            PostPerformance::new("c", "p1", "Bakery", ""),
        ]);
        assert_eq!(report.page_names(), vec!["Bakery", "Garage"]);
        assert_eq!(report.for_page("Bakery").count(), 2);
    }

    #[test]
    fn scheduled_posts_sort_and_report_due() {
        let json = r#"[
            {"id": "sched_2", "message": "Arrivages", "pages": ["Bois Malin Marseille"],
             "scheduled_time": "2025-06-21T15:30:00Z", "status": "scheduled"},
            {"id": "sched_3", "message": "Sans date"},
            {"id": "sched_1", "message": "Vitrine", "pages": ["Bois Malin Paris", "Bois Malin Lyon"],
             "scheduled_time": "2025-06-21T09:00:00Z", "status": "scheduled"}
        ]"#;
        let mut posts: Vec<ScheduledPost> = serde_json::from_str(json).unwrap();
        sort_by_schedule(&mut posts);

        let ids: Vec<_> = posts.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["sched_1", "sched_2", "sched_3"]);
        assert_eq!(posts[0].pages().len(), 2);

        let noon = DateTime::parse_from_rfc3339("2025-06-21T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(posts[0].is_due(noon));
        assert!(!posts[1].is_due(noon));
        assert!(!posts[2].is_due(noon));
    }
}
