//! Service trait and wire envelopes for the Pagecast publishing console.
//!
//! Workflows talk to the publishing service only through [`ConsoleApi`], so
//! they can be driven by the HTTP client in production and by an in-memory
//! double in tests. Session handling is split into [`TokenStore`] (where the
//! bearer token lives) and [`LoginRedirect`] (what happens when the service
//! rejects it).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod session;
mod traits;
mod types;

pub use session::{LoginRedirect, MemoryTokenStore, NoRedirect, TokenStore};
pub use traits::ConsoleApi;
pub use types::{
    AudienceEstimatePayload, AudiencePayload, AudiencesPayload, CampaignsPayload, ConnectionCheck,
    DashboardPayload, Envelope, InterestsPayload, MessagePayload, PostDetails, PostDetailsPayload,
    PostInsights, PostMedia, PostPage, PublishPayload, ScheduledPostsPayload, TargetsPayload,
    TogglePayload,
};
