// Mutual follows engine.
// Paginated fetching, intersection, retry, and the request orchestrator built on them.

pub mod fetcher;
pub mod intersect;
pub mod message;
pub mod retry;
pub mod service;

pub use fetcher::{DEFAULT_PAGE_SIZE, FollowsFetcher};
pub use intersect::{IntersectionResult, intersect};
pub use message::{Failure, FullIntersection, Payload, PreviewIntersection, Request, Response};
pub use retry::RetryPolicy;
pub use service::{Budgets, MutualsService};
