pub mod buffer;
pub mod event_source;
pub mod feed;
pub mod sse;

pub use buffer::{ActivityRecord, RecentActivity};
pub use event_source::{EventStream, HttpEventSource, PushChannel, StreamError};
pub use feed::{decode_payload, ActivityFeed, Subscription, SubscriptionState};
pub use sse::{SseEvent, SseParser};
