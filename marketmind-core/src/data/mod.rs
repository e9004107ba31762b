//! Lookup data: backend client, saved responses, timestamp parsing, normalization.

pub mod backend;
pub mod lookup;
pub mod normalize;
pub mod provider;
pub mod timestamp;

pub use backend::HttpLookupProvider;
pub use lookup::{Interval, LookupRequest, LookupResponse, ParseRangeError, Period};
pub use normalize::{display_label, normalize, NormalizeError, TailOhlcv};
pub use provider::{FileLookupProvider, LookupError, LookupProvider};
pub use timestamp::parse_timestamp;
