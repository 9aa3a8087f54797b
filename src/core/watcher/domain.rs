// Event domains known to the event-reporting service.
//
// Purpose
// - Give filters and events a closed set of domains so an unknown domain is rejected
//   when a filter is built, not when an event is delivered.
//
// Wire format
// - Serialized as the upper case platform string (for example "OS", "WINDOW_MANAGER").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventDomain {
    Os,
    HiviewDfx,
    Reliability,
    Ace,
    Aafwk,
    Ffrt,
    Profiler,
    Framework,
    WindowManager,
    FileManagement,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown event domain: {0}")]
pub struct UnknownDomain(pub String);

impl EventDomain {
    pub const ALL: [EventDomain; 10] = [
        EventDomain::Os,
        EventDomain::HiviewDfx,
        EventDomain::Reliability,
        EventDomain::Ace,
        EventDomain::Aafwk,
        EventDomain::Ffrt,
        EventDomain::Profiler,
        EventDomain::Framework,
        EventDomain::WindowManager,
        EventDomain::FileManagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventDomain::Os => "OS",
            EventDomain::HiviewDfx => "HIVIEWDFX",
            EventDomain::Reliability => "RELIABILITY",
            EventDomain::Ace => "ACE",
            EventDomain::Aafwk => "AAFWK",
            EventDomain::Ffrt => "FFRT",
            EventDomain::Profiler => "PROFILER",
            EventDomain::Framework => "FRAMEWORK",
            EventDomain::WindowManager => "WINDOW_MANAGER",
            EventDomain::FileManagement => "FILEMANAGEMENT",
        }
    }
}

impl fmt::Display for EventDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventDomain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventDomain::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}

impl TryFrom<String> for EventDomain {
    type Error = UnknownDomain;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventDomain> for String {
    fn from(domain: EventDomain) -> Self {
        domain.as_str().to_string()
    }
}
