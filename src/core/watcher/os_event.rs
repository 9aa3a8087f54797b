// Catalog of events published under the OS domain.
//
// Each event owns a fixed bit in the listening mask. A watcher's OS filters fold into a
// mask that tells the publisher which OS events anyone is listening to.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OsEvent {
    AppCrash,
    AppFreeze,
    AppLaunch,
    ScrollJank,
    CpuUsageHigh,
    BatteryUsage,
    ResourceOverlimit,
    AddressSanitizer,
    MainThreadJank,
    AppStart,
    AppHicollie,
    AppKilled,
}

impl OsEvent {
    /// Catalog order. The position of an event in this array is its mask bit.
    pub const ALL: [OsEvent; 12] = [
        OsEvent::AppCrash,
        OsEvent::AppFreeze,
        OsEvent::AppLaunch,
        OsEvent::ScrollJank,
        OsEvent::CpuUsageHigh,
        OsEvent::BatteryUsage,
        OsEvent::ResourceOverlimit,
        OsEvent::AddressSanitizer,
        OsEvent::MainThreadJank,
        OsEvent::AppStart,
        OsEvent::AppHicollie,
        OsEvent::AppKilled,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OsEvent::AppCrash => "APP_CRASH",
            OsEvent::AppFreeze => "APP_FREEZE",
            OsEvent::AppLaunch => "APP_LAUNCH",
            OsEvent::ScrollJank => "SCROLL_JANK",
            OsEvent::CpuUsageHigh => "CPU_USAGE_HIGH",
            OsEvent::BatteryUsage => "BATTERY_USAGE",
            OsEvent::ResourceOverlimit => "RESOURCE_OVERLIMIT",
            OsEvent::AddressSanitizer => "ADDRESS_SANITIZER",
            OsEvent::MainThreadJank => "MAIN_THREAD_JANK",
            OsEvent::AppStart => "APP_START",
            OsEvent::AppHicollie => "APP_HICOLLIE",
            OsEvent::AppKilled => "APP_KILLED",
        }
    }

    pub fn bit(&self) -> u32 {
        *self as u32
    }

    pub fn mask(&self) -> u64 {
        1u64 << self.bit()
    }

    /// Events whose bit is set in `mask`, in catalog order. Unknown bits are ignored.
    pub fn from_mask(mask: u64) -> Vec<OsEvent> {
        OsEvent::ALL
            .into_iter()
            .filter(|event| mask & event.mask() != 0)
            .collect()
    }

    pub fn names() -> Vec<String> {
        OsEvent::ALL.iter().map(|e| e.name().to_string()).collect()
    }
}

impl fmt::Display for OsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OsEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OsEvent::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| s.to_string())
    }
}
