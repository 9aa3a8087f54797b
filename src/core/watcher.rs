// This module groups the watcher domain components in 2018 style.
//
// Structure
// - domain.rs: enumerated event domains fixed by the platform
// - os_event.rs: catalog of OS domain events and their listening mask bits
// - event.rs: the application event record delivered to watchers
// - filter.rs: domain plus event names, and the matching rule
// - descriptor.rs: watcher name plus filters, validation and config conversion
//
// Boundaries
// - No input or output. Everything here is pure and framework-free.

pub mod descriptor;
pub mod domain;
pub mod event;
pub mod filter;
pub mod os_event;
