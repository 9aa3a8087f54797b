// Composition root for the app event watchers.
//
// Responsibilities
// - Read config from environment.
// - Initialize telemetry.
// - The binary in main.rs wires the in memory service, the registry and the channel sink.

pub mod config;
pub mod telemetry;
