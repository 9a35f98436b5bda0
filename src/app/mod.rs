// PhotoDex - app/mod.rs
//
// Application layer: background scan orchestration.
// Dependencies: core layer.
// Must NOT depend on: server.

pub mod indexer;
