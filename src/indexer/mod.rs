//! Follows the quest contract and mirrors its events into the store.

mod config;
mod event_listener;
mod mapper;
mod writer;

#[cfg(test)]
mod tests;

pub(crate) use config::IndexerConfig;
pub(crate) use event_listener::{EventListenerTask, EventSource, cursor_key};
pub(crate) use mapper::MapError;
