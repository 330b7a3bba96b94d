pub mod event_sink;

pub use event_sink::{ChannelSink, EventSink, TracingSink};
