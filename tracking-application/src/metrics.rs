use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    events: AtomicU64,
    event_errors: AtomicU64,
    streams: AtomicU64,
    stream_errors: AtomicU64,
}

impl Metrics {
    pub fn record_event(&self) {
        self.events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_error(&self) {
        self.event_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stream(&self) {
        self.streams.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stream_error(&self) {
        self.stream_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let events = self.events.load(Ordering::Relaxed);
        let event_errors = self.event_errors.load(Ordering::Relaxed);
        let streams = self.streams.load(Ordering::Relaxed);
        let stream_errors = self.stream_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE tracking_events_total counter\n\
tracking_events_total {}\n\
# TYPE tracking_event_errors_total counter\n\
tracking_event_errors_total {}\n\
# TYPE tracking_streams_total counter\n\
tracking_streams_total {}\n\
# TYPE tracking_stream_errors_total counter\n\
tracking_stream_errors_total {}\n",
            events, event_errors, streams, stream_errors
        )
    }
}
