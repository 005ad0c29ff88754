use std::collections::VecDeque;
use std::sync::mpsc::Sender;

use chrono::{DateTime, Local};
use log::debug;

/// Where human-readable narration goes. The simulation only ever appends.
pub trait NarrationSink {
    fn append(&mut self, message: String);
}

impl NarrationSink for Vec<String> {
    fn append(&mut self, message: String) {
        self.push(message);
    }
}

/// Forward narration to a reader on another thread; a hung-up reader is not an error.
impl NarrationSink for Sender<String> {
    fn append(&mut self, message: String) {
        if self.send(message).is_err() { debug!("narration receiver hung up"); }
    }
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub tick: u64,
    pub at: DateTime<Local>,
    pub text: String,
}

impl Entry {
    /// `[HH:MM:SS] text`, the way the log panel prints it
    pub fn stamped(&self) -> String {
        format!("[{}] {}", self.at.format("%H:%M:%S"), self.text)
    }
}

/// Bounded, timestamped message log; the oldest entry goes when full.
#[derive(Clone, Debug)]
pub struct TextLog {
    entries: VecDeque<Entry>,
    capacity: usize,
    tick: u64,
}

impl TextLog {
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity: capacity.max(1), tick: 0 }
    }

    /// Tick stamped on entries appended from now on.
    pub fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Entries appended during `tick`.
    pub fn for_tick(&self, tick: u64) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |it| it.tick == tick)
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.back()
    }
}

impl NarrationSink for TextLog {
    fn append(&mut self, text: String) {
        if self.entries.len() >= self.capacity { self.entries.pop_front(); }
        self.entries.push_back(Entry { tick: self.tick, at: Local::now(), text });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn test_text_log_drops_oldest_at_capacity() {
        let mut log = TextLog::new(2);
        log.append("one".into());
        log.append("two".into());
        log.append("three".into());
        let texts: Vec<_> = log.entries().map(|it| it.text.as_str()).collect();
        assert_eq!(texts, ["two", "three"]);
    }

    #[test]
    fn test_text_log_stamps_ticks() {
        let mut log = TextLog::new(10);
        log.append("before".into());
        log.set_tick(3);
        log.append("during".into());
        assert_eq!(log.for_tick(3).count(), 1);
        assert_eq!(log.last().map(|it| it.tick), Some(3));
        assert!(log.last().unwrap().stamped().ends_with("] during"));
    }

    #[test]
    fn test_sender_sink_survives_hung_up_receiver() {
        let (mut tx, rx) = mpsc::channel::<String>();
        tx.append("hello".into());
        assert_eq!(rx.recv().unwrap(), "hello");
        drop(rx);
        tx.append("nobody listening".into());
    }
}
