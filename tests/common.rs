#![allow(dead_code)]

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use stagepipe::error::{Error, Result};
use stagepipe::pipeline::stage::{Emit, Sink, Stage};

/// Shared, ordered record of what every double saw.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().expect("mutex poisoned").push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("mutex poisoned").clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }
}

/// Pass-through stage that journals `<label>:accept <item>`,
/// `<label>:flush` and `<label>:discard`.
pub struct Probe {
    label: &'static str,
    journal: Journal,
}

impl Probe {
    pub fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: journal.clone(),
        }
    }
}

impl<T: Debug> Stage<T> for Probe {
    type Output = T;

    fn name(&self) -> &'static str {
        self.label
    }

    fn accept<E>(&mut self, item: T, out: &mut E) -> Result<()>
    where
        E: Emit<T> + ?Sized,
    {
        self.journal
            .record(format!("{}:accept {:?}", self.label, item));
        out.emit(item)
    }

    fn flush<E>(&mut self, _out: &mut E) -> Result<()>
    where
        E: Emit<T> + ?Sized,
    {
        self.journal.record(format!("{}:flush", self.label));
        Ok(())
    }

    fn discard(&mut self) {
        self.journal.record(format!("{}:discard", self.label));
    }
}

/// Fails on one chosen item, to show errors reach the caller.
pub struct FailOn(pub u32);

impl Stage<u32> for FailOn {
    type Output = u32;

    fn name(&self) -> &'static str {
        "fail_on"
    }

    fn accept<E>(&mut self, item: u32, out: &mut E) -> Result<()>
    where
        E: Emit<u32> + ?Sized,
    {
        if item == self.0 {
            return Err(Error::stage("fail_on", format!("refused {item}")));
        }
        out.emit(item)
    }
}

/// Terminal double with no protocol checks of its own, so the counts show
/// exactly what the chain delivered.
pub struct RecordingSink<T> {
    pub items: Arc<Mutex<Vec<T>>>,
    journal: Journal,
}

impl<T> RecordingSink<T> {
    pub fn new(journal: &Journal) -> (Self, Arc<Mutex<Vec<T>>>) {
        let items = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                items: items.clone(),
                journal: journal.clone(),
            },
            items,
        )
    }
}

impl<T: Debug> Sink<T> for RecordingSink<T> {
    fn accept(&mut self, item: T) -> Result<()> {
        self.journal.record(format!("sink:accept {item:?}"));
        self.items.lock().expect("mutex poisoned").push(item);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.journal.record("sink:finish");
        Ok(())
    }

    fn abort(&mut self) {
        self.journal.record("sink:abort");
    }
}

/// Split `input` at the given byte offsets (sorted, on char boundaries).
pub fn cut(input: &str, cuts: &[usize]) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for &at in cuts {
        pieces.push(input[start..at].to_string());
        start = at;
    }
    pieces.push(input[start..].to_string());
    pieces
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
