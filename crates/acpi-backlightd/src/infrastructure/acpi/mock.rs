//! Scripted event source for unit testing.
//!
//! Replays a fixed list of [`ScriptStep`]s.  Once the script is exhausted the
//! source behaves like an idle acpid socket and never yields again, which
//! lets tests exercise shutdown.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::EventSource;
use crate::domain::DaemonError;

/// One scripted outcome of [`EventSource::wait_for_event`].
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// acpid sent this record.
    Record(Vec<u8>),
    /// acpid closed the socket.
    Eof,
    /// The read failed with this error kind.
    Error(std::io::ErrorKind),
}

#[derive(Debug, Default)]
struct ScriptState {
    steps: VecDeque<ScriptStep>,
    closes: usize,
}

/// An [`EventSource`] that replays a script.  Clones share the script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEventSource {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedEventSource {
    /// Creates a source that will replay `steps` in order.
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                steps: steps.into(),
                closes: 0,
            })),
        }
    }

    /// Appends a step to the end of the script.
    pub fn push(&self, step: ScriptStep) {
        self.state.lock().expect("lock poisoned").steps.push_back(step);
    }

    /// Number of steps not yet replayed.
    pub fn remaining(&self) -> usize {
        self.state.lock().expect("lock poisoned").steps.len()
    }

    /// Number of times [`EventSource::close`] was called on any clone.
    pub fn close_count(&self) -> usize {
        self.state.lock().expect("lock poisoned").closes
    }
}

#[async_trait]
impl EventSource for ScriptedEventSource {
    async fn wait_for_event(&mut self) -> Result<Vec<u8>, DaemonError> {
        let next = self.state.lock().expect("lock poisoned").steps.pop_front();
        let path = PathBuf::from("scripted");
        match next {
            Some(ScriptStep::Record(bytes)) => Ok(bytes),
            Some(ScriptStep::Eof) => Err(DaemonError::Disconnected { path }),
            Some(ScriptStep::Error(kind)) => Err(DaemonError::Io {
                context: "failed to read event from",
                path,
                source: kind.into(),
            }),
            None => std::future::pending().await,
        }
    }

    fn close(self) {
        self.state.lock().expect("lock poisoned").closes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_replays_in_order() {
        // Arrange
        let mut source = ScriptedEventSource::new(vec![
            ScriptStep::Record(b"first".to_vec()),
            ScriptStep::Record(b"second".to_vec()),
            ScriptStep::Eof,
        ]);

        // Act / Assert
        tokio_test::block_on(async {
            assert_eq!(source.wait_for_event().await.unwrap(), b"first");
            assert_eq!(source.wait_for_event().await.unwrap(), b"second");
            assert!(matches!(
                source.wait_for_event().await,
                Err(DaemonError::Disconnected { .. })
            ));
        });
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_exhausted_script_stays_pending() {
        let mut source = ScriptedEventSource::default();
        let mut wait = tokio_test::task::spawn(source.wait_for_event());
        tokio_test::assert_pending!(wait.poll());
    }

    #[test]
    fn test_push_extends_script() {
        let source = ScriptedEventSource::new(vec![]);
        source.push(ScriptStep::Eof);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_close_is_counted_across_clones() {
        let source = ScriptedEventSource::new(vec![]);
        source.clone().close();
        assert_eq!(source.close_count(), 1);
    }
}
