//! Background extraction job
//!
//! One recognition runs per spawned thread, at most one at a time from
//! the page's point of view. The engine handle is created and dropped
//! entirely inside the thread body, so it is released on success and on
//! failure alike. Updates flow back over a crossbeam channel the UI
//! drains once per frame; dropping the job detaches the thread (there
//! is no mid-flight cancellation, late updates simply go nowhere).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::{EngineFactory, OcrError, OcrLanguage, ProgressEvent, RecognitionMode};

/// Update emitted by a running extraction
#[derive(Debug)]
pub enum ExtractionUpdate {
    /// Incremental engine progress
    Progress(ProgressEvent),
    /// Terminal outcome; always the last update sent
    Finished(Result<String, OcrError>),
}

/// Handle to an in-flight extraction. The worker thread is detached;
/// dropping the job only drops the update channel.
pub struct ExtractionJob {
    updates: Receiver<ExtractionUpdate>,
}

impl ExtractionJob {
    /// Next pending update without blocking the UI thread
    pub fn try_next_update(&self) -> Option<ExtractionUpdate> {
        self.updates.try_recv().ok()
    }

    /// Blocking receive, for tests that need to observe the full stream
    #[cfg(test)]
    pub fn wait_next_update(&self, timeout: std::time::Duration) -> Option<ExtractionUpdate> {
        self.updates.recv_timeout(timeout).ok()
    }
}

/// Spawn a recognition over `image_path` on a worker thread
pub fn spawn_extraction(
    factory: Arc<dyn EngineFactory>,
    image_path: PathBuf,
    language: OcrLanguage,
    mode: RecognitionMode,
) -> ExtractionJob {
    let (tx, rx) = unbounded();
    std::thread::spawn(move || {
        tracing::info!(image = %image_path.display(), lang = language.code(), "extraction started");
        let outcome = run_extraction(factory.as_ref(), &image_path, language, mode, &tx);
        match &outcome {
            Ok(text) => tracing::info!(chars = text.len(), "extraction finished"),
            Err(err) => tracing::error!(error = %err, "extraction failed"),
        }
        // Receiver may already be gone if the page was cleared mid-flight.
        let _ = tx.send(ExtractionUpdate::Finished(outcome));
    });

    ExtractionJob { updates: rx }
}

fn run_extraction(
    factory: &dyn EngineFactory,
    path: &Path,
    language: OcrLanguage,
    mode: RecognitionMode,
    updates: &Sender<ExtractionUpdate>,
) -> Result<String, OcrError> {
    // The engine handle lives only inside this scope; every return path
    // below drops it.
    let mut engine = factory.configure(language, mode)?;
    let mut forward = |event: ProgressEvent| {
        let _ = updates.send(ExtractionUpdate::Progress(event));
    };
    engine.recognize(path, &mut forward)
}

#[cfg(test)]
pub(crate) mod scripted {
    //! Scripted engine for exercising the orchestration without a real
    //! recognition backend.

    use std::path::Path;
    use std::sync::Arc;

    use crate::ocr::{
        EngineFactory, OcrError, OcrLanguage, OcrResult, ProgressEvent, RecognitionEngine,
        RecognitionMode,
    };

    /// Outcome the scripted engine should produce
    #[derive(Clone)]
    pub enum Script {
        Text(&'static str),
        Failure(&'static str),
    }

    pub struct ScriptedFactory {
        pub events: Vec<ProgressEvent>,
        pub script: Script,
        /// When set, `configure` itself fails
        pub refuse_configure: bool,
    }

    impl ScriptedFactory {
        pub fn returning(text: &'static str, events: Vec<ProgressEvent>) -> Arc<Self> {
            Arc::new(Self {
                events,
                script: Script::Text(text),
                refuse_configure: false,
            })
        }

        pub fn failing(message: &'static str, events: Vec<ProgressEvent>) -> Arc<Self> {
            Arc::new(Self {
                events,
                script: Script::Failure(message),
                refuse_configure: false,
            })
        }
    }

    impl EngineFactory for ScriptedFactory {
        fn configure(
            &self,
            _language: OcrLanguage,
            _mode: RecognitionMode,
        ) -> OcrResult<Box<dyn RecognitionEngine>> {
            if self.refuse_configure {
                return Err(OcrError::EngineInit {
                    message: "scripted refusal".to_string(),
                });
            }
            Ok(Box::new(ScriptedEngine {
                events: self.events.clone(),
                script: self.script.clone(),
            }))
        }
    }

    pub struct ScriptedEngine {
        events: Vec<ProgressEvent>,
        script: Script,
    }

    impl RecognitionEngine for ScriptedEngine {
        fn recognize(
            &mut self,
            _path: &Path,
            on_progress: &mut dyn FnMut(ProgressEvent),
        ) -> OcrResult<String> {
            for event in self.events.drain(..) {
                on_progress(event);
            }
            match &self.script {
                Script::Text(text) => Ok((*text).to_string()),
                Script::Failure(message) => Err(OcrError::Recognition {
                    message: (*message).to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::scripted::ScriptedFactory;
    use super::*;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn drain(job: &ExtractionJob) -> Vec<ExtractionUpdate> {
        let mut updates = Vec::new();
        while let Some(update) = job.wait_next_update(TIMEOUT) {
            let finished = matches!(update, ExtractionUpdate::Finished(_));
            updates.push(update);
            if finished {
                break;
            }
        }
        updates
    }

    #[test]
    fn updates_arrive_in_order_and_end_with_success() {
        let factory = ScriptedFactory::returning(
            "Hello World",
            vec![
                ProgressEvent::recognizing(0.25),
                ProgressEvent::recognizing(0.75),
                ProgressEvent::recognizing(1.0),
            ],
        );
        let job = spawn_extraction(
            factory,
            PathBuf::from("photo.png"),
            OcrLanguage::English,
            RecognitionMode::LstmOnly,
        );

        let updates = drain(&job);
        assert_eq!(updates.len(), 4);

        let fractions: Vec<f32> = updates
            .iter()
            .filter_map(|u| match u {
                ExtractionUpdate::Progress(e) => Some(e.fraction),
                ExtractionUpdate::Finished(_) => None,
            })
            .collect();
        assert_eq!(fractions, vec![0.25, 0.75, 1.0]);

        match updates.last() {
            Some(ExtractionUpdate::Finished(Ok(text))) => assert_eq!(text, "Hello World"),
            other => panic!("expected successful finish, got {other:?}"),
        }
    }

    #[test]
    fn engine_failure_still_delivers_finished() {
        let factory =
            ScriptedFactory::failing("corrupt image", vec![ProgressEvent::recognizing(0.5)]);
        let job = spawn_extraction(
            factory,
            PathBuf::from("photo.png"),
            OcrLanguage::German,
            RecognitionMode::LstmOnly,
        );

        let updates = drain(&job);
        assert!(matches!(
            updates.last(),
            Some(ExtractionUpdate::Finished(Err(OcrError::Recognition { .. })))
        ));
    }

    #[test]
    fn configure_failure_skips_progress_entirely() {
        let factory = Arc::new(ScriptedFactory {
            events: vec![ProgressEvent::recognizing(0.5)],
            script: super::scripted::Script::Text("unused"),
            refuse_configure: true,
        });
        let job = spawn_extraction(
            factory,
            PathBuf::from("photo.png"),
            OcrLanguage::English,
            RecognitionMode::LstmOnly,
        );

        let updates = drain(&job);
        assert_eq!(updates.len(), 1);
        assert!(matches!(
            updates.first(),
            Some(ExtractionUpdate::Finished(Err(OcrError::EngineInit { .. })))
        ));
    }
}
