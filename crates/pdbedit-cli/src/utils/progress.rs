use pdbedit::engine::progress::{Progress, ProgressCallback};
use tracing::{debug, info};

/// Turns engine progress events into log lines and user-facing status output.
#[derive(Clone, Copy, Default)]
pub struct CliProgressHandler;

impl CliProgressHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        Box::new(move |progress: Progress| match progress {
            Progress::PhaseStart { name } => info!("{}...", name),
            Progress::PhaseFinish => debug!("Phase finished."),
            Progress::FileWritten(path) => {
                info!("Wrote {:?}", path);
                println!("Wrote file: {}", path.display());
            }
            Progress::Message(msg) => info!("{}", msg),
        })
    }
}
