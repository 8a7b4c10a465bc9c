//! Workflow recording, stage timing, and structured run logs.

use crate::runtime::artifacts::ArtifactManager;
use crate::runtime::error::{CheckError, CheckResult};
use serde::Serialize;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize)]
struct StageRecord {
    name: String,
    started_unix_ms: u64,
    duration_ms: u128,
    status: String,
    error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct RunManifest {
    workflow: String,
    started_unix_ms: u64,
    finished_unix_ms: u64,
    duration_ms: u128,
    status: String,
    error: Option<String>,
    run_dir: String,
    command: String,
    stages: Vec<StageRecord>,
}

#[derive(Debug)]
struct ActiveRun {
    workflow: String,
    started_unix_ms: u64,
    started_instant: Instant,
    run_dir: PathBuf,
    manifest_path: PathBuf,
    events_path: PathBuf,
    command: String,
    stages: Vec<StageRecord>,
}

/// Shared workflow recorder service.
///
/// A run executed through [`with_workflow_run`](Self::with_workflow_run) gets its own directory
/// under the cache `runs/` root holding an `events.jsonl` stream and a `manifest.json` summary.
/// Stage work nests inside [`run_timed_stage`](Self::run_timed_stage); free-form events go
/// through [`record_event`](Self::record_event). Outside an active run, events are dropped and
/// stages only print their timing.
#[derive(Clone, Debug)]
pub struct WorkflowRecorder {
    artifacts: ArtifactManager,
    active: Arc<Mutex<Option<ActiveRun>>>,
}

impl WorkflowRecorder {
    /// Create a recorder service.
    pub fn new(artifacts: ArtifactManager) -> Self {
        Self {
            artifacts,
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Run a workflow with manifest and event recording.
    ///
    /// Emits `workflow_started` and `workflow_finished` events and writes the manifest whatever
    /// the action's outcome. The action's result is returned unchanged; a failure to finish the
    /// run log only prints a warning.
    pub fn with_workflow_run<T, F>(&self, workflow: &str, action: F) -> CheckResult<T>
    where
        F: FnOnce() -> CheckResult<T>,
    {
        let run = self.begin_workflow_run(workflow)?;
        *self.lock()? = Some(run);

        let result = action();
        if let Err(err) = self.finish_workflow_run(result.as_ref().err().cloned()) {
            self.warn(&format!("run log incomplete: {err}"));
        }
        result
    }

    fn begin_workflow_run(&self, workflow: &str) -> CheckResult<ActiveRun> {
        let started_unix_ms = unix_timestamp_millis();
        let run_dir = self
            .artifacts
            .runs_dir()
            .join(format!("{started_unix_ms}-{workflow}"));
        self.artifacts.ensure_dir(&run_dir)?;

        let events_path = run_dir.join("events.jsonl");
        let manifest_path = run_dir.join("manifest.json");
        fs::write(&events_path, "").map_err(|err| {
            CheckError::io(format!(
                "failed to initialize {}: {err}",
                events_path.display()
            ))
        })?;

        append_run_event(
            &events_path,
            serde_json::json!({
                "type": "workflow_started",
                "workflow": workflow,
                "timestamp_unix_ms": started_unix_ms
            }),
        )?;

        Ok(ActiveRun {
            workflow: workflow.to_string(),
            started_unix_ms,
            started_instant: Instant::now(),
            run_dir,
            manifest_path,
            events_path,
            command: env::args().collect::<Vec<_>>().join(" "),
            stages: Vec::new(),
        })
    }

    fn finish_workflow_run(&self, error: Option<CheckError>) -> CheckResult<()> {
        let Some(run) = self.lock()?.take() else {
            return Ok(());
        };

        let finished_unix_ms = unix_timestamp_millis();
        let status = if error.is_none() { "ok" } else { "failed" }.to_string();
        let manifest = RunManifest {
            workflow: run.workflow.clone(),
            started_unix_ms: run.started_unix_ms,
            finished_unix_ms,
            duration_ms: run.started_instant.elapsed().as_millis(),
            status: status.clone(),
            error: error.as_ref().map(ToString::to_string),
            run_dir: run.run_dir.display().to_string(),
            command: run.command.clone(),
            stages: run.stages,
        };

        append_run_event(
            &run.events_path,
            serde_json::json!({
                "type": "workflow_finished",
                "workflow": run.workflow,
                "timestamp_unix_ms": finished_unix_ms,
                "status": status,
                "error": error.as_ref().map(ToString::to_string)
            }),
        )?;

        let manifest_json = serde_json::to_string_pretty(&manifest).map_err(|err| {
            CheckError::io(format!("failed to serialize run manifest: {err}"))
        })?;
        fs::write(&run.manifest_path, manifest_json).map_err(|err| {
            CheckError::io(format!(
                "failed to write {}: {err}",
                run.manifest_path.display()
            ))
        })?;
        println!("    run log: {}", run.manifest_path.display());

        Ok(())
    }

    /// Record a stage with timing and structured events.
    ///
    /// The stage result is propagated unchanged after `stage_started` and `stage_finished` are
    /// recorded.
    pub fn run_timed_stage<T, F>(&self, message: &str, action: F) -> CheckResult<T>
    where
        F: FnOnce() -> CheckResult<T>,
    {
        println!("\n==> {message}");
        let started = Instant::now();
        let started_unix_ms = unix_timestamp_millis();
        self.record_event(serde_json::json!({
            "type": "stage_started",
            "name": message,
            "timestamp_unix_ms": started_unix_ms
        }))?;

        let result = action();
        let elapsed = started.elapsed();
        let stage = StageRecord {
            name: message.to_string(),
            started_unix_ms,
            duration_ms: elapsed.as_millis(),
            status: if result.is_ok() { "ok" } else { "failed" }.to_string(),
            error: result.as_ref().err().map(ToString::to_string),
        };
        self.record_stage(stage)?;
        match &result {
            Ok(_) => println!("    done in {}", format_duration(elapsed)),
            Err(_) => println!("    failed in {}", format_duration(elapsed)),
        }
        result
    }

    /// Append a structured event to the active run, if any.
    pub fn record_event(&self, event: serde_json::Value) -> CheckResult<()> {
        let guard = self.lock()?;
        let Some(run) = guard.as_ref() else {
            return Ok(());
        };
        append_run_event(&run.events_path, event)
    }

    /// Print a warning using the shared workflow output style.
    pub fn warn(&self, message: &str) {
        println!("[warn] {message}");
    }

    fn record_stage(&self, stage: StageRecord) -> CheckResult<()> {
        let mut guard = self.lock()?;
        let Some(run) = guard.as_mut() else {
            return Ok(());
        };
        append_run_event(
            &run.events_path,
            serde_json::json!({
                "type": "stage_finished",
                "name": stage.name,
                "started_unix_ms": stage.started_unix_ms,
                "finished_unix_ms": unix_timestamp_millis(),
                "duration_ms": stage.duration_ms,
                "status": stage.status,
                "error": stage.error
            }),
        )?;
        run.stages.push(stage);
        Ok(())
    }

    fn lock(&self) -> CheckResult<std::sync::MutexGuard<'_, Option<ActiveRun>>> {
        self.active
            .lock()
            .map_err(|_| CheckError::io("failed to lock workflow recorder"))
    }
}

fn append_run_event(path: &Path, event: serde_json::Value) -> CheckResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| CheckError::io(format!("failed to open {}: {err}", path.display())))?;
    let line = serde_json::to_string(&event)
        .map_err(|err| CheckError::io(format!("failed to serialize run event: {err}")))?;
    use std::io::Write as _;
    writeln!(&mut file, "{line}")
        .map_err(|err| CheckError::io(format!("failed to append {}: {err}", path.display())))
}

/// Format a duration for human-readable terminal output.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    if secs >= 60 {
        let minutes = secs / 60;
        let rem_secs = secs % 60;
        format!("{minutes}m {rem_secs}.{millis:03}s")
    } else {
        format!("{secs}.{millis:03}s")
    }
}

/// Return the current unix timestamp in milliseconds.
pub fn unix_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
