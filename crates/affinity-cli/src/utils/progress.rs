use affinity::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Drives one stderr progress bar from library progress events.
///
/// Phases show as a spinner; a task inside a phase (triple scoring, a search) switches
/// to a bar that partitions advance in chunks.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    #[cfg(test)]
    fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        bar.finish_and_clear();
        Self {
            bar: Arc::new(Mutex::new(bar)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let shared = Arc::clone(&self.bar);

        Box::new(move |progress: Progress| {
            let Ok(bar) = shared.lock() else {
                warn!("Progress bar lock was poisoned; dropping progress event.");
                return;
            };
            apply(&bar, progress);
        })
    }
}

fn apply(bar: &ProgressBar, progress: Progress) {
    match progress {
        Progress::PhaseStart { name } => {
            bar.reset();
            bar.set_length(0);
            bar.set_style(spinner_style());
            bar.set_message(name);
            bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::TaskStart { total_steps } => {
            bar.disable_steady_tick();
            bar.reset();
            bar.set_length(total_steps);
            bar.set_style(bar_style());
        }
        Progress::TaskAdvance { steps } => bar.inc(steps),
        Progress::TaskFinish => {
            if let Some(length) = bar.length() {
                bar.set_position(length);
            }
            bar.finish();
        }
        Progress::PhaseFinish => {
            bar.disable_steady_tick();
            bar.finish_with_message(format!("✓ {}", bar.message()));
        }
        Progress::Message(msg) if bar.is_finished() => bar.set_message(msg),
        Progress::Message(msg) => bar.println(format!("  {msg}")),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .expect("Failed to create spinner style template")
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{msg:<16} [{bar:40.cyan/blue}] {human_pos}/{human_len} ({per_sec}, {eta})",
    )
    .expect("Failed to create bar style template")
    .progress_chars("##-")
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(handler: &CliProgressHandler) -> (u64, Option<u64>, bool, String) {
        let bar = handler.bar.lock().unwrap();
        (bar.position(), bar.length(), bar.is_finished(), bar.message())
    }

    #[test]
    fn search_partitions_advance_the_bar_in_chunks() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Search" });
        callback(Progress::TaskStart { total_steps: 120 });
        callback(Progress::TaskAdvance { steps: 40 });
        callback(Progress::TaskAdvance { steps: 40 });
        assert_eq!(state(&handler), (80, Some(120), false, "Search".to_string()));

        callback(Progress::TaskAdvance { steps: 40 });
        callback(Progress::TaskFinish);
        callback(Progress::PhaseFinish);
        assert_eq!(state(&handler), (120, Some(120), true, "✓ Search".to_string()));
    }

    #[test]
    fn each_task_starts_from_an_empty_bar() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Triple Scores",
        });
        callback(Progress::TaskStart { total_steps: 20 });
        callback(Progress::TaskAdvance { steps: 20 });
        callback(Progress::TaskFinish);
        callback(Progress::PhaseFinish);

        callback(Progress::PhaseStart { name: "Search" });
        callback(Progress::TaskStart { total_steps: 360 });
        assert_eq!(state(&handler), (0, Some(360), false, "Search".to_string()));
    }

    #[test]
    fn finishing_a_task_fills_the_bar() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::TaskStart { total_steps: 10 });
        callback(Progress::TaskAdvance { steps: 3 });
        callback(Progress::TaskFinish);

        let (position, length, finished, _) = state(&handler);
        assert_eq!(Some(position), length);
        assert!(finished);
    }

    #[test]
    fn messages_after_a_phase_replace_the_label() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Loading Cache",
        });
        callback(Progress::PhaseFinish);
        callback(Progress::Message("cache hit".to_string()));

        assert_eq!(state(&handler).3, "cache hit");
    }
}
