use crate::view_model::{self, ControlsView, PanelViewModel, StatusIndicator};
use crate::{CrawlerType, CreatorRecord, Effect, FormState, ServerStatus, VideoRecord, ViewRouter};

const READY_TEXT: &str = "Ready";
const STOPPED_TEXT: &str = "Stopped";
const STOPPING_TEXT: &str = "Stopping...";
const FALLBACK_TASK: &str = "crawler";

/// The client's belief about whether a job is executing on the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running(String),
    /// A stop request is in flight for a job we believed was running.
    TransitioningStop,
}

impl RunState {
    pub fn is_idle(&self) -> bool {
        matches!(self, RunState::Idle)
    }

    /// True for every state in which the server may still be executing a job.
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }
}

/// A start or stop request that has been sent but not answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingCommand {
    /// Remembers the submitted type; the form stays editable meanwhile.
    Start { kind: CrawlerType },
    Stop { previous: RunState },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    form: FormState,
    router: ViewRouter,
    run_state: RunState,
    pending: Option<PendingCommand>,
    confirming_clear: bool,
    clear_in_flight: bool,
    status_text: String,
    progress: Option<(u64, u64)>,
    videos: Option<Vec<VideoRecord>>,
    creators: Option<Vec<CreatorRecord>>,
    video_count: Option<u64>,
    /// Generation of the newest refresh issued.
    refresh_generation: u64,
    /// Generation of the response currently shown, per data kind.
    videos_generation: u64,
    creators_generation: u64,
    count_generation: u64,
    polls_reconciled: u64,
    dirty: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            form: FormState::default(),
            router: ViewRouter::default(),
            run_state: RunState::Idle,
            pending: None,
            confirming_clear: false,
            clear_in_flight: false,
            status_text: READY_TEXT.to_string(),
            progress: None,
            videos: None,
            creators: None,
            video_count: None,
            refresh_generation: 0,
            videos_generation: 0,
            creators_generation: 0,
            count_generation: 0,
            polls_reconciled: 0,
            // The first render always has to happen.
            dirty: true,
        }
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PanelViewModel {
        let indicator = match self.run_state {
            RunState::Idle => StatusIndicator::Idle,
            RunState::Running(_) => StatusIndicator::Running,
            RunState::TransitioningStop => StatusIndicator::Stopping,
        };
        let videos = self.videos.as_deref().unwrap_or_default();
        let creators = self.creators.as_deref().unwrap_or_default();

        PanelViewModel {
            indicator,
            status_text: self.status_text.clone(),
            progress_text: self
                .progress
                .map(|(progress, total)| format!("{progress} / {total}")),
            controls: self.controls(),
            crawler_type: self.form.crawler_type,
            visible_section: self.router.visible_section(),
            active_tab: self.router.active_tab(),
            video_count: self.video_count.unwrap_or(0).to_string(),
            creator_count: creators.len().to_string(),
            videos_html: view_model::render_video_rows(videos),
            creators_html: view_model::render_creator_rows(creators),
            dirty: self.dirty,
        }
    }

    /// Start and stop enablement, derived from the run state and any request in flight.
    pub fn controls(&self) -> ControlsView {
        let (start_enabled, stop_enabled) = if self.pending.is_some() {
            (false, false)
        } else {
            match self.run_state {
                RunState::Idle => (true, false),
                RunState::Running(_) => (false, true),
                RunState::TransitioningStop => (false, false),
            }
        };
        ControlsView {
            start_enabled,
            stop_enabled,
            clear_enabled: !self.clear_in_flight && !self.confirming_clear,
        }
    }

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    pub fn pending(&self) -> Option<&PendingCommand> {
        self.pending.as_ref()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn videos(&self) -> &[VideoRecord] {
        self.videos.as_deref().unwrap_or_default()
    }

    pub fn creators(&self) -> &[CreatorRecord] {
        self.creators.as_deref().unwrap_or_default()
    }

    pub fn polls_reconciled(&self) -> u64 {
        self.polls_reconciled
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Overwrites the local belief with the server-reported status.
    ///
    /// Returns true when the caller should refresh the data views: on every
    /// report of a running job, and once when a job we believed active ends.
    pub fn reconcile(&mut self, status: &ServerStatus) -> bool {
        self.polls_reconciled += 1;

        if status.running {
            let task = status
                .current_task
                .as_deref()
                .map(str::trim)
                .filter(|task| !task.is_empty())
                .unwrap_or(FALLBACK_TASK)
                .to_string();
            self.status_text = running_text(&task);
            self.progress = (status.total > 0).then_some((status.progress, status.total));
            self.run_state = RunState::Running(task);
            self.dirty = true;
            return true;
        }

        if self.run_state.is_idle() {
            return false;
        }

        self.status_text = READY_TEXT.to_string();
        self.progress = None;
        self.run_state = RunState::Idle;
        self.dirty = true;
        true
    }

    pub(crate) fn form_mut(&mut self) -> &mut FormState {
        self.dirty = true;
        &mut self.form
    }

    pub(crate) fn router_mut(&mut self) -> &mut ViewRouter {
        &mut self.router
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_start(&mut self, kind: CrawlerType) {
        self.pending = Some(PendingCommand::Start { kind });
        self.dirty = true;
    }

    /// Settles a pending start and returns the type that was submitted, or
    /// `None` if no start was pending.
    pub(crate) fn finish_start(&mut self, succeeded: bool) -> Option<CrawlerType> {
        let kind = match self.pending.take() {
            Some(PendingCommand::Start { kind }) => kind,
            other => {
                self.pending = other;
                return None;
            }
        };
        if succeeded {
            self.status_text = format!("Crawling ({})...", kind.as_str());
            self.run_state = RunState::Running(kind.as_str().to_string());
        }
        self.dirty = true;
        Some(kind)
    }

    pub(crate) fn begin_stop(&mut self) {
        let previous = self.run_state.clone();
        if previous.is_active() {
            self.run_state = RunState::TransitioningStop;
            self.status_text = STOPPING_TEXT.to_string();
        }
        self.pending = Some(PendingCommand::Stop { previous });
        self.dirty = true;
    }

    /// Settles a pending stop. Returns false if no stop was pending.
    pub(crate) fn finish_stop(&mut self, succeeded: bool) -> bool {
        let previous = match self.pending.take() {
            Some(PendingCommand::Stop { previous }) => previous,
            other => {
                self.pending = other;
                return false;
            }
        };
        // On failure, restore unless a poll already replaced the transitional state.
        if succeeded {
            self.run_state = RunState::Idle;
            self.status_text = STOPPED_TEXT.to_string();
            self.progress = None;
        } else if self.run_state == RunState::TransitioningStop {
            self.status_text = match &previous {
                RunState::Running(task) => running_text(task),
                _ => READY_TEXT.to_string(),
            };
            self.run_state = previous;
        }
        self.dirty = true;
        true
    }

    pub(crate) fn clear_busy(&self) -> bool {
        self.confirming_clear || self.clear_in_flight
    }

    pub(crate) fn set_confirming_clear(&mut self, confirming: bool) {
        self.confirming_clear = confirming;
        self.dirty = true;
    }

    pub(crate) fn is_confirming_clear(&self) -> bool {
        self.confirming_clear
    }

    pub(crate) fn set_clear_in_flight(&mut self, in_flight: bool) {
        self.clear_in_flight = in_flight;
        self.dirty = true;
    }

    pub(crate) fn is_clear_in_flight(&self) -> bool {
        self.clear_in_flight
    }

    /// Issues a new refresh generation and the fetches stamped with it.
    pub(crate) fn full_refresh(&mut self) -> Vec<Effect> {
        self.refresh_generation += 1;
        Effect::full_refresh(self.refresh_generation).to_vec()
    }

    // Responses older than the one on screen are dropped, so a slow fetch
    // from before a clear cannot bring old rows back.

    pub(crate) fn replace_videos(&mut self, generation: u64, videos: Vec<VideoRecord>) -> bool {
        if generation < self.videos_generation {
            return false;
        }
        self.videos_generation = generation;
        self.videos = Some(videos);
        self.dirty = true;
        true
    }

    pub(crate) fn replace_creators(
        &mut self,
        generation: u64,
        creators: Vec<CreatorRecord>,
    ) -> bool {
        if generation < self.creators_generation {
            return false;
        }
        self.creators_generation = generation;
        self.creators = Some(creators);
        self.dirty = true;
        true
    }

    pub(crate) fn set_video_count(&mut self, generation: u64, count: u64) -> bool {
        if generation < self.count_generation {
            return false;
        }
        self.count_generation = generation;
        self.video_count = Some(count);
        self.dirty = true;
        true
    }
}

fn running_text(task: &str) -> String {
    format!("{task} crawling...")
}
