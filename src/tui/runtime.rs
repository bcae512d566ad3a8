//! TUI application state: both machines plus local view state.

use crate::account::Account;
use crate::concepts::{self, Concept, ConceptId};
use crate::config::ExplorerConfig;
use crate::machine::story::ChapterMeta;
use crate::machine::{Explorer, ExplorerEvent, ExplorerState, Machine, Story, StoryEvent, View};
use crate::tariff::{DecodedTariff, decode};

/// Which screen is shown. Local view state, not part of either machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dashboard,
    Story,
}

/// TUI application state.
pub struct App {
    /// Dashboard navigation machine.
    pub explorer: Machine<Explorer>,
    /// Story progression machine.
    pub story: Machine<Story>,
    /// Account shown on the dashboard.
    pub account: Account,
    /// Tariff code shown by the decoder.
    pub tariff_code: String,
    /// `None` when the tariff code does not decode.
    pub decoded: Option<DecodedTariff>,
    pub mode: Mode,
    /// Index into the active concept's related list.
    pub related_idx: usize,
    /// Index into the current chapter's topics.
    pub topic_idx: usize,
    /// One-line feedback for the footer.
    pub status: Option<String>,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates a new app from a validated configuration.
    pub fn new(cfg: &ExplorerConfig) -> Self {
        let account = Account::mock(&cfg.account);
        let tariff_code = cfg.ui.resolve_tariff_code(&account);
        let decoded = decode(&tariff_code);
        let mode = if cfg.ui.start_mode == "story" {
            Mode::Story
        } else {
            Mode::Dashboard
        };
        Self {
            explorer: Machine::new(),
            story: Machine::new(),
            account,
            tariff_code,
            decoded,
            mode,
            related_idx: 0,
            topic_idx: 0,
            status: None,
            quit: false,
        }
    }

    /// Sends an event to the navigation machine.
    pub fn dispatch(&mut self, event: ExplorerEvent) {
        let label = format!("{event:?}");
        let before = self.explorer.context().active_concept;
        if self.explorer.send(event) {
            self.status = None;
        } else {
            self.status = Some(format!("{label} ignored"));
        }
        if self.explorer.context().active_concept != before {
            self.related_idx = 0;
        }
    }

    /// Sends an event to the story machine.
    pub fn dispatch_story(&mut self, event: StoryEvent) {
        let unchanged = match &event {
            StoryEvent::ExploreConcept(topic)
                if self.story.context().explored_concepts.contains(topic) =>
            {
                format!("{topic} already explored")
            }
            other => format!("{other:?} ignored"),
        };
        let before = self.story.context().current_chapter;
        if self.story.send(event) {
            self.status = None;
        } else {
            self.status = Some(unchanged);
        }
        if self.story.context().current_chapter != before {
            self.topic_idx = 0;
        }
    }

    /// Switches between dashboard and story mode.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Dashboard => Mode::Story,
            Mode::Story => Mode::Dashboard,
        };
        self.status = None;
    }

    /// Toggles the top-level dashboard view.
    pub fn toggle_view(&mut self) {
        let target = match self.explorer.context().current_view {
            View::Dashboard => View::SchemaMap,
            View::SchemaMap => View::Dashboard,
        };
        self.dispatch(ExplorerEvent::SwitchView(target));
    }

    /// Concept shown in the side panel, if any.
    pub fn active_concept(&self) -> Option<&'static Concept> {
        self.explorer
            .context()
            .active_concept
            .map(concepts::concept)
    }

    /// Related concept currently highlighted in the panel.
    pub fn selected_related(&self) -> Option<ConceptId> {
        let related = self.active_concept()?.related;
        related
            .get(self.related_idx % related.len().max(1))
            .copied()
    }

    /// Moves the related-concept highlight to the next entry.
    pub fn cycle_related(&mut self) {
        if let Some(concept) = self.active_concept() {
            self.related_idx = (self.related_idx + 1) % concept.related.len().max(1);
        }
    }

    /// Follows the highlighted related-concept link.
    pub fn follow_related(&mut self) {
        if let Some(id) = self.selected_related() {
            self.dispatch(ExplorerEvent::NavigateToConcept(id));
        }
    }

    /// Closes whichever overlay is open.
    pub fn close_overlay(&mut self) {
        self.dispatch(ExplorerEvent::ClosePanel);
    }

    /// Returns `true` while the decoder overlay is open.
    pub fn is_decoding(&self) -> bool {
        self.explorer.matches(ExplorerState::DecodingTariff)
    }

    /// Metadata of the current story chapter.
    pub fn chapter(&self) -> ChapterMeta {
        self.story.context().current_chapter.meta()
    }

    /// Topic currently highlighted in the chapter.
    pub fn selected_topic(&self) -> Option<&'static str> {
        let topics = self.chapter().topics;
        topics.get(self.topic_idx % topics.len().max(1)).copied()
    }

    pub fn cycle_topic(&mut self) {
        let len = self.chapter().topics.len().max(1);
        self.topic_idx = (self.topic_idx + 1) % len;
    }

    /// Marks the highlighted topic as explored.
    pub fn explore_selected_topic(&mut self) {
        if let Some(topic) = self.selected_topic() {
            self.dispatch_story(StoryEvent::ExploreConcept(topic.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::ChapterId;

    fn app() -> App {
        App::new(&ExplorerConfig::default())
    }

    #[test]
    fn app_starts_on_dashboard_with_decoded_tariff() {
        let app = app();
        assert_eq!(app.mode, Mode::Dashboard);
        assert!(app.explorer.matches(ExplorerState::Dashboard));
        assert_eq!(app.tariff_code, "E-1R-AGILE-FLEX-22-11-25-C");
        assert!(app.decoded.is_some());
    }

    #[test]
    fn start_mode_story_is_honoured() {
        let mut cfg = ExplorerConfig::default();
        cfg.ui.start_mode = "story".to_string();
        assert_eq!(App::new(&cfg).mode, Mode::Story);
    }

    #[test]
    fn related_links_cycle_and_follow() {
        let mut app = app();
        app.dispatch(ExplorerEvent::OpenConcept(ConceptId::Mpan));
        assert_eq!(app.selected_related(), Some(ConceptId::Meter));
        app.cycle_related();
        assert_eq!(app.selected_related(), Some(ConceptId::GspRegion));
        app.follow_related();
        assert_eq!(
            app.explorer.context().active_concept,
            Some(ConceptId::GspRegion)
        );
        assert_eq!(app.related_idx, 0);
        assert_eq!(app.explorer.context().visited_concepts.len(), 2);
    }

    #[test]
    fn ignored_events_set_status() {
        let mut app = app();
        app.close_overlay();
        assert!(app.status.as_deref().is_some_and(|s| s.contains("ignored")));
        app.dispatch(ExplorerEvent::DecodeTariff);
        assert!(app.status.is_none());
        assert!(app.is_decoding());
    }

    #[test]
    fn toggle_view_round_trips() {
        let mut app = app();
        app.toggle_view();
        assert!(app.explorer.matches(ExplorerState::SchemaMap));
        app.toggle_view();
        assert!(app.explorer.matches(ExplorerState::Dashboard));
    }

    #[test]
    fn exploring_topics_records_concepts() {
        let mut app = app();
        app.toggle_mode();
        assert_eq!(app.selected_topic(), None);
        app.dispatch_story(StoryEvent::NextChapter);
        assert_eq!(app.chapter().id, ChapterId::FirstBill);
        app.explore_selected_topic();
        app.cycle_topic();
        app.explore_selected_topic();
        let explored = &app.story.context().explored_concepts;
        assert!(explored.contains("standingCharge"));
        assert!(explored.contains("unitRate"));
    }

    #[test]
    fn re_exploring_a_topic_reports_already_explored() {
        let mut app = app();
        app.dispatch_story(StoryEvent::NextChapter);
        app.explore_selected_topic();
        assert!(app.status.is_none());

        app.explore_selected_topic();
        assert_eq!(
            app.status.as_deref(),
            Some("standingCharge already explored")
        );

        app.dispatch_story(StoryEvent::PreviousChapter);
        app.dispatch_story(StoryEvent::PreviousChapter);
        let status = app.status.as_deref().unwrap_or_default();
        assert_eq!(status, "PreviousChapter ignored");
    }
}
