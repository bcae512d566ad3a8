//! Guided story mode: a fixed sequence of chapters with guarded navigation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StateMachine;

/// Number of API concepts the story aims to cover.
pub const API_CONCEPT_GOAL: usize = 25;

/// Chapters of the story, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChapterId {
    Intro,
    FirstBill,
    UnderstandingTariff,
    MovingHome,
    SwitchingTariff,
    SavingSession,
    AgentView,
}

/// Display metadata for a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChapterMeta {
    pub id: ChapterId,
    /// 1-based chapter number.
    pub number: usize,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// API topics the chapter lets the reader explore.
    pub topics: &'static [&'static str],
}

impl ChapterId {
    /// All chapters in story order.
    pub const ALL: [ChapterId; 7] = [
        ChapterId::Intro,
        ChapterId::FirstBill,
        ChapterId::UnderstandingTariff,
        ChapterId::MovingHome,
        ChapterId::SwitchingTariff,
        ChapterId::SavingSession,
        ChapterId::AgentView,
    ];

    pub const FIRST: ChapterId = ChapterId::Intro;
    pub const LAST: ChapterId = ChapterId::AgentView;

    /// Zero-based position in the story.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The following chapter, or `None` on the last one.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding chapter, or `None` on the first one.
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::FirstBill => "firstBill",
            Self::UnderstandingTariff => "understandingTariff",
            Self::MovingHome => "movingHome",
            Self::SwitchingTariff => "switchingTariff",
            Self::SavingSession => "savingSession",
            Self::AgentView => "agentView",
        }
    }

    pub fn meta(self) -> ChapterMeta {
        let (title, subtitle) = match self {
            Self::Intro => ("Welcome", "Meet Sam & Obi"),
            Self::FirstBill => ("Your First Bill", "Understanding charges"),
            Self::UnderstandingTariff => ("Understanding Your Tariff", "Decode the code"),
            Self::MovingHome => ("Moving Home", "New property setup"),
            Self::SwitchingTariff => ("Switching Tariff", "Finding better rates"),
            Self::SavingSession => ("Saving Session", "Demand flexibility"),
            Self::AgentView => ("Agent View", "Behind the scenes"),
        };
        ChapterMeta {
            id: self,
            number: self.index() + 1,
            title,
            subtitle,
            topics: self.topics(),
        }
    }

    fn topics(self) -> &'static [&'static str] {
        match self {
            Self::FirstBill => &["standingCharge", "unitRate", "consumption", "tariffCode"],
            Self::UnderstandingTariff => &[
                "tariffCode",
                "fuelType",
                "rateType",
                "productCode",
                "launchDate",
                "gspRegion",
            ],
            // Later chapters are still a roadmap.
            _ => &[],
        }
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChapterId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown chapter \"{s}\""))
    }
}

/// The story has a single long-running state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StoryState {
    Playing,
}

/// Story progress read by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryContext {
    pub current_chapter: ChapterId,
    /// Chapters left behind with `NextChapter`.
    pub completed_chapters: BTreeSet<ChapterId>,
    pub explored_concepts: BTreeSet<String>,
    /// Recorded narrative choices. Nothing branches on these yet.
    pub choices: BTreeMap<String, String>,
}

impl Default for StoryContext {
    fn default() -> Self {
        Self {
            current_chapter: ChapterId::FIRST,
            completed_chapters: BTreeSet::new(),
            explored_concepts: BTreeSet::new(),
            choices: BTreeMap::new(),
        }
    }
}

/// User intents accepted by the story machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryEvent {
    NextChapter,
    PreviousChapter,
    GoToChapter(ChapterId),
    ExploreConcept(String),
    MakeChoice { key: String, value: String },
    ResetStory,
}

/// Story machine definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Story;

impl StateMachine for Story {
    type State = StoryState;
    type Context = StoryContext;
    type Event = StoryEvent;

    fn initial() -> (StoryState, StoryContext) {
        (StoryState::Playing, StoryContext::default())
    }

    fn transition(
        state: StoryState,
        mut context: StoryContext,
        event: StoryEvent,
    ) -> (StoryState, StoryContext) {
        match event {
            StoryEvent::NextChapter if can_go_next(&context) => {
                if let Some(next) = context.current_chapter.next() {
                    context.completed_chapters.insert(context.current_chapter);
                    context.current_chapter = next;
                }
            }
            StoryEvent::PreviousChapter if can_go_previous(&context) => {
                if let Some(previous) = context.current_chapter.previous() {
                    context.current_chapter = previous;
                }
            }
            StoryEvent::GoToChapter(target) if is_chapter_unlocked(&context, target) => {
                context.current_chapter = target;
            }
            StoryEvent::ExploreConcept(concept) => {
                context.explored_concepts.insert(concept);
            }
            StoryEvent::MakeChoice { key, value } => {
                context.choices.insert(key, value);
            }
            StoryEvent::ResetStory => context = StoryContext::default(),
            _ => {}
        }
        (state, context)
    }
}

/// Guard for `NextChapter`.
pub fn can_go_next(context: &StoryContext) -> bool {
    context.current_chapter.index() < ChapterId::LAST.index()
}

/// Guard for `PreviousChapter`.
pub fn can_go_previous(context: &StoryContext) -> bool {
    context.current_chapter.index() > 0
}

/// Guard for `GoToChapter`: any chapter up to one past the current one.
pub fn is_chapter_unlocked(context: &StoryContext, target: ChapterId) -> bool {
    target.index() <= context.current_chapter.index() + 1
}

/// How a chapter is drawn in the navigation strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChapterStatus {
    Done,
    Current,
    Locked,
}

pub fn chapter_status(context: &StoryContext, chapter: ChapterId) -> ChapterStatus {
    if chapter == context.current_chapter {
        ChapterStatus::Current
    } else if context.completed_chapters.contains(&chapter) {
        ChapterStatus::Done
    } else {
        ChapterStatus::Locked
    }
}

/// Completed chapters as a rounded percentage of the whole story.
pub fn progress_percent(context: &StoryContext) -> u8 {
    let done = context.completed_chapters.len() as f32;
    (done / ChapterId::ALL.len() as f32 * 100.0).round() as u8
}

/// Explored concepts against [`API_CONCEPT_GOAL`], as `(explored, goal)`.
pub fn api_progress(context: &StoryContext) -> (usize, usize) {
    (context.explored_concepts.len(), API_CONCEPT_GOAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;

    fn story_at(chapter: ChapterId) -> Machine<Story> {
        let mut m = Machine::<Story>::new();
        for _ in 0..chapter.index() {
            m.send(StoryEvent::NextChapter);
        }
        assert_eq!(m.context().current_chapter, chapter);
        m
    }

    #[test]
    fn chapter_order_is_fixed() {
        for (i, chapter) in ChapterId::ALL.into_iter().enumerate() {
            assert_eq!(chapter.index(), i);
            assert_eq!(chapter.meta().number, i + 1);
            assert_eq!(chapter.as_str().parse::<ChapterId>(), Ok(chapter));
        }
        assert_eq!(ChapterId::Intro.previous(), None);
        assert_eq!(ChapterId::AgentView.next(), None);
        assert_eq!(ChapterId::Intro.next(), Some(ChapterId::FirstBill));
    }

    #[test]
    fn next_chapter_marks_previous_completed() {
        let mut m = story_at(ChapterId::Intro);
        assert!(m.send(StoryEvent::NextChapter));
        assert_eq!(m.context().current_chapter, ChapterId::FirstBill);
        assert!(m.context().completed_chapters.contains(&ChapterId::Intro));
    }

    #[test]
    fn previous_from_first_chapter_is_blocked() {
        let mut m = story_at(ChapterId::Intro);
        assert!(!m.send(StoryEvent::PreviousChapter));
        assert_eq!(m.context().current_chapter, ChapterId::Intro);
    }

    #[test]
    fn next_from_last_chapter_is_blocked() {
        let mut m = story_at(ChapterId::AgentView);
        let before = m.context().clone();
        assert!(!m.send(StoryEvent::NextChapter));
        assert_eq!(m.context(), &before);
        assert!(
            !m.context()
                .completed_chapters
                .contains(&ChapterId::AgentView)
        );
    }

    #[test]
    fn previous_does_not_touch_completed() {
        let mut m = story_at(ChapterId::MovingHome);
        let completed = m.context().completed_chapters.clone();
        assert!(m.send(StoryEvent::PreviousChapter));
        assert_eq!(m.context().current_chapter, ChapterId::UnderstandingTariff);
        assert_eq!(m.context().completed_chapters, completed);
    }

    #[test]
    fn go_to_chapter_allows_one_step_ahead() {
        let mut m = story_at(ChapterId::Intro);
        assert!(m.send(StoryEvent::GoToChapter(ChapterId::FirstBill)));
        assert_eq!(m.context().current_chapter, ChapterId::FirstBill);
        assert!(m.context().completed_chapters.is_empty());
    }

    #[test]
    fn go_to_chapter_rejects_jumps_past_next() {
        let mut m = story_at(ChapterId::Intro);
        let before = m.context().clone();
        assert!(!m.send(StoryEvent::GoToChapter(ChapterId::SavingSession)));
        assert_eq!(m.context(), &before);
    }

    #[test]
    fn go_to_chapter_allows_going_back() {
        let mut m = story_at(ChapterId::SwitchingTariff);
        assert!(m.send(StoryEvent::GoToChapter(ChapterId::Intro)));
        assert_eq!(m.context().current_chapter, ChapterId::Intro);
        assert_eq!(m.context().completed_chapters.len(), 4);
    }

    #[test]
    fn explore_concept_is_idempotent() {
        let mut m = Machine::<Story>::new();
        assert!(m.send(StoryEvent::ExploreConcept("fuelType".into())));
        assert!(!m.send(StoryEvent::ExploreConcept("fuelType".into())));
        m.send(StoryEvent::ExploreConcept("rateType".into()));
        assert_eq!(api_progress(m.context()), (2, API_CONCEPT_GOAL));
    }

    #[test]
    fn make_choice_overwrites() {
        let mut m = Machine::<Story>::new();
        m.send(StoryEvent::MakeChoice {
            key: "supplier".into(),
            value: "stay".into(),
        });
        m.send(StoryEvent::MakeChoice {
            key: "supplier".into(),
            value: "switch".into(),
        });
        assert_eq!(m.context().choices.len(), 1);
        assert_eq!(
            m.context().choices.get("supplier").map(String::as_str),
            Some("switch")
        );
    }

    #[test]
    fn reset_restores_initial_context() {
        let mut m = story_at(ChapterId::SavingSession);
        m.send(StoryEvent::ExploreConcept("mpan".into()));
        m.send(StoryEvent::MakeChoice {
            key: "k".into(),
            value: "v".into(),
        });
        assert!(m.send(StoryEvent::ResetStory));
        assert_eq!(m.context(), &StoryContext::default());
        assert_eq!(m.state(), StoryState::Playing);
        assert!(!m.send(StoryEvent::ResetStory));
    }

    #[test]
    fn status_and_progress_follow_completion() {
        let mut m = story_at(ChapterId::UnderstandingTariff);
        m.send(StoryEvent::PreviousChapter);
        let ctx = m.context();
        assert_eq!(chapter_status(ctx, ChapterId::Intro), ChapterStatus::Done);
        assert_eq!(
            chapter_status(ctx, ChapterId::FirstBill),
            ChapterStatus::Current
        );
        // Reachable again, but never left with NextChapter.
        assert_eq!(
            chapter_status(ctx, ChapterId::UnderstandingTariff),
            ChapterStatus::Locked
        );
        assert!(is_chapter_unlocked(ctx, ChapterId::UnderstandingTariff));
        assert_eq!(
            chapter_status(ctx, ChapterId::MovingHome),
            ChapterStatus::Locked
        );
        assert!(!is_chapter_unlocked(ctx, ChapterId::MovingHome));
        // 2 of 7 chapters
        assert_eq!(progress_percent(ctx), 29);
    }

    #[test]
    fn full_walk_completes_all_but_last() {
        let m = story_at(ChapterId::AgentView);
        assert_eq!(m.context().completed_chapters.len(), 6);
        assert_eq!(progress_percent(m.context()), 86);
    }
}
