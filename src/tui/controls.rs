//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::{App, Mode};
use crate::concepts::ConceptId;
use crate::machine::{ChapterId, ExplorerEvent, StoryEvent};

/// Dashboard hotkeys that open a concept panel.
pub const CONCEPT_KEYS: [(char, ConceptId); 11] = [
    ('a', ConceptId::AccountNumber),
    ('b', ConceptId::Balance),
    ('p', ConceptId::Property),
    ('e', ConceptId::Mpan),
    ('g', ConceptId::Mprn),
    ('k', ConceptId::Meter),
    ('i', ConceptId::TariffCode),
    ('r', ConceptId::GspRegion),
    ('c', ConceptId::Consumption),
    ('d', ConceptId::StandingCharge),
    ('u', ConceptId::UnitRate),
];

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Char('s') => app.toggle_mode(),
        _ => match app.mode {
            Mode::Dashboard => handle_dashboard_key(app, key.code),
            Mode::Story => handle_story_key(app, key.code),
        },
    }
}

fn handle_dashboard_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_overlay(),
        KeyCode::Char('t') => app.dispatch(ExplorerEvent::DecodeTariff),
        KeyCode::Char('m') => app.toggle_view(),
        KeyCode::Tab => app.cycle_related(),
        KeyCode::Enter => app.follow_related(),
        KeyCode::Char(ch) => {
            if let Some((_, id)) = CONCEPT_KEYS.iter().find(|(k, _)| *k == ch) {
                app.dispatch(ExplorerEvent::OpenConcept(*id));
            }
        }
        _ => {}
    }
}

fn handle_story_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Right | KeyCode::Char('n') => app.dispatch_story(StoryEvent::NextChapter),
        KeyCode::Left | KeyCode::Char('p') => app.dispatch_story(StoryEvent::PreviousChapter),
        KeyCode::Char(ch @ '1'..='7') => {
            let index = ch as usize - '1' as usize;
            if let Some(chapter) = ChapterId::from_index(index) {
                app.dispatch_story(StoryEvent::GoToChapter(chapter));
            }
        }
        KeyCode::Tab => app.cycle_topic(),
        KeyCode::Char('e') | KeyCode::Enter => app.explore_selected_topic(),
        KeyCode::Char('R') => app.dispatch_story(StoryEvent::ResetStory),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;
    use crate::machine::ExplorerState;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn concept_hotkeys_open_panel() {
        let mut app = App::new(&ExplorerConfig::default());
        press(&mut app, KeyCode::Char('e'));
        assert!(app.explorer.matches(ExplorerState::ViewingConcept));
        assert_eq!(app.explorer.context().active_concept, Some(ConceptId::Mpan));
        press(&mut app, KeyCode::Esc);
        assert!(app.explorer.matches(ExplorerState::Dashboard));
    }

    #[test]
    fn hotkeys_are_unique() {
        for (i, (key, _)) in CONCEPT_KEYS.iter().enumerate() {
            assert!(CONCEPT_KEYS[i + 1..].iter().all(|(k, _)| k != key));
            assert!(!"qstm".contains(*key), "'{key}' is reserved");
        }
    }

    #[test]
    fn story_keys_drive_chapters() {
        let mut app = App::new(&ExplorerConfig::default());
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.mode, Mode::Story);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.story.context().current_chapter, ChapterId::FirstBill);
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.story.context().current_chapter, ChapterId::FirstBill);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.story.context().current_chapter, ChapterId::FirstBill);
        assert!(
            app.story
                .context()
                .completed_chapters
                .contains(&ChapterId::FirstBill)
        );
        press(&mut app, KeyCode::Char('R'));
        assert_eq!(app.story.context().current_chapter, ChapterId::Intro);
        assert!(app.story.context().completed_chapters.is_empty());
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(&ExplorerConfig::default());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.quit);
    }
}
