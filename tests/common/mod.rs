//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use energy_explorer::account::Account;
use energy_explorer::config::ExplorerConfig;
use energy_explorer::machine::{ChapterId, Machine, Story, StoryEvent};

/// Tariff code on the fixture's electricity agreement.
pub const ELECTRICITY_TARIFF: &str = "E-1R-AGILE-FLEX-22-11-25-C";
/// Tariff code on the fixture's gas agreement.
pub const GAS_TARIFF: &str = "G-1R-SUPER-GREEN-24-01-01-C";

/// Built-in default configuration (seed 42).
pub fn default_config() -> ExplorerConfig {
    ExplorerConfig::default()
}

/// Mock account built from the default configuration.
pub fn default_account() -> Account {
    Account::mock(&default_config().account)
}

/// Story machine advanced with `NextChapter` until it reaches `chapter`.
///
/// Every chapter before `chapter` ends up completed.
pub fn story_at(chapter: ChapterId) -> Machine<Story> {
    let mut story = Machine::<Story>::new();
    for _ in 0..chapter.index() {
        story.send(StoryEvent::NextChapter);
    }
    story
}
