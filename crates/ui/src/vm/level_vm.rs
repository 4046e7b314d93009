use detective_core::model::LevelDefinition;

use super::markdown_vm::markdown_to_html;

/// Sidebar content for the level the player is on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelVm {
    pub part_heading: String,
    pub level_label: String,
    pub story_html: String,
}

#[must_use]
pub fn map_level(level: &LevelDefinition) -> LevelVm {
    LevelVm {
        part_heading: level.part().heading(),
        level_label: format!("Level {}", level.level()),
        story_html: markdown_to_html(level.story()),
    }
}
