use super::constants::*;
use super::dom::{DomCommand, DomDocument};

/// Builds the document and labels the static controls.
pub fn initial_document() -> DomDocument {
    let mut document = DomDocument::new(&ALL_ELEMENTS);
    document.apply_all(initial_commands());
    document
}

pub fn initial_commands() -> Vec<DomCommand> {
    let mut commands = Vec::new();

    for (id, label) in [
        (BUTTON_START, "Start"),
        (BUTTON_STOP, "Stop"),
        (BUTTON_CLEAR, "Clear data"),
        (TAB_VIDEOS, "Videos"),
        (TAB_CREATORS, "Creators"),
    ] {
        commands.push(DomCommand::SetText {
            id,
            text: label.to_string(),
        });
    }

    commands.push(DomCommand::SetHidden {
        id: STATUS_PROGRESS,
        hidden: true,
    });

    commands
}
