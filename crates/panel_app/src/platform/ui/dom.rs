use std::collections::BTreeMap;

use super::constants::ElementId;

/// One mutation of an element hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomCommand {
    SetText { id: ElementId, text: String },
    SetInnerHtml { id: ElementId, html: String },
    SetEnabled { id: ElementId, enabled: bool },
    SetHidden { id: ElementId, hidden: bool },
    SetClass { id: ElementId, class: String },
}

impl DomCommand {
    pub fn id(&self) -> ElementId {
        match self {
            DomCommand::SetText { id, .. }
            | DomCommand::SetInnerHtml { id, .. }
            | DomCommand::SetEnabled { id, .. }
            | DomCommand::SetHidden { id, .. }
            | DomCommand::SetClass { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    pub text: String,
    pub inner_html: String,
    pub enabled: bool,
    pub hidden: bool,
    pub class: String,
}

impl Default for DomElement {
    fn default() -> Self {
        Self {
            text: String::new(),
            inner_html: String::new(),
            enabled: true,
            hidden: false,
            class: String::new(),
        }
    }
}

/// In-memory stand-in for the page, keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct DomDocument {
    elements: BTreeMap<ElementId, DomElement>,
}

impl DomDocument {
    pub fn new(ids: &[ElementId]) -> Self {
        Self {
            elements: ids.iter().map(|id| (*id, DomElement::default())).collect(),
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Applies the commands and returns the ids whose content changed.
    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = DomCommand>) -> Vec<ElementId> {
        let mut changed = Vec::new();
        for command in commands {
            let id = command.id();
            if self.apply(command) && !changed.contains(&id) {
                changed.push(id);
            }
        }
        changed
    }

    /// Returns false for unknown ids and for writes that change nothing.
    pub fn apply(&mut self, command: DomCommand) -> bool {
        let Some(element) = self.elements.get_mut(command.id()) else {
            return false;
        };
        match command {
            DomCommand::SetText { text, .. } => replace(&mut element.text, text),
            DomCommand::SetInnerHtml { html, .. } => replace(&mut element.inner_html, html),
            DomCommand::SetEnabled { enabled, .. } => replace(&mut element.enabled, enabled),
            DomCommand::SetHidden { hidden, .. } => replace(&mut element.hidden, hidden),
            DomCommand::SetClass { class, .. } => replace(&mut element.class, class),
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ui::constants::{BUTTON_START, STATUS_TEXT};

    #[test]
    fn apply_reports_only_real_changes() {
        let mut doc = DomDocument::new(&[BUTTON_START, STATUS_TEXT]);

        let changed = doc.apply_all([
            DomCommand::SetEnabled {
                id: BUTTON_START,
                enabled: true,
            },
            DomCommand::SetText {
                id: STATUS_TEXT,
                text: "Ready".to_string(),
            },
            DomCommand::SetText {
                id: "missing",
                text: "x".to_string(),
            },
        ]);

        assert_eq!(changed, vec![STATUS_TEXT]);
        assert_eq!(doc.element(STATUS_TEXT).unwrap().text, "Ready");
    }
}
