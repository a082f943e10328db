use super::error::{StateError, StateResult};
use super::{ToolEffect, ToolState, ToolTransition};
use crate::markup::MarkupType;
use crate::ui::{ToolbarButton, ToolbarState};
use crate::viewer::{MarkupViewer, ViewerHandle};

/// Plans the reaction to pressing the button of `selected` while in `current`.
///
/// Pressing the active tool again turns it off; pressing another tool switches.
pub fn plan_tool_selection(current: ToolState, selected: MarkupType) -> ToolTransition {
    use ToolEffect::*;
    let (to, effects) = match current {
        ToolState::Active(active) if active == selected => (
            ToolState::Idle,
            vec![Deactivate(active), ClearIndicator(active)],
        ),
        ToolState::Active(active) => (
            ToolState::Active(selected),
            vec![
                Deactivate(active),
                ClearIndicator(active),
                Activate(selected),
                SetIndicator(selected),
            ],
        ),
        ToolState::Idle => (
            ToolState::Active(selected),
            vec![Activate(selected), SetIndicator(selected)],
        ),
    };
    ToolTransition::new(current, selected, to, effects)
}

/// Drives tool switches against the viewer, which stays the authority on
/// which tool is active.
pub struct ToolActivation<V: MarkupViewer> {
    viewer: ViewerHandle<V>,
    transition_history: Vec<ToolTransition>,
}

impl<V: MarkupViewer> ToolActivation<V> {
    pub fn new(viewer: ViewerHandle<V>) -> Self {
        Self {
            viewer,
            transition_history: Vec::new(),
        }
    }

    pub fn active_tool(&self) -> Option<MarkupType> {
        self.viewer.borrow().active_markup_type()
    }

    pub fn state(&self) -> ToolState {
        ToolState::from_active(self.active_tool())
    }

    pub fn history(&self) -> &[ToolTransition] {
        &self.transition_history
    }

    pub fn select(
        &mut self,
        selected: MarkupType,
        toolbar: &mut ToolbarState,
    ) -> StateResult<ToolState> {
        let transition = plan_tool_selection(self.state(), selected);
        tracing::debug!(
            from = %transition.from,
            selected = %selected,
            to = %transition.to,
            "request tool transition"
        );

        for effect in &transition.effects {
            self.apply(*effect, toolbar);
        }

        let expected = transition.to;
        self.transition_history.push(transition);

        let reported = self.state();
        toolbar.show_active_tool(reported.active_tool());
        if reported != expected {
            tracing::warn!(%expected, %reported, "viewer disagrees with tool transition");
            return Err(StateError::ViewerOutOfSync { expected, reported });
        }
        Ok(reported)
    }

    /// Removes every markup; the active tool is left as it is.
    pub fn clear_markups(&self) {
        tracing::info!("clearing all markups");
        self.viewer.borrow_mut().clear_markups();
    }

    fn apply(&self, effect: ToolEffect, toolbar: &mut ToolbarState) {
        match effect {
            ToolEffect::Deactivate(markup_type) => {
                tracing::info!(tool = %markup_type, "deactivate markup tool");
                self.viewer.borrow_mut().deactivate_markup(markup_type);
            }
            ToolEffect::Activate(markup_type) => {
                tracing::info!(tool = %markup_type, "activate markup tool");
                self.viewer.borrow_mut().activate_markup(markup_type);
            }
            ToolEffect::ClearIndicator(markup_type) => {
                toolbar.set_indicator(ToolbarButton::Tool(markup_type), false);
            }
            ToolEffect::SetIndicator(markup_type) => {
                toolbar.set_indicator(ToolbarButton::Tool(markup_type), true);
            }
        }
    }
}

impl<V: MarkupViewer> std::fmt::Display for ToolActivation<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ToolState::{}", self.state())
    }
}
