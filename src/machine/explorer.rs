//! Dashboard navigation: which overlay is open and which concepts were visited.

use std::collections::BTreeSet;

use serde::Serialize;

use super::StateMachine;
use crate::concepts::ConceptId;

/// Top-level view of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Dashboard,
    SchemaMap,
}

/// Discrete navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExplorerState {
    Dashboard,
    ViewingConcept,
    DecodingTariff,
    SchemaMap,
}

/// Navigation context read by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationContext {
    /// Concept shown in the side panel; set only in `ViewingConcept`.
    pub active_concept: Option<ConceptId>,
    /// Every concept ever opened. Never shrinks.
    pub visited_concepts: BTreeSet<ConceptId>,
    pub current_view: View,
}

/// User intents accepted by the navigation machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerEvent {
    OpenConcept(ConceptId),
    ClosePanel,
    DecodeTariff,
    /// Follow a related-concept link while the panel is open.
    NavigateToConcept(ConceptId),
    SwitchView(View),
}

/// Navigation machine definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Explorer;

impl StateMachine for Explorer {
    type State = ExplorerState;
    type Context = NavigationContext;
    type Event = ExplorerEvent;

    fn initial() -> (ExplorerState, NavigationContext) {
        (ExplorerState::Dashboard, NavigationContext::default())
    }

    /// Pairs not listed below leave state and context untouched.
    ///
    /// `OpenConcept` is only accepted from the dashboard, the concept panel
    /// and the decoder. On the schema map it is ignored, so the map has to
    /// be left with `SwitchView(Dashboard)` before a concept can be opened.
    fn transition(
        state: ExplorerState,
        context: NavigationContext,
        event: ExplorerEvent,
    ) -> (ExplorerState, NavigationContext) {
        use ExplorerEvent as E;
        use ExplorerState as S;

        match (state, event) {
            (S::Dashboard | S::ViewingConcept | S::DecodingTariff, E::OpenConcept(id))
            | (S::ViewingConcept, E::NavigateToConcept(id)) => {
                (S::ViewingConcept, show_concept(context, id))
            }
            (S::ViewingConcept | S::DecodingTariff, E::ClosePanel) => {
                (S::Dashboard, clear_active_concept(context))
            }
            (S::Dashboard | S::ViewingConcept, E::DecodeTariff) => {
                (S::DecodingTariff, clear_active_concept(context))
            }
            (S::Dashboard, E::SwitchView(View::SchemaMap)) => {
                (S::SchemaMap, set_view(context, View::SchemaMap))
            }
            (S::SchemaMap, E::SwitchView(View::Dashboard)) => {
                (S::Dashboard, set_view(context, View::Dashboard))
            }
            (state, _) => (state, context),
        }
    }
}

/// Makes `id` the active concept and records the visit.
fn show_concept(mut context: NavigationContext, id: ConceptId) -> NavigationContext {
    context.active_concept = Some(id);
    context.visited_concepts.insert(id);
    context
}

fn clear_active_concept(mut context: NavigationContext) -> NavigationContext {
    context.active_concept = None;
    context
}

fn set_view(mut context: NavigationContext, view: View) -> NavigationContext {
    context.current_view = view;
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;

    fn explorer() -> Machine<Explorer> {
        Machine::new()
    }

    #[test]
    fn starts_on_dashboard_with_empty_context() {
        let m = explorer();
        assert_eq!(m.state(), ExplorerState::Dashboard);
        assert_eq!(m.context().active_concept, None);
        assert!(m.context().visited_concepts.is_empty());
        assert_eq!(m.context().current_view, View::Dashboard);
    }

    #[test]
    fn open_concept_sets_active_and_visited() {
        let mut m = explorer();
        m.send(ExplorerEvent::OpenConcept(ConceptId::Balance));
        assert_eq!(m.state(), ExplorerState::ViewingConcept);
        assert_eq!(m.context().active_concept, Some(ConceptId::Balance));
        assert!(m.context().visited_concepts.contains(&ConceptId::Balance));
    }

    #[test]
    fn navigate_to_concept_is_a_self_transition() {
        let mut m = explorer();
        m.send(ExplorerEvent::OpenConcept(ConceptId::Mpan));
        m.send(ExplorerEvent::NavigateToConcept(ConceptId::GspRegion));
        assert_eq!(m.state(), ExplorerState::ViewingConcept);
        assert_eq!(m.context().active_concept, Some(ConceptId::GspRegion));
        assert_eq!(m.context().visited_concepts.len(), 2);
    }

    #[test]
    fn revisiting_updates_active_but_not_visited() {
        let mut m = explorer();
        m.send(ExplorerEvent::OpenConcept(ConceptId::Mpan));
        m.send(ExplorerEvent::NavigateToConcept(ConceptId::Meter));
        m.send(ExplorerEvent::NavigateToConcept(ConceptId::Mpan));
        assert_eq!(m.context().active_concept, Some(ConceptId::Mpan));
        assert_eq!(m.context().visited_concepts.len(), 2);
    }

    #[test]
    fn close_panel_clears_active_concept() {
        let mut m = explorer();
        m.send(ExplorerEvent::OpenConcept(ConceptId::Mprn));
        assert!(m.send(ExplorerEvent::ClosePanel));
        assert_eq!(m.state(), ExplorerState::Dashboard);
        assert_eq!(m.context().active_concept, None);
        assert!(m.context().visited_concepts.contains(&ConceptId::Mprn));
    }

    #[test]
    fn decoder_opens_from_dashboard_and_panel_and_closes_to_dashboard() {
        let mut m = explorer();
        assert!(m.send(ExplorerEvent::DecodeTariff));
        assert_eq!(m.state(), ExplorerState::DecodingTariff);
        m.send(ExplorerEvent::ClosePanel);
        assert_eq!(m.state(), ExplorerState::Dashboard);

        m.send(ExplorerEvent::OpenConcept(ConceptId::TariffCode));
        m.send(ExplorerEvent::DecodeTariff);
        assert_eq!(m.state(), ExplorerState::DecodingTariff);
        assert_eq!(m.context().active_concept, None);
    }

    #[test]
    fn decoder_can_hand_off_to_concept_panel() {
        let mut m = explorer();
        m.send(ExplorerEvent::DecodeTariff);
        m.send(ExplorerEvent::OpenConcept(ConceptId::TariffCode));
        assert_eq!(m.state(), ExplorerState::ViewingConcept);
        assert_eq!(m.context().active_concept, Some(ConceptId::TariffCode));
    }

    #[test]
    fn switch_view_toggles_between_dashboard_and_schema_map() {
        let mut m = explorer();
        assert!(m.send(ExplorerEvent::SwitchView(View::SchemaMap)));
        assert_eq!(m.state(), ExplorerState::SchemaMap);
        assert_eq!(m.context().current_view, View::SchemaMap);

        assert!(m.send(ExplorerEvent::SwitchView(View::Dashboard)));
        assert_eq!(m.state(), ExplorerState::Dashboard);
        assert_eq!(m.context().current_view, View::Dashboard);
    }

    #[test]
    fn concepts_open_only_after_leaving_schema_map() {
        let mut m = explorer();
        m.send(ExplorerEvent::SwitchView(View::SchemaMap));
        assert!(!m.send(ExplorerEvent::OpenConcept(ConceptId::Balance)));
        assert_eq!(m.context().active_concept, None);

        assert!(m.send(ExplorerEvent::SwitchView(View::Dashboard)));
        assert!(m.send(ExplorerEvent::OpenConcept(ConceptId::Balance)));
        assert_eq!(m.state(), ExplorerState::ViewingConcept);
        assert_eq!(m.context().active_concept, Some(ConceptId::Balance));
        assert_eq!(m.context().current_view, View::Dashboard);
    }

    #[test]
    fn undefined_transitions_are_ignored() {
        let mut m = explorer();
        assert!(!m.send(ExplorerEvent::ClosePanel));
        assert!(!m.send(ExplorerEvent::NavigateToConcept(ConceptId::Mpan)));
        assert!(!m.send(ExplorerEvent::SwitchView(View::Dashboard)));
        assert_eq!(m.state(), ExplorerState::Dashboard);
        assert!(m.context().visited_concepts.is_empty());

        m.send(ExplorerEvent::SwitchView(View::SchemaMap));
        let before = m.context().clone();
        assert!(!m.send(ExplorerEvent::OpenConcept(ConceptId::Mpan)));
        assert!(!m.send(ExplorerEvent::DecodeTariff));
        assert!(!m.send(ExplorerEvent::ClosePanel));
        assert_eq!(m.state(), ExplorerState::SchemaMap);
        assert_eq!(m.context(), &before);

        let mut m = explorer();
        m.send(ExplorerEvent::DecodeTariff);
        assert!(!m.send(ExplorerEvent::DecodeTariff));
        assert!(!m.send(ExplorerEvent::NavigateToConcept(ConceptId::Mpan)));
        assert!(!m.send(ExplorerEvent::SwitchView(View::SchemaMap)));
        assert_eq!(m.state(), ExplorerState::DecodingTariff);
    }

    #[test]
    fn visited_set_only_grows() {
        let events = [
            ExplorerEvent::OpenConcept(ConceptId::Mpan),
            ExplorerEvent::NavigateToConcept(ConceptId::Meter),
            ExplorerEvent::ClosePanel,
            ExplorerEvent::DecodeTariff,
            ExplorerEvent::OpenConcept(ConceptId::TariffCode),
            ExplorerEvent::NavigateToConcept(ConceptId::Mpan),
            ExplorerEvent::ClosePanel,
            ExplorerEvent::SwitchView(View::SchemaMap),
            ExplorerEvent::SwitchView(View::Dashboard),
        ];
        let mut m = explorer();
        let mut previous = BTreeSet::new();
        for event in events {
            m.send(event);
            let visited = &m.context().visited_concepts;
            assert!(visited.is_superset(&previous));
            previous = visited.clone();
        }
        assert_eq!(previous.len(), 3);
    }

    #[test]
    fn active_concept_only_set_while_viewing() {
        let events = [
            ExplorerEvent::OpenConcept(ConceptId::Balance),
            ExplorerEvent::DecodeTariff,
            ExplorerEvent::OpenConcept(ConceptId::UnitRate),
            ExplorerEvent::ClosePanel,
            ExplorerEvent::SwitchView(View::SchemaMap),
        ];
        let mut m = explorer();
        for event in events {
            m.send(event);
            let viewing = m.matches(ExplorerState::ViewingConcept);
            assert_eq!(m.context().active_concept.is_some(), viewing);
        }
    }
}
