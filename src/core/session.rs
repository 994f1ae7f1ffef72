//! Browsing session: the grid/detail navigation state machine and the topic
//! cards of the currently visible unit.
//!
//! ```text
//! Grid --select(unit)--> Detail(unit) --back--> Grid
//! ```
//!
//! Topic cards belong to the unit on screen. They are created the first time a
//! topic is rendered or acted on, and dropped whenever the detail view changes.

use std::collections::BTreeMap;
use std::time::Instant;

use thiserror::Error;

use super::card::{CompletionOutcome, LoadOutcome, LoadPolicy, LoadTicket, TopicCard};
use super::locator::ResourceLocator;
use crate::adapters::{ActivitySink, OpenError, Opener};
use crate::domain::{Curriculum, ResourceActivated, ResourceKind, Unit};

/// Invalid navigation inputs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("A unit can only be selected from the grid view")]
    NotInGrid,

    #[error("No unit is open")]
    NotInDetail,

    #[error("Unit {0} not found")]
    UnknownUnit(u32),

    #[error("Topic {0} not found in the open unit")]
    UnknownTopic(usize),
}

/// Errors from session actions that may touch the platform
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Open(#[from] OpenError),
}

/// Which view is visible
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavigationState {
    /// Overview of all units
    #[default]
    Grid,

    /// Topics of one unit
    Detail(Unit),
}

/// In-memory browsing session over a loaded curriculum
pub struct Session {
    curriculum: Curriculum,
    locator: ResourceLocator,
    policy: LoadPolicy,
    state: NavigationState,
    cards: BTreeMap<usize, TopicCard>,
    next_request_id: u64,
    sink: Box<dyn ActivitySink>,
    opener: Box<dyn Opener>,
}

impl Session {
    /// Create a session in the grid view
    pub fn new(
        curriculum: Curriculum,
        locator: ResourceLocator,
        sink: Box<dyn ActivitySink>,
        opener: Box<dyn Opener>,
    ) -> Self {
        Self {
            curriculum,
            locator,
            policy: LoadPolicy::default(),
            state: NavigationState::Grid,
            cards: BTreeMap::new(),
            next_request_id: 1,
            sink,
            opener,
        }
    }

    /// Override the load policy
    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn locator(&self) -> &ResourceLocator {
        &self.locator
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// The open unit, if the detail view is visible
    pub fn selected_unit(&self) -> Option<&Unit> {
        match &self.state {
            NavigationState::Grid => None,
            NavigationState::Detail(unit) => Some(unit),
        }
    }

    /// Open a unit from the grid view
    pub fn select(&mut self, unit_number: u32) -> Result<&Unit, NavigationError> {
        if !matches!(self.state, NavigationState::Grid) {
            return Err(NavigationError::NotInGrid);
        }

        let unit = self
            .curriculum
            .unit(unit_number)
            .cloned()
            .ok_or(NavigationError::UnknownUnit(unit_number))?;

        tracing::debug!(unit = unit.unit_number, title = %unit.unit_title, "Entering unit detail");
        self.cards.clear();
        self.state = NavigationState::Detail(unit);
        self.selected_unit().ok_or(NavigationError::NotInDetail)
    }

    /// Return to the grid view, tearing down all topic cards
    pub fn back(&mut self) -> Result<(), NavigationError> {
        if matches!(self.state, NavigationState::Grid) {
            return Err(NavigationError::NotInDetail);
        }

        tracing::debug!(cards = self.cards.len(), "Returning to unit grid");
        self.cards.clear();
        self.state = NavigationState::Grid;
        Ok(())
    }

    /// Card for a topic, if it has been rendered
    pub fn card(&self, topic_index: usize) -> Option<&TopicCard> {
        self.cards.get(&topic_index)
    }

    /// Cards created so far, in topic order
    pub fn cards(&self) -> impl Iterator<Item = &TopicCard> {
        self.cards.values()
    }

    /// Render a topic card, creating it on first use
    pub fn render_card(&mut self, topic_index: usize) -> Result<&TopicCard, NavigationError> {
        self.card_entry(topic_index).map(|card| &*card)
    }

    fn card_entry(&mut self, topic_index: usize) -> Result<&mut TopicCard, NavigationError> {
        let NavigationState::Detail(unit) = &self.state else {
            return Err(NavigationError::NotInDetail);
        };

        let topic = unit
            .topics
            .get(topic_index)
            .ok_or(NavigationError::UnknownTopic(topic_index))?;

        let card = self.cards.entry(topic_index).or_insert_with(|| {
            TopicCard::new(unit.unit_number, unit.unit_title.clone(), topic_index, topic.clone())
        });
        Ok(card)
    }

    /// Activate a resource tab on a topic card
    ///
    /// The returned ticket must accompany the load's completion.
    pub fn activate(
        &mut self,
        topic_index: usize,
        kind: ResourceKind,
    ) -> Result<LoadTicket, NavigationError> {
        self.activate_at(topic_index, kind, Instant::now())
    }

    /// Activate with an explicit clock reading
    pub fn activate_at(
        &mut self,
        topic_index: usize,
        kind: ResourceKind,
        now: Instant,
    ) -> Result<LoadTicket, NavigationError> {
        let request_id = self.next_request_id;
        let locator = self.locator.clone();

        let card = self.card_entry(topic_index)?;
        let ticket = card.activate(kind, &locator, request_id, now);
        let event = ResourceActivated::new(card.unit_title(), card.topic(), kind, request_id);

        self.next_request_id += 1;
        self.sink.resource_activated(&event);
        Ok(ticket)
    }

    /// Deliver a load completion
    ///
    /// Completions for cards that no longer exist, or whose request has been
    /// superseded, are discarded.
    pub fn complete(&mut self, ticket: &LoadTicket, outcome: LoadOutcome) -> CompletionOutcome {
        let on_screen = self
            .selected_unit()
            .is_some_and(|u| u.unit_number == ticket.unit_number);

        match self.cards.get_mut(&ticket.topic_index) {
            Some(card) if on_screen => card.complete(ticket, outcome),
            _ => {
                tracing::warn!(
                    unit = ticket.unit_number,
                    topic_index = ticket.topic_index,
                    request_id = ticket.request_id,
                    "Discarding completion for a card that is no longer shown"
                );
                CompletionOutcome::Stale
            }
        }
    }

    /// Expand or collapse a topic card
    pub fn toggle_expanded(&mut self, topic_index: usize) -> Result<bool, NavigationError> {
        Ok(self.card_entry(topic_index)?.toggle_expanded())
    }

    /// Fail every load pending longer than the policy timeout
    ///
    /// Returns the number of cards that timed out.
    pub fn expire_stale_loads(&mut self, now: Instant) -> usize {
        let timeout = self.policy.timeout;
        self.cards
            .values_mut()
            .filter_map(|card| card.expire(now, timeout).then_some(()))
            .count()
    }

    /// Reopen the active document of a card in a new browsing context
    pub fn reopen_in_new_tab(&self, topic_index: usize) -> Result<(), SessionError> {
        let card = self.existing_card(topic_index)?;
        card.reopen_in_new_tab(self.opener.as_ref())?;
        Ok(())
    }

    /// Open the active resource of a ready card outside the inline viewer
    pub fn launch(&self, topic_index: usize) -> Result<(), SessionError> {
        let card = self.existing_card(topic_index)?;
        let src = card.current_src().ok_or(OpenError::NothingToOpen)?;
        self.opener.open(src)?;
        Ok(())
    }

    /// Open a topic's question set directly in a new browsing context
    ///
    /// Does not create or change any card. A blocked popup is returned as
    /// [`OpenError::PopupBlocked`].
    pub fn open_questions_externally(&self, topic_index: usize) -> Result<String, SessionError> {
        let unit = self.selected_unit().ok_or(NavigationError::NotInDetail)?;
        let topic = unit
            .topics
            .get(topic_index)
            .ok_or(NavigationError::UnknownTopic(topic_index))?;

        let url = self
            .locator
            .locate(&unit.unit_title, topic, ResourceKind::Questions);
        self.opener.open(&url)?;
        Ok(url)
    }

    /// User-facing message for a failed card
    pub fn diagnostic(&self, topic_index: usize) -> Option<String> {
        self.card(topic_index).and_then(TopicCard::diagnostic)
    }

    fn existing_card(&self, topic_index: usize) -> Result<&TopicCard, NavigationError> {
        if self.selected_unit().is_none() {
            return Err(NavigationError::NotInDetail);
        }
        self.card(topic_index)
            .ok_or(NavigationError::UnknownTopic(topic_index))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::core::card::LoadState;

    #[derive(Clone, Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<ResourceActivated>>>,
    }

    impl ActivitySink for Recorder {
        fn resource_activated(&self, event: &ResourceActivated) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    struct BlockedOpener;

    impl Opener for BlockedOpener {
        fn open(&self, url: &str) -> Result<(), OpenError> {
            Err(OpenError::PopupBlocked {
                url: url.to_string(),
                reason: "blocked by test".to_string(),
            })
        }
    }

    fn curriculum() -> Curriculum {
        Curriculum {
            subject: "ICT".to_string(),
            grade: "12".to_string(),
            units: vec![
                Unit {
                    unit_number: 1,
                    unit_title: "Intro to Databases".to_string(),
                    periods: 6,
                    topics: vec!["ER Modeling".to_string(), "Normalisation".to_string()],
                },
                Unit {
                    unit_number: 2,
                    unit_title: "Networks".to_string(),
                    periods: 4,
                    topics: vec!["OSI Model".to_string()],
                },
            ],
        }
    }

    fn session() -> (Session, Recorder) {
        let recorder = Recorder::default();
        let session = Session::new(
            curriculum(),
            ResourceLocator::new("https://assets.test"),
            Box::new(recorder.clone()),
            Box::new(BlockedOpener),
        );
        (session, recorder)
    }

    #[test]
    fn test_select_and_back() {
        let (mut session, _) = session();
        assert_eq!(session.state(), &NavigationState::Grid);

        let unit = session.select(2).unwrap();
        assert_eq!(unit.unit_title, "Networks");
        assert_eq!(session.selected_unit().map(|u| u.unit_number), Some(2));

        session.back().unwrap();
        assert_eq!(session.state(), &NavigationState::Grid);
    }

    #[test]
    fn test_select_rejected_outside_grid() {
        let (mut session, _) = session();
        session.select(1).unwrap();

        assert_eq!(session.select(2), Err(NavigationError::NotInGrid));
        assert_eq!(session.selected_unit().map(|u| u.unit_number), Some(1));
    }

    #[test]
    fn test_unknown_unit() {
        let (mut session, _) = session();
        assert_eq!(session.select(9), Err(NavigationError::UnknownUnit(9)));
        assert_eq!(session.state(), &NavigationState::Grid);
    }

    #[test]
    fn test_cards_do_not_leak_across_units() {
        let (mut session, _) = session();
        session.select(1).unwrap();
        session.activate(0, ResourceKind::Tutorial).unwrap();
        assert!(session.card(0).is_some());

        session.back().unwrap();
        session.select(2).unwrap();
        assert!(session.card(0).is_none());

        let card = session.render_card(0).unwrap();
        assert!(!card.is_expanded());
        assert_eq!(card.load_state(), &LoadState::Idle);
        assert_eq!(card.topic(), "OSI Model");
    }

    #[test]
    fn test_activate_notifies_sink() {
        let (mut session, recorder) = session();
        session.select(1).unwrap();
        let ticket = session.activate(1, ResourceKind::Questions).unwrap();

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].unit_title, "Intro to Databases");
        assert_eq!(events[0].topic, "Normalisation");
        assert_eq!(events[0].kind, ResourceKind::Questions);
        assert_eq!(events[0].request_id, ticket.request_id);
    }

    #[test]
    fn test_completion_after_unit_switch_is_stale() {
        let (mut session, _) = session();
        session.select(1).unwrap();
        let ticket = session.activate(0, ResourceKind::Video).unwrap();

        session.back().unwrap();
        session.select(1).unwrap();
        session.render_card(0).unwrap();

        assert_eq!(
            session.complete(&ticket, LoadOutcome::Loaded),
            CompletionOutcome::Stale
        );
        assert_eq!(session.card(0).unwrap().load_state(), &LoadState::Idle);
    }

    #[test]
    fn test_request_ids_are_monotonic() {
        let (mut session, _) = session();
        session.select(1).unwrap();
        let a = session.activate(0, ResourceKind::Video).unwrap();
        let b = session.activate(1, ResourceKind::Video).unwrap();
        let c = session.activate(0, ResourceKind::Tutorial).unwrap();

        assert!(a.request_id < b.request_id);
        assert!(b.request_id < c.request_id);
    }

    #[test]
    fn test_popup_blocked_is_surfaced() {
        let (mut session, _) = session();
        session.select(1).unwrap();

        let result = session.open_questions_externally(0);
        assert!(matches!(
            result,
            Err(SessionError::Open(OpenError::PopupBlocked { .. }))
        ));
        assert!(session.card(0).is_none());
    }

    #[test]
    fn test_actions_require_detail_view() {
        let (mut session, _) = session();
        assert_eq!(
            session.activate(0, ResourceKind::Video),
            Err(NavigationError::NotInDetail)
        );
        assert_eq!(session.back(), Err(NavigationError::NotInDetail));

        session.select(2).unwrap();
        assert_eq!(
            session.activate(5, ResourceKind::Video),
            Err(NavigationError::UnknownTopic(5))
        );
    }
}
