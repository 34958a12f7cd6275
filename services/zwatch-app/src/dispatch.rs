//! Reactive host for the controller
//!
//! Owns the `AppState` signal. Each action is begun synchronously, handled on
//! a local task and applied when the service answers, so overlapping requests
//! never block each other. Deferred follow-ups go through `set_timeout`.
//!
//! Components read the state through the memos below rather than the whole
//! signal. A hover or a notice then leaves the forms and the cube grid alone.

use leptos::prelude::*;
use leptos::task::spawn_local;
use zwatch_core::controller::{Action, AppState, AuthTab, CheckPanel, Controller, Deferred, Notice};
use zwatch_core::timeline::{CubeRef, Rect, TimelineModel};

#[derive(Clone, Copy)]
pub struct Dispatcher {
    state: RwSignal<AppState>,
    controller: StoredValue<Controller>,
    tab: Memo<AuthTab>,
    check: Memo<CheckPanel>,
    timeline: Memo<TimelineModel>,
    auth_notice: Memo<Option<Notice>>,
}

impl Dispatcher {
    /// Restore the session and schedule whatever the controller asks for
    pub fn new(controller: Controller) -> Self {
        let (state, deferred) = controller.start();
        let state = RwSignal::new(state);
        let dispatcher = Self {
            state,
            controller: StoredValue::new(controller),
            tab: Memo::new(move |_| state.with(|s| s.tab)),
            check: Memo::new(move |_| state.with(|s| s.check.clone())),
            timeline: Memo::new(move |_| state.with(|s| s.timeline.clone())),
            auth_notice: Memo::new(move |_| state.with(|s| s.auth_notice().cloned())),
        };
        dispatcher.schedule(deferred);
        dispatcher
    }

    pub fn state(&self) -> RwSignal<AppState> {
        self.state
    }

    pub fn tab(&self) -> Memo<AuthTab> {
        self.tab
    }

    pub fn check(&self) -> Memo<CheckPanel> {
        self.check
    }

    /// Replaced only when a load starts or finishes
    pub fn timeline(&self) -> Memo<TimelineModel> {
        self.timeline
    }

    pub fn auth_notice(&self) -> Memo<Option<Notice>> {
        self.auth_notice
    }

    pub fn dispatch(&self, action: Action) {
        let Some(context) = self.state.try_update(|state| state.begin(&action)) else {
            return;
        };
        let Some(controller) = self.controller.try_get_value() else {
            return;
        };

        let this = *self;
        spawn_local(async move {
            let outcome = controller.handle(action, context).await;
            if let Some(deferred) = this.state.try_update(|state| state.apply(outcome)) {
                this.schedule(deferred);
            }
        });
    }

    fn schedule(&self, deferred: Vec<Deferred>) {
        for Deferred { after, action } in deferred {
            let this = *self;
            set_timeout(move || this.dispatch(action), after);
        }
    }

    pub fn hover(&self, at: CubeRef, rect: Rect) {
        self.state.update(|state| state.hover(at, rect));
    }

    pub fn unhover(&self) {
        self.state.update(|state| state.unhover());
    }
}
