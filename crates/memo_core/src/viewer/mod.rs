//! Modal memo viewer.
//!
//! # Responsibility
//! - Own the open/closed state of the read-only memo modal.
//! - Route key and click events to close, edit and delete intents.
//! - Hold host resources (scroll lock, key subscription) only while open.
//!
//! # Invariants
//! - `Open` always carries a memo; nothing renders without one.
//! - Each close path invokes `on_close` exactly once.
//! - Delete intent is only emitted after the host confirms.
//! - Host resources are released on every exit path, including drop.

pub mod host;
pub mod view;

use crate::model::memo::{Memo, MemoId};
use host::{HostLease, ViewerHost};
use log::debug;
use std::rc::Rc;
use view::{ViewerOptions, ViewerView};

/// Prompt shown before a delete intent is emitted.
pub const DELETE_CONFIRM_MESSAGE: &str = "Delete this memo?";

/// Keys the viewer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Character(char),
    Other,
}

/// Regions of the modal that react to clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Dimmed overlay surrounding the panel.
    Backdrop,
    /// Anywhere inside the content panel that is not a button.
    Panel,
    CloseButton,
    EditButton,
    DeleteButton,
}

/// Input delivered by the host while the viewer is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    KeyDown(Key),
    Click(ClickTarget),
}

/// Owner-supplied reactions to viewer intents.
pub struct ViewerCallbacks {
    pub on_close: Box<dyn FnMut()>,
    pub on_edit: Box<dyn FnMut(&Memo)>,
    pub on_delete: Box<dyn FnMut(MemoId)>,
}

impl ViewerCallbacks {
    pub fn new(
        on_close: impl FnMut() + 'static,
        on_edit: impl FnMut(&Memo) + 'static,
        on_delete: impl FnMut(MemoId) + 'static,
    ) -> Self {
        Self {
            on_close: Box::new(on_close),
            on_edit: Box::new(on_edit),
            on_delete: Box::new(on_delete),
        }
    }
}

enum ViewerState<H: ViewerHost> {
    Closed,
    Open { memo: Memo, _lease: HostLease<H> },
}

/// Modal viewer over one memo.
pub struct MemoViewer<H: ViewerHost> {
    host: Rc<H>,
    callbacks: ViewerCallbacks,
    options: ViewerOptions,
    state: ViewerState<H>,
}

impl<H: ViewerHost> MemoViewer<H> {
    /// Creates a closed viewer.
    pub fn new(host: Rc<H>, callbacks: ViewerCallbacks) -> Self {
        Self::with_options(host, callbacks, ViewerOptions::default())
    }

    pub fn with_options(host: Rc<H>, callbacks: ViewerCallbacks, options: ViewerOptions) -> Self {
        Self {
            host,
            callbacks,
            options,
            state: ViewerState::Closed,
        }
    }

    /// Applies owner-controlled inputs.
    ///
    /// The viewer is open only when `is_open` is set and a memo is supplied.
    /// Swapping the memo while open keeps the existing host lease. Closing
    /// through this path does not call `on_close`; the owner drove it.
    pub fn set_props(&mut self, memo: Option<Memo>, is_open: bool) {
        match (memo, is_open) {
            (Some(memo), true) => {
                if let ViewerState::Open { memo: current, .. } = &mut self.state {
                    *current = memo;
                    return;
                }
                debug!(
                    "event=viewer_open module=viewer status=ok memo_id={}",
                    memo.id
                );
                self.state = ViewerState::Open {
                    memo,
                    _lease: HostLease::acquire(Rc::clone(&self.host)),
                };
            }
            _ => {
                if self.is_open() {
                    debug!("event=viewer_dismiss module=viewer status=ok");
                }
                self.state = ViewerState::Closed;
            }
        }
    }

    /// Opens the viewer on `memo`.
    pub fn open(&mut self, memo: Memo) {
        self.set_props(Some(memo), true);
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open { .. })
    }

    /// Memo currently displayed, if any.
    pub fn memo(&self) -> Option<&Memo> {
        match &self.state {
            ViewerState::Open { memo, .. } => Some(memo),
            ViewerState::Closed => None,
        }
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Dispatches one host event. Returns whether it caused a transition or
    /// intent. Events are ignored while closed.
    pub fn handle_event(&mut self, event: ViewerEvent) -> bool {
        if !self.is_open() {
            return false;
        }

        match event {
            ViewerEvent::KeyDown(Key::Escape) => self.close(),
            ViewerEvent::KeyDown(_) => false,
            ViewerEvent::Click(ClickTarget::Backdrop | ClickTarget::CloseButton) => self.close(),
            ViewerEvent::Click(ClickTarget::Panel) => false,
            ViewerEvent::Click(ClickTarget::EditButton) => self.edit(),
            ViewerEvent::Click(ClickTarget::DeleteButton) => self.delete(),
        }
    }

    /// Releases host resources and notifies the owner. `false` when closed.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = ViewerState::Closed;
        debug!("event=viewer_close module=viewer status=ok");
        (self.callbacks.on_close)();
        true
    }

    /// Emits the edit intent for the displayed memo, then closes.
    pub fn edit(&mut self) -> bool {
        let Some(memo) = self.memo().cloned() else {
            return false;
        };
        (self.callbacks.on_edit)(&memo);
        self.close()
    }

    /// Asks the host for confirmation, then emits the delete intent and
    /// closes. Declining leaves the viewer open.
    pub fn delete(&mut self) -> bool {
        let Some(id) = self.memo().map(|memo| memo.id) else {
            return false;
        };
        if !self.host.confirm(DELETE_CONFIRM_MESSAGE) {
            debug!(
                "event=viewer_delete module=viewer status=declined memo_id={}",
                id
            );
            return false;
        }
        (self.callbacks.on_delete)(id);
        self.close()
    }

    /// View model for the open memo; `None` while closed.
    pub fn render(&self) -> Option<ViewerView> {
        self.memo().map(|memo| ViewerView::build(memo, &self.options))
    }
}
