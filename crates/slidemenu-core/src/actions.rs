use std::fmt;

use serde::{Deserialize, Serialize};

/// Controls on the action surface, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Mark the message as read
    Read,
    /// Pin the message to the top
    Top,
    /// Delete the message
    Delete,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [ActionKind::Read, ActionKind::Top, ActionKind::Delete];

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Read => "Read",
            ActionKind::Top => "Top",
            ActionKind::Delete => "Delete",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Read => f.write_str("read"),
            ActionKind::Top => f.write_str("top"),
            ActionKind::Delete => f.write_str("delete"),
        }
    }
}

type Callback = Box<dyn FnMut()>;

/// Host callbacks, one independent slot per action
#[derive(Default)]
pub struct ActionCallbacks {
    on_read: Option<Callback>,
    on_top: Option<Callback>,
    on_delete: Option<Callback>,
}

impl ActionCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_read(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_read = Some(Box::new(callback));
        self
    }

    pub fn on_top(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_top = Some(Box::new(callback));
        self
    }

    pub fn on_delete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_delete = Some(Box::new(callback));
        self
    }

    /// Register the same handler for every action
    pub fn for_all(mut callback: impl FnMut(ActionKind) + Clone + 'static) -> Self {
        let mut read = callback.clone();
        let mut top = callback.clone();
        Self::new()
            .on_read(move || read(ActionKind::Read))
            .on_top(move || top(ActionKind::Top))
            .on_delete(move || callback(ActionKind::Delete))
    }

    pub fn is_registered(&self, kind: ActionKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Fire the callback for `kind`
    pub fn invoke(&mut self, kind: ActionKind) -> crate::Result<()> {
        let slot = match kind {
            ActionKind::Read => &mut self.on_read,
            ActionKind::Top => &mut self.on_top,
            ActionKind::Delete => &mut self.on_delete,
        };
        let callback = slot.as_mut().ok_or(crate::Error::NoListener(kind))?;
        callback();
        Ok(())
    }

    fn slot(&self, kind: ActionKind) -> Option<&Callback> {
        match kind {
            ActionKind::Read => self.on_read.as_ref(),
            ActionKind::Top => self.on_top.as_ref(),
            ActionKind::Delete => self.on_delete.as_ref(),
        }
    }
}

impl fmt::Debug for ActionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCallbacks")
            .field("on_read", &self.on_read.is_some())
            .field("on_top", &self.on_top.is_some())
            .field("on_delete", &self.on_delete.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_invoke_fires_only_matching_slot() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let (a, b, c) = (fired.clone(), fired.clone(), fired.clone());
        let mut callbacks = ActionCallbacks::new()
            .on_read(move || a.borrow_mut().push(ActionKind::Read))
            .on_top(move || b.borrow_mut().push(ActionKind::Top))
            .on_delete(move || c.borrow_mut().push(ActionKind::Delete));

        callbacks.invoke(ActionKind::Top).unwrap();
        callbacks.invoke(ActionKind::Delete).unwrap();
        assert_eq!(*fired.borrow(), vec![ActionKind::Top, ActionKind::Delete]);
    }

    #[test]
    fn test_missing_listener_fails_fast() {
        let mut callbacks = ActionCallbacks::new().on_read(|| {});
        assert!(callbacks.is_registered(ActionKind::Read));
        assert!(!callbacks.is_registered(ActionKind::Delete));

        let err = callbacks.invoke(ActionKind::Delete).unwrap_err();
        assert!(matches!(err, crate::Error::NoListener(ActionKind::Delete)));
        assert_eq!(err.to_string(), "No listener registered for delete action");
    }

    #[test]
    fn test_for_all_tags_each_action() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = fired.clone();
        let mut callbacks = ActionCallbacks::for_all(move |kind| sink.borrow_mut().push(kind));

        for kind in ActionKind::ALL {
            callbacks.invoke(kind).unwrap();
        }
        assert_eq!(*fired.borrow(), ActionKind::ALL.to_vec());
    }
}
