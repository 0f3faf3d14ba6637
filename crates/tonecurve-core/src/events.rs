//! Change notifications delivered to the hosting application.

use std::cell::RefCell;
use std::rc::Rc;

use crate::curve::set::Channel;
use crate::tables::LookupTables;

/// Receives editor notifications. Every method defaults to a no-op.
pub trait CurveListener {
    /// Lookup tables were regenerated. Always carries all four tables.
    fn values_changed(&mut self, tables: &LookupTables) {
        let _ = tables;
    }

    /// The touched point changed. `can_delete` is false when nothing is held
    /// or the held point is the first or last one.
    fn points_changed(&mut self, can_delete: bool) {
        let _ = can_delete;
    }

    fn red_changed(&mut self) {}

    fn green_changed(&mut self) {}

    fn blue_changed(&mut self) {}

    fn composite_changed(&mut self) {}

    /// A gesture finished on `channel`. Fired after the per-channel callback.
    fn channel_changed(&mut self, channel: Channel) {
        let _ = channel;
    }
}

/// A recorded notification.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveEvent {
    ValuesChanged(Box<LookupTables>),
    PointsChanged { can_delete: bool },
    RedChanged,
    GreenChanged,
    BlueChanged,
    CompositeChanged,
    ChannelChanged(Channel),
}

/// Records every notification in order.
impl CurveListener for Vec<CurveEvent> {
    fn values_changed(&mut self, tables: &LookupTables) {
        self.push(CurveEvent::ValuesChanged(Box::new(*tables)));
    }

    fn points_changed(&mut self, can_delete: bool) {
        self.push(CurveEvent::PointsChanged { can_delete });
    }

    fn red_changed(&mut self) {
        self.push(CurveEvent::RedChanged);
    }

    fn green_changed(&mut self) {
        self.push(CurveEvent::GreenChanged);
    }

    fn blue_changed(&mut self) {
        self.push(CurveEvent::BlueChanged);
    }

    fn composite_changed(&mut self) {
        self.push(CurveEvent::CompositeChanged);
    }

    fn channel_changed(&mut self, channel: Channel) {
        self.push(CurveEvent::ChannelChanged(channel));
    }
}

/// Lets the host keep a handle on a listener it also gave to the editor.
impl<L: CurveListener + ?Sized> CurveListener for Rc<RefCell<L>> {
    fn values_changed(&mut self, tables: &LookupTables) {
        self.borrow_mut().values_changed(tables);
    }

    fn points_changed(&mut self, can_delete: bool) {
        self.borrow_mut().points_changed(can_delete);
    }

    fn red_changed(&mut self) {
        self.borrow_mut().red_changed();
    }

    fn green_changed(&mut self) {
        self.borrow_mut().green_changed();
    }

    fn blue_changed(&mut self) {
        self.borrow_mut().blue_changed();
    }

    fn composite_changed(&mut self) {
        self.borrow_mut().composite_changed();
    }

    fn channel_changed(&mut self, channel: Channel) {
        self.borrow_mut().channel_changed(channel);
    }
}

/// Optional listener slot owned by the curve set.
#[derive(Default)]
pub(crate) struct Notifier {
    listener: Option<Box<dyn CurveListener>>,
}

impl Notifier {
    pub(crate) fn set(&mut self, listener: Option<Box<dyn CurveListener>>) {
        self.listener = listener;
    }

    pub(crate) fn values_changed(&mut self, tables: &LookupTables) {
        if let Some(listener) = self.listener.as_mut() {
            listener.values_changed(tables);
        }
    }

    pub(crate) fn points_changed(&mut self, can_delete: bool) {
        if let Some(listener) = self.listener.as_mut() {
            listener.points_changed(can_delete);
        }
    }

    /// Per-channel callback followed by the generic one.
    pub(crate) fn channel_changed(&mut self, channel: Channel) {
        let Some(listener) = self.listener.as_mut() else {
            return;
        };
        match channel {
            Channel::Red => listener.red_changed(),
            Channel::Green => listener.green_changed(),
            Channel::Blue => listener.blue_changed(),
            Channel::Composite => listener.composite_changed(),
        }
        listener.channel_changed(channel);
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_changed_fires_specific_then_generic() {
        let log = Rc::new(RefCell::new(Vec::<CurveEvent>::new()));
        let mut notifier = Notifier::default();
        notifier.set(Some(Box::new(log.clone())));

        notifier.channel_changed(Channel::Green);
        notifier.points_changed(true);

        assert_eq!(
            *log.borrow(),
            vec![
                CurveEvent::GreenChanged,
                CurveEvent::ChannelChanged(Channel::Green),
                CurveEvent::PointsChanged { can_delete: true },
            ]
        );
    }

    #[test]
    fn test_without_listener_is_silent() {
        let mut notifier = Notifier::default();
        notifier.values_changed(&LookupTables::default());
        notifier.channel_changed(Channel::Red);
    }
}
