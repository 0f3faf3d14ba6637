//! The four channel curves, the active channel, and the touched point.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::curve::channel::{ChannelCurve, Outline};
use crate::curve::point::CurvePoint;
use crate::error::CurveError;
use crate::events::{CurveListener, Notifier};
use crate::mapper::CoordinateMapper;
use crate::snapshot::{ChannelPoints, ChannelSnapshot, CurveSnapshot, SnapshotCell};
use crate::tables::LookupTables;

/// Identifies one of the editable curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
    /// Applied to all three color channels after their own curves.
    Composite,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Red,
        Channel::Green,
        Channel::Blue,
        Channel::Composite,
    ];

    /// Position in per-channel arrays.
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Composite => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Composite => "RGB",
        }
    }
}

/// Owns every channel curve and decides which one receives edits.
///
/// Any change to a channel's points rebuilds its table and outline together
/// and republishes the snapshot, if one is attached.
#[derive(Debug)]
pub struct CurveSet {
    config: EditorConfig,
    channels: [ChannelCurve; 4],
    active: Channel,
    touched: Option<usize>,
    mapper: Option<CoordinateMapper>,
    notifier: Notifier,
    snapshot: Option<Arc<SnapshotCell>>,
}

impl Default for CurveSet {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl CurveSet {
    /// Four identity curves with the composite channel active. No render size
    /// is known yet, so outlines are empty until [`CurveSet::resize`].
    ///
    /// A configuration that fails [`EditorConfig::validate`] is replaced by
    /// the defaults.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config: config.or_default(),
            channels: Default::default(),
            active: Channel::Composite,
            touched: None,
            mapper: None,
            notifier: Notifier::default(),
            snapshot: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn mapper(&self) -> Option<&CoordinateMapper> {
        self.mapper.as_ref()
    }

    pub fn set_listener(&mut self, listener: impl CurveListener + 'static) {
        self.notifier.set(Some(Box::new(listener)));
    }

    pub fn clear_listener(&mut self) {
        self.notifier.set(None);
    }

    /// Start publishing snapshots for a renderer on another thread.
    pub fn attach_snapshot_cell(&mut self) -> Arc<SnapshotCell> {
        let cell = Arc::new(SnapshotCell::new(self.snapshot()));
        self.snapshot = Some(Arc::clone(&cell));
        cell
    }

    /// Apply a new render size and rebuild every channel.
    ///
    /// Sizes that leave no room inside the point-radius margin drop the mapper;
    /// outlines are then empty and pointer input is ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.mapper = CoordinateMapper::new(width, height, self.config.point_radius);
        if self.mapper.is_none() {
            tracing::debug!("curve area {width}x{height} is too small to draw");
        } else {
            tracing::debug!("resized curve area to {width}x{height}");
        }
        for channel in Channel::ALL {
            self.regenerate(channel);
        }
        self.notifier.values_changed(&self.tables());
        self.publish();
    }

    pub fn active_channel(&self) -> Channel {
        self.active
    }

    /// Route edits to `channel` and drop the touched point.
    pub fn set_active_channel(&mut self, channel: Channel) {
        self.active = channel;
        self.set_touched_index(None);
        self.publish();
    }

    pub fn touched_index(&self) -> Option<usize> {
        self.touched
    }

    /// Select a point of the active channel, or clear the selection.
    ///
    /// Indexes outside the active point list are ignored. Fires
    /// "points changed" otherwise.
    pub fn set_touched_index(&mut self, index: Option<usize>) {
        if index.is_some_and(|i| i >= self.active_points().len()) {
            return;
        }
        self.touched = index;
        self.notifier.points_changed(self.can_delete_touched());
    }

    /// Only interior points can be deleted.
    pub fn can_delete_touched(&self) -> bool {
        let last = self.active_points().len() - 1;
        self.touched.is_some_and(|i| i > 0 && i < last)
    }

    pub fn channel(&self, channel: Channel) -> &ChannelCurve {
        &self.channels[channel.index()]
    }

    pub fn points_of(&self, channel: Channel) -> &[CurvePoint] {
        self.channel(channel).points()
    }

    pub fn active_points(&self) -> &[CurvePoint] {
        self.points_of(self.active)
    }

    pub fn outline(&self, channel: Channel) -> &Outline {
        self.channel(channel).outline()
    }

    /// `true` when the channel differs from the two-point identity curve.
    pub fn is_modified(&self, channel: Channel) -> bool {
        !self.channel(channel).is_identity()
    }

    /// Current tables of all four channels.
    pub fn tables(&self) -> LookupTables {
        LookupTables {
            composite: *self.channel(Channel::Composite).table(),
            red: *self.channel(Channel::Red).table(),
            green: *self.channel(Channel::Green).table(),
            blue: *self.channel(Channel::Blue).table(),
        }
    }

    /// Return a channel to the identity curve. Does not notify; call
    /// [`CurveSet::commit_channel`] to push the new tables.
    pub fn reset_channel(&mut self, channel: Channel) {
        tracing::debug!("resetting {} curve", channel.label());
        let step = self.config.outline_step;
        self.channels[channel.index()].reset(self.mapper.as_ref(), step);
        if channel == self.active {
            self.clear_touched();
        }
        self.publish();
    }

    pub fn reset_all(&mut self) {
        for channel in Channel::ALL {
            self.reset_channel(channel);
        }
    }

    /// Replace one channel's points. Invalid lists leave the channel as it was.
    pub fn set_channel_points(
        &mut self,
        channel: Channel,
        points: Vec<CurvePoint>,
    ) -> Result<(), CurveError> {
        let step = self.config.outline_step;
        self.channels[channel.index()].set_points(points, self.mapper.as_ref(), step)?;
        if channel == self.active {
            self.clear_touched();
        }
        self.publish();
        Ok(())
    }

    /// Copy of every channel's points, for persistence by the host.
    pub fn export_points(&self) -> ChannelPoints {
        ChannelPoints {
            red: self.points_of(Channel::Red).to_vec(),
            green: self.points_of(Channel::Green).to_vec(),
            blue: self.points_of(Channel::Blue).to_vec(),
            composite: self.points_of(Channel::Composite).to_vec(),
        }
    }

    /// Restore a saved configuration and fire "values changed".
    ///
    /// All four lists are validated first; on error nothing changes.
    pub fn import_points(&mut self, points: ChannelPoints) -> Result<(), CurveError> {
        if let Err(err) = points.validate() {
            tracing::warn!("rejected curve import: {err}");
            return Err(err);
        }
        let step = self.config.outline_step;
        for (curve, list) in self.channels.iter_mut().zip(points.into_array()) {
            curve.set_points(list, self.mapper.as_ref(), step)?;
        }
        tracing::debug!("imported curve points");
        self.clear_touched();
        self.notifier.values_changed(&self.tables());
        self.publish();
        Ok(())
    }

    /// Rebuild one channel and fire "values changed" with all four tables.
    pub fn commit_channel(&mut self, channel: Channel) {
        self.regenerate(channel);
        self.notifier.values_changed(&self.tables());
        self.publish();
    }

    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> CurveSnapshot {
        CurveSnapshot {
            channels: Channel::ALL.map(|channel| {
                let curve = self.channel(channel);
                ChannelSnapshot {
                    points: curve.points().to_vec(),
                    table: *curve.table(),
                    outline: curve.outline().clone(),
                }
            }),
            active: self.active,
            touched: self.touched,
        }
    }

    pub(crate) fn active_points_mut(&mut self) -> &mut Vec<CurvePoint> {
        self.channels[self.active.index()].points_mut()
    }

    /// Rebuild the active channel after an in-place edit.
    pub(crate) fn refresh_active(&mut self, notify_values: bool) {
        self.regenerate(self.active);
        if notify_values {
            self.notifier.values_changed(&self.tables());
        }
        self.publish();
    }

    pub(crate) fn notify_channel_changed(&mut self) {
        self.notifier.channel_changed(self.active);
    }

    fn clear_touched(&mut self) {
        if self.touched.is_some() {
            self.set_touched_index(None);
        }
    }

    fn regenerate(&mut self, channel: Channel) {
        let step = self.config.outline_step;
        self.channels[channel.index()].regenerate(self.mapper.as_ref(), step);
    }

    fn publish(&self) {
        if let Some(cell) = &self.snapshot {
            cell.publish(self.snapshot());
        }
    }
}
