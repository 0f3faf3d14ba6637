//! Point-list export/import and render snapshots.
//!
//! [`ChannelPoints`] is what a host persists: the four ordered point lists.
//! [`SnapshotCell`] serves hosts that render on another thread. The curve set
//! publishes points, tables and outlines of every channel as one immutable
//! [`CurveSnapshot`], so a reader never pairs new points with an old table.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::curve::channel::{LookupTable, Outline};
use crate::curve::point::{CurvePoint, IDENTITY_POINTS, validate_points};
use crate::curve::set::Channel;
use crate::error::CurveError;

/// The four per-channel point lists, in persistence form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPoints {
    pub red: Vec<CurvePoint>,
    pub green: Vec<CurvePoint>,
    pub blue: Vec<CurvePoint>,
    pub composite: Vec<CurvePoint>,
}

impl Default for ChannelPoints {
    fn default() -> Self {
        Self {
            red: IDENTITY_POINTS.to_vec(),
            green: IDENTITY_POINTS.to_vec(),
            blue: IDENTITY_POINTS.to_vec(),
            composite: IDENTITY_POINTS.to_vec(),
        }
    }
}

impl ChannelPoints {
    pub fn get(&self, channel: Channel) -> &[CurvePoint] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
            Channel::Composite => &self.composite,
        }
    }

    pub(crate) fn into_array(self) -> [Vec<CurvePoint>; 4] {
        let mut lists = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
        lists[Channel::Red.index()] = self.red;
        lists[Channel::Green.index()] = self.green;
        lists[Channel::Blue.index()] = self.blue;
        lists[Channel::Composite.index()] = self.composite;
        lists
    }

    /// Validate all four lists.
    pub fn validate(&self) -> Result<(), CurveError> {
        Channel::ALL
            .iter()
            .try_for_each(|&channel| validate_points(self.get(channel)))
    }

    pub fn to_json(&self) -> Result<String, CurveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a saved configuration.
    pub fn from_json(json: &str) -> Result<Self, CurveError> {
        let points: Self = serde_json::from_str(json)?;
        points.validate()?;
        Ok(points)
    }
}

/// One channel as seen by a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSnapshot {
    pub points: Vec<CurvePoint>,
    pub table: LookupTable,
    pub outline: Outline,
}

/// Consistent view of the whole curve set.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSnapshot {
    /// Indexed by [`Channel::index`].
    pub channels: [ChannelSnapshot; 4],
    pub active: Channel,
    pub touched: Option<usize>,
}

impl CurveSnapshot {
    pub fn channel(&self, channel: Channel) -> &ChannelSnapshot {
        &self.channels[channel.index()]
    }
}

/// Latest published snapshot, shareable across threads.
#[derive(Debug)]
pub struct SnapshotCell {
    current: RwLock<Arc<CurveSnapshot>>,
}

impl SnapshotCell {
    pub fn new(initial: CurveSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// The most recent snapshot. Cheap; holds the lock only to clone the `Arc`.
    pub fn load(&self) -> Arc<CurveSnapshot> {
        Arc::clone(&self.current.read())
    }

    pub(crate) fn publish(&self, snapshot: CurveSnapshot) {
        *self.current.write() = Arc::new(snapshot);
    }
}
