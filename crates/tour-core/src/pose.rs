//! Single-writer/single-reader hand-off of the latest camera pose.
//!
//! The scroll side publishes; the render loop reads whatever is newest when
//! it draws. Intermediate poses may be skipped. Neither half is `Clone`, so
//! there is exactly one of each.

use crate::path::CameraPose;
use std::cell::Cell;
use std::rc::Rc;

struct Slot {
    pose: Cell<CameraPose>,
    version: Cell<u64>,
}

pub struct PoseWriter {
    slot: Rc<Slot>,
}

pub struct PoseReader {
    slot: Rc<Slot>,
    seen: u64,
}

/// Create a slot holding `initial` at version 0.
pub fn pose_slot(initial: CameraPose) -> (PoseWriter, PoseReader) {
    let slot = Rc::new(Slot {
        pose: Cell::new(initial),
        version: Cell::new(0),
    });
    (
        PoseWriter { slot: slot.clone() },
        PoseReader { slot, seen: 0 },
    )
}

impl PoseWriter {
    pub fn publish(&self, pose: CameraPose) {
        self.slot.pose.set(pose);
        self.slot.version.set(self.slot.version.get().wrapping_add(1));
    }

    pub fn version(&self) -> u64 {
        self.slot.version.get()
    }
}

impl PoseReader {
    pub fn latest(&self) -> CameraPose {
        self.slot.pose.get()
    }

    /// The latest pose if it was published since the previous call.
    pub fn take_new(&mut self) -> Option<CameraPose> {
        let version = self.slot.version.get();
        if version == self.seen {
            return None;
        }
        self.seen = version;
        Some(self.slot.pose.get())
    }
}
