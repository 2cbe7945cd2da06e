//! Recorded frames, for later playback or offline inspection.

use std::{io, path::Path};

use bincode::{Decode, Encode};
use lin_alg::f32::Vec3;

use crate::{cloth::Cloth, util};

#[derive(Clone, Debug, Encode, Decode)]
pub struct SnapShot {
    pub frame: usize,
    pub time: f32,
    pub posits: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl SnapShot {
    /// Copy the published buffers; the cloth is not borrowed afterwards.
    pub fn take(cloth: &Cloth) -> Self {
        Self {
            frame: cloth.frame(),
            time: cloth.time_elapsed(),
            posits: cloth.posits().to_vec(),
            normals: cloth.normals().to_vec(),
        }
    }
}

pub fn save_snapshots(path: &Path, snapshots: &[SnapShot]) -> io::Result<()> {
    util::save(path, snapshots)
}

pub fn load_snapshots(path: &Path) -> io::Result<Vec<SnapShot>> {
    util::load(path)
}
