// Non-owning handles into collections produced upstream (blocks, tracks,
// muons). A handle pairs the identity of the producing collection with an
// index into it and never owns the referenced object: the collection must
// outlive every handle pointing into it, and resolving a handle against the
// wrong or an already-dropped collection is a caller-side contract violation.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Handle to a particle-flow block in the block collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct BlockRef {
    pub product_id: u32,
    pub index: u32,
}

impl BlockRef {
    pub fn new(product_id: u32, index: u32) -> Self {
        BlockRef { product_id, index }
    }
}

/// Handle to a Kalman-filter track in the general track collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct TrackRef {
    pub product_id: u32,
    pub index: u32,
}

impl TrackRef {
    pub fn new(product_id: u32, index: u32) -> Self {
        TrackRef { product_id, index }
    }
}

/// Handle to a GSF track in the electron track collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct GsfTrackRef {
    pub product_id: u32,
    pub index: u32,
}

impl GsfTrackRef {
    pub fn new(product_id: u32, index: u32) -> Self {
        GsfTrackRef { product_id, index }
    }
}

/// Handle to a reconstructed muon in the muon collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct MuonRef {
    pub product_id: u32,
    pub index: u32,
}

impl MuonRef {
    pub fn new(product_id: u32, index: u32) -> Self {
        MuonRef { product_id, index }
    }
}
