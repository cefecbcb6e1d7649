use std::fmt;
use std::fmt::{Display, Formatter};

use bincode::{Decode, Encode};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::data::refs::{BlockRef, MuonRef, TrackRef};
use crate::physics::kinematics::LorentzVector;

/// Sentinel for a discriminator score that was never produced.
pub const BIG_MVA: f32 = -999.0;

/// Classification assigned by the particle-flow algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, Encode, Decode)]
pub enum ParticleType {
    Undefined,
    ChargedHadron,
    Electron,
    Muon,
    Photon,
    NeutralHadron,
}

impl ParticleType {
    /// Returns the numeric identification code of the particle type.
    pub fn particle_id(&self) -> i32 {
        match self {
            ParticleType::Undefined => 0,
            ParticleType::ChargedHadron => 1,
            ParticleType::Electron => 2,
            ParticleType::Muon => 3,
            ParticleType::Photon => 4,
            ParticleType::NeutralHadron => 5,
        }
    }
}

impl Default for ParticleType {
    fn default() -> Self {
        ParticleType::Undefined
    }
}

impl Display for ParticleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParticleType::Undefined => write!(f, "X"),
            ParticleType::ChargedHadron => write!(f, "h"),
            ParticleType::Electron => write!(f, "e"),
            ParticleType::Muon => write!(f, "mu"),
            ParticleType::Photon => write!(f, "gamma"),
            ParticleType::NeutralHadron => write!(f, "h0"),
        }
    }
}

/// Per-subsystem quality flags of a candidate. The discriminant is the bit
/// position in the packed flag word: E* flags mark ECAL boundary regions,
/// H* flags HCAL boundary regions, T* flags the tracking provenance.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, Encode, Decode)]
pub enum CandidateFlag {
    Normal = 0,
    EPhiSModules = 1,
    EEta0 = 2,
    EEtaModules = 3,
    EBarrelEndcap = 4,
    EPreshowerEdge = 5,
    EPreshower = 6,
    EEndcapEdge = 7,
    HEta0 = 8,
    HBarrelEndcap = 9,
    HEndcapVfcal = 10,
    HVfcalEdge = 11,
    TToNuclearInteraction = 12,
    TFromNuclearInteraction = 13,
    TFromV0 = 14,
    TFromGammaConversion = 15,
}

impl CandidateFlag {
    pub const ALL: [CandidateFlag; 16] = [
        CandidateFlag::Normal,
        CandidateFlag::EPhiSModules,
        CandidateFlag::EEta0,
        CandidateFlag::EEtaModules,
        CandidateFlag::EBarrelEndcap,
        CandidateFlag::EPreshowerEdge,
        CandidateFlag::EPreshower,
        CandidateFlag::EEndcapEdge,
        CandidateFlag::HEta0,
        CandidateFlag::HBarrelEndcap,
        CandidateFlag::HEndcapVfcal,
        CandidateFlag::HVfcalEdge,
        CandidateFlag::TToNuclearInteraction,
        CandidateFlag::TFromNuclearInteraction,
        CandidateFlag::TFromV0,
        CandidateFlag::TFromGammaConversion,
    ];

    fn bit(&self) -> u32 {
        1 << (*self as u32)
    }
}

/// Particle reconstructed by the particle-flow algorithm.
///
/// Identity (charge, 4-momentum at construction, type, block of origin) is
/// fixed when the candidate is built; calibrated energies, discriminator
/// scores, quality flags and the optional track/muon references are filled
/// in afterwards by the downstream correction steps. All setters are
/// independent field assignments with no validation; flag bits carry no
/// cross-bit invariant, consistency is up to the caller.
#[derive(Clone, Debug, Serialize, Deserialize, Encode, Decode)]
pub struct PfCandidate {
    charge: i32,
    p4: LorentzVector,
    particle_type: ParticleType,
    block_ref: BlockRef,
    track_ref: Option<TrackRef>,
    muon_ref: Option<MuonRef>,
    ecal_energy: f32,
    hcal_energy: f32,
    ps1_energy: f32,
    ps2_energy: f32,
    flags: u32,
    delta_p: f64,
    mva_e_pi: f32,
    mva_e_mu: f32,
    mva_pi_mu: f32,
    mva_nothing_gamma: f32,
    mva_nothing_nh: f32,
    mva_gamma_nh: f32,
}

impl PfCandidate {
    pub fn new(charge: i32, p4: LorentzVector, particle_type: ParticleType, block_ref: BlockRef) -> Self {
        PfCandidate {
            charge,
            p4,
            particle_type,
            block_ref,
            track_ref: None,
            muon_ref: None,
            ecal_energy: 0.0,
            hcal_energy: 0.0,
            ps1_energy: 0.0,
            ps2_energy: 0.0,
            flags: 0,
            delta_p: 0.0,
            mva_e_pi: BIG_MVA,
            mva_e_mu: BIG_MVA,
            mva_pi_mu: BIG_MVA,
            mva_nothing_gamma: BIG_MVA,
            mva_nothing_nh: BIG_MVA,
            mva_gamma_nh: BIG_MVA,
        }
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn p4(&self) -> &LorentzVector {
        &self.p4
    }

    pub fn particle_type(&self) -> ParticleType {
        self.particle_type
    }

    /// Numeric identification code of the particle type.
    pub fn particle_id(&self) -> i32 {
        self.particle_type.particle_id()
    }

    /// Handle to the block this candidate was built from.
    pub fn block_ref(&self) -> BlockRef {
        self.block_ref
    }

    /// Set the track reference, for charged candidates.
    pub fn set_track_ref(&mut self, track_ref: TrackRef) {
        self.track_ref = Some(track_ref);
    }

    /// Handle to the corresponding track if the candidate is charged,
    /// `None` otherwise.
    pub fn track_ref(&self) -> Option<TrackRef> {
        self.track_ref
    }

    /// Set the muon reference, for muon candidates.
    pub fn set_muon_ref(&mut self, muon_ref: MuonRef) {
        self.muon_ref = Some(muon_ref);
    }

    /// Handle to the corresponding muon if the candidate is a muon,
    /// `None` otherwise.
    pub fn muon_ref(&self) -> Option<MuonRef> {
        self.muon_ref
    }

    /// Particle momentum *= factor.
    pub fn rescale_momentum(&mut self, factor: f64) {
        self.p4.rescale_momentum(factor);
    }

    /// Set one quality flag; the other bits are untouched.
    pub fn set_flag(&mut self, flag: CandidateFlag, value: bool) {
        if value {
            self.flags |= flag.bit();
        } else {
            self.flags &= !flag.bit();
        }
    }

    /// Read one quality flag.
    pub fn flag(&self, flag: CandidateFlag) -> bool {
        self.flags & flag.bit() != 0
    }

    /// The packed flag word.
    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// Set the corrected ECAL energy.
    pub fn set_ecal_energy(&mut self, ee: f32) {
        self.ecal_energy = ee;
    }

    pub fn ecal_energy(&self) -> f32 {
        self.ecal_energy
    }

    /// Set the corrected HCAL energy.
    pub fn set_hcal_energy(&mut self, eh: f32) {
        self.hcal_energy = eh;
    }

    pub fn hcal_energy(&self) -> f32 {
        self.hcal_energy
    }

    /// Set the corrected energy in the first preshower layer.
    pub fn set_ps1_energy(&mut self, e1: f32) {
        self.ps1_energy = e1;
    }

    pub fn ps1_energy(&self) -> f32 {
        self.ps1_energy
    }

    /// Set the corrected energy in the second preshower layer.
    pub fn set_ps2_energy(&mut self, e2: f32) {
        self.ps2_energy = e2;
    }

    pub fn ps2_energy(&self) -> f32 {
        self.ps2_energy
    }

    /// Set the uncertainty on the 3-momentum.
    pub fn set_delta_p(&mut self, dp: f64) {
        self.delta_p = dp;
    }

    pub fn delta_p(&self) -> f64 {
        self.delta_p
    }

    /// Set the electron-pion discrimination score.
    pub fn set_mva_e_pi(&mut self, mva: f32) {
        self.mva_e_pi = mva;
    }

    pub fn mva_e_pi(&self) -> f32 {
        self.mva_e_pi
    }

    /// Set the electron-muon discrimination score.
    pub fn set_mva_e_mu(&mut self, mva: f32) {
        self.mva_e_mu = mva;
    }

    pub fn mva_e_mu(&self) -> f32 {
        self.mva_e_mu
    }

    /// Set the pion-muon discrimination score.
    pub fn set_mva_pi_mu(&mut self, mva: f32) {
        self.mva_pi_mu = mva;
    }

    pub fn mva_pi_mu(&self) -> f32 {
        self.mva_pi_mu
    }

    /// Set the photon detection score.
    pub fn set_mva_nothing_gamma(&mut self, mva: f32) {
        self.mva_nothing_gamma = mva;
    }

    pub fn mva_nothing_gamma(&self) -> f32 {
        self.mva_nothing_gamma
    }

    /// Set the neutral-hadron detection score.
    pub fn set_mva_nothing_nh(&mut self, mva: f32) {
        self.mva_nothing_nh = mva;
    }

    pub fn mva_nothing_nh(&self) -> f32 {
        self.mva_nothing_nh
    }

    /// Set the photon - neutral-hadron discrimination score.
    pub fn set_mva_gamma_nh(&mut self, mva: f32) {
        self.mva_gamma_nh = mva;
    }

    pub fn mva_gamma_nh(&self) -> f32 {
        self.mva_gamma_nh
    }
}

impl Default for PfCandidate {
    fn default() -> Self {
        PfCandidate::new(0, LorentzVector::default(), ParticleType::Undefined, BlockRef::default())
    }
}

impl Display for PfCandidate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let set_flags = CandidateFlag::ALL
            .iter()
            .filter(|flag| self.flag(**flag))
            .map(|flag| format!("{:?}", flag))
            .join(" ");

        write!(
            f,
            "PfCandidate {} (charge {}), pt: {:.3}, eta: {:.3}, phi: {:.3}, \
             ecal: {:.3}, hcal: {:.3}, ps1: {:.3}, ps2: {:.3}, delta_p: {:.3}, \
             mva e-pi: {:.3}, e-mu: {:.3}, pi-mu: {:.3}, \
             gamma: {:.3}, nh: {:.3}, gamma-nh: {:.3}, flags: [{}]",
            self.particle_type,
            self.charge,
            self.p4.pt(),
            self.p4.eta(),
            self.p4.phi(),
            self.ecal_energy,
            self.hcal_energy,
            self.ps1_energy,
            self.ps2_energy,
            self.delta_p,
            self.mva_e_pi,
            self.mva_e_mu,
            self.mva_pi_mu,
            self.mva_nothing_gamma,
            self.mva_nothing_nh,
            self.mva_gamma_nh,
            set_flags
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn electron_candidate() -> PfCandidate {
        let p4 = LorentzVector::new(3.0, 4.0, 12.0, 13.0);
        PfCandidate::new(-1, p4, ParticleType::Electron, BlockRef::new(7, 2))
    }

    #[test]
    fn test_flags_are_independent() {
        let mut candidate = electron_candidate();

        for flag in CandidateFlag::ALL {
            candidate.set_flag(flag, true);
            assert!(candidate.flag(flag));
            for other in CandidateFlag::ALL {
                if other != flag {
                    assert!(!candidate.flag(other));
                }
            }
            candidate.set_flag(flag, false);
            assert!(!candidate.flag(flag));
        }
        assert_eq!(candidate.flags(), 0);
    }

    #[test]
    fn test_rescale_momentum_composes() {
        let mut a = electron_candidate();
        let mut b = electron_candidate();

        a.rescale_momentum(1.5);
        a.rescale_momentum(2.0);
        b.rescale_momentum(3.0);

        assert!((a.p4().px - b.p4().px).abs() < 1e-12);
        assert!((a.p4().py - b.p4().py).abs() < 1e-12);
        assert!((a.p4().pz - b.p4().pz).abs() < 1e-12);
        // the energy component is not part of the rescale
        assert!((a.p4().e - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_energy_setters_are_independent() {
        let mut candidate = electron_candidate();

        candidate.set_hcal_energy(2.5);
        candidate.set_ps2_energy(0.4);
        candidate.set_ecal_energy(11.0);
        candidate.set_ps1_energy(0.3);
        candidate.set_delta_p(0.07);

        assert_eq!(candidate.ecal_energy(), 11.0);
        assert_eq!(candidate.hcal_energy(), 2.5);
        assert_eq!(candidate.ps1_energy(), 0.3);
        assert_eq!(candidate.ps2_energy(), 0.4);
        assert_eq!(candidate.delta_p(), 0.07);
    }

    #[test]
    fn test_mva_scores_default_to_sentinel() {
        let mut candidate = electron_candidate();

        assert_eq!(candidate.mva_e_pi(), BIG_MVA);
        assert_eq!(candidate.mva_e_mu(), BIG_MVA);
        assert_eq!(candidate.mva_pi_mu(), BIG_MVA);
        assert_eq!(candidate.mva_nothing_gamma(), BIG_MVA);
        assert_eq!(candidate.mva_nothing_nh(), BIG_MVA);
        assert_eq!(candidate.mva_gamma_nh(), BIG_MVA);

        candidate.set_mva_e_pi(0.92);
        candidate.set_mva_gamma_nh(-0.4);
        assert_eq!(candidate.mva_e_pi(), 0.92);
        assert_eq!(candidate.mva_gamma_nh(), -0.4);
        assert_eq!(candidate.mva_e_mu(), BIG_MVA);
    }

    #[test]
    fn test_identity_and_optional_refs() {
        let mut candidate = electron_candidate();

        assert_eq!(candidate.particle_type(), ParticleType::Electron);
        assert_eq!(candidate.particle_id(), 2);
        assert_eq!(candidate.block_ref(), BlockRef::new(7, 2));
        assert_eq!(candidate.track_ref(), None);
        assert_eq!(candidate.muon_ref(), None);

        candidate.set_track_ref(TrackRef::new(3, 14));
        assert_eq!(candidate.track_ref(), Some(TrackRef::new(3, 14)));
        assert_eq!(candidate.muon_ref(), None);
    }

    #[test]
    fn test_display_lists_set_flags() {
        let mut candidate = electron_candidate();
        candidate.set_flag(CandidateFlag::TFromGammaConversion, true);

        let dump = format!("{}", candidate);
        assert!(dump.contains("PfCandidate e"));
        assert!(dump.contains("TFromGammaConversion"));
    }
}
