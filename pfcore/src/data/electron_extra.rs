use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::data::refs::{GsfTrackRef, TrackRef};
use crate::data::track::{GsfTrack, Track};
use crate::physics::constants::MASS_ELECTRON_GEV;
use crate::physics::kinematics::LorentzVector;

/// Number of entries in the MVA input vector.
pub const MVA_VARIABLE_COUNT: usize = 15;

/// Selection status of an electron candidate. The discriminant is the bit
/// position in the packed status word (bit 0 is reserved for "undefined").
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, Encode, Decode)]
pub enum ElectronStatus {
    Selected = 1,
    EcalDrivenPreselected = 2,
    MvaSelected = 3,
    Rejected = 4,
}

impl ElectronStatus {
    fn bit(&self) -> u32 {
        1 << (*self as u32)
    }
}

/// Identifiers of the MVA input variables. The slot index in the variable
/// vector is the discriminant minus one; the same layout is expected by the
/// downstream MVA evaluator.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, Encode, Decode)]
pub enum MvaVariable {
    LnPtGsf = 1,
    EtaGsf = 2,
    SigmaPtOverPt = 3,
    Fbrem = 4,
    Chi2Gsf = 5,
    NhitsKf = 6,
    Chi2Kf = 7,
    EtotOverPin = 8,
    EseedOverPout = 9,
    EbremOverDeltaP = 10,
    DeltaEtaTrackCluster = 11,
    LogSigmaEtaEta = 12,
    HOverHe = 13,
    LateBrem = 14,
    FirstBrem = 15,
}

impl MvaVariable {
    fn slot(&self) -> usize {
        *self as usize - 1
    }
}

/// Extra information on an electron particle candidate.
///
/// The record accumulates raw inputs over a sequence of setter calls; each
/// call stores its input and derives whatever MVA slots it can from the
/// inputs received so far, marking them in the presence mask. The pipeline
/// is expected to follow the order: gsf track (constructor or setter), then
/// pout, then cluster energies, then the hadronic energy. Out-of-order calls
/// are never rejected; they leave a slot absent, a sentinel, or a ratio
/// against a stale denominator.
#[derive(Clone, Debug, Serialize, Deserialize, Encode, Decode)]
pub struct PfElectronExtra {
    gsf_track_ref: Option<GsfTrackRef>,
    kf_track_ref: Option<TrackRef>,
    gsf_p_mode: f64,
    cluster_energies: Vec<f32>,
    mva_variables: [f32; MVA_VARIABLE_COUNT],
    mva_status: u16,
    status: u32,
    pout: LorentzVector,
    early_brem: f32,
    late_brem: f32,
    sigma_eta_eta: f32,
    had_energy: f32,
}

impl PfElectronExtra {
    pub fn new() -> Self {
        PfElectronExtra {
            gsf_track_ref: None,
            kf_track_ref: None,
            gsf_p_mode: 0.0,
            cluster_energies: Vec::new(),
            mva_variables: [0.0; MVA_VARIABLE_COUNT],
            mva_status: 0,
            status: 0,
            pout: LorentzVector::default(),
            early_brem: -9999.0,
            late_brem: -9999.0,
            sigma_eta_eta: -9999.0,
            had_energy: -9999.0,
        }
    }

    /// Builds the record from the primary GSF track and fills the track-level
    /// slots right away: ln(pt), eta, normalized chi2, the relative pt error
    /// (-999 sentinel if the error estimate is not positive) and the brem
    /// fraction against the current, still-zero pout.
    ///
    /// `track` must be the fit summary of the track `track_ref` points to.
    pub fn with_gsf_track(track_ref: GsfTrackRef, track: &GsfTrack) -> Self {
        let mut extra = PfElectronExtra::new();
        extra.set_gsf_track(track_ref, track);

        extra.set_variable(MvaVariable::LnPtGsf, track.pt_mode.ln() as f32);
        extra.set_variable(MvaVariable::EtaGsf, track.eta_mode as f32);
        extra.set_variable(MvaVariable::Chi2Gsf, track.normalized_chi2 as f32);
        if track.pt_mode_error > 0.0 {
            extra.set_variable(MvaVariable::SigmaPtOverPt, (track.pt_mode_error / track.pt_mode) as f32);
        } else {
            extra.set_variable(MvaVariable::SigmaPtOverPt, -999.0);
        }
        extra.set_variable(
            MvaVariable::Fbrem,
            ((track.pt_mode - extra.pout.pt()) / track.pt_mode) as f32,
        );

        extra
    }

    /// Stores the primary track reference without touching any MVA slot.
    /// The track momentum is kept for the energy ratios derived later in
    /// `set_cluster_energies`.
    pub fn set_gsf_track(&mut self, track_ref: GsfTrackRef, track: &GsfTrack) {
        self.gsf_track_ref = Some(track_ref);
        self.gsf_p_mode = track.p_mode;
    }

    /// Handle to the GSF track, `None` if never set.
    pub fn gsf_track_ref(&self) -> Option<GsfTrackRef> {
        self.gsf_track_ref
    }

    /// Stores the secondary (KF) track reference and fills the two KF
    /// slots: tracker layer count and normalized chi2.
    pub fn set_kf_track(&mut self, track_ref: TrackRef, track: &Track) {
        self.kf_track_ref = Some(track_ref);
        self.set_variable(MvaVariable::NhitsKf, track.tracker_layers_with_measurement as f32);
        self.set_variable(MvaVariable::Chi2Kf, track.normalized_chi2 as f32);
    }

    pub fn kf_track_ref(&self) -> Option<TrackRef> {
        self.kf_track_ref
    }

    pub fn set_late_brem(&mut self, val: f32) {
        self.late_brem = val;
        self.set_variable(MvaVariable::LateBrem, val);
    }

    pub fn late_brem(&self) -> f32 {
        self.late_brem
    }

    pub fn set_early_brem(&mut self, val: f32) {
        self.early_brem = val;
        self.set_variable(MvaVariable::FirstBrem, val);
    }

    pub fn early_brem(&self) -> f32 {
        self.early_brem
    }

    /// Stores the momentum at the track exit. Must be called before
    /// `set_cluster_energies` for the seed and brem ratios to see it.
    pub fn set_gsf_track_pout(&mut self, pout: LorentzVector) {
        self.pout = pout;
    }

    pub fn pout(&self) -> &LorentzVector {
        &self.pout
    }

    /// Stores sigma-eta-eta of the seed cluster; mirrored verbatim into its
    /// slot, the log interpretation is left to the consumer.
    pub fn set_sigma_eta_eta(&mut self, val: f32) {
        self.sigma_eta_eta = val;
        self.set_variable(MvaVariable::LogSigmaEtaEta, val);
    }

    pub fn sigma_eta_eta(&self) -> f32 {
        self.sigma_eta_eta
    }

    /// Stores the calibrated cluster energies, seed first, and derives the
    /// energy ratios. The gsf track and the pout should have been set
    /// before: with a zero pout the seed ratio is skipped and the brem
    /// denominator degrades to the full incoming energy.
    pub fn set_cluster_energies(&mut self, energies: Vec<f32>) {
        self.cluster_energies = energies;

        if self.pout.e != 0.0 {
            if let Some(seed) = self.cluster_energies.first() {
                self.set_variable(MvaVariable::EseedOverPout, (*seed as f64 / self.pout.e) as f32);
            }
        }

        // expected incoming energy from the track momentum mode
        let e_in = (self.gsf_p_mode * self.gsf_p_mode + MASS_ELECTRON_GEV * MASS_ELECTRON_GEV).sqrt();
        let e_tot: f64 = self.cluster_energies.iter().map(|e| *e as f64).sum();
        let e_brem: f64 = self.cluster_energies.iter().skip(1).map(|e| *e as f64).sum();

        self.set_variable(MvaVariable::EtotOverPin, (e_tot / e_in) as f32);
        self.set_variable(MvaVariable::EbremOverDeltaP, (e_brem / (e_in - self.pout.e)) as f32);
    }

    /// Energies of the individual clusters; the first one is the seed.
    pub fn cluster_energies(&self) -> &[f32] {
        &self.cluster_energies
    }

    /// Stores the hadronic energy behind the supercluster. The H/(H+E)
    /// slot is only derived if the cluster energies were entered before;
    /// called out of order it silently stays absent.
    pub fn set_had_energy(&mut self, val: f32) {
        self.had_energy = val;
        if let Some(seed) = self.cluster_energies.first() {
            self.set_variable(MvaVariable::HOverHe, val / (val + *seed));
        }
    }

    pub fn had_energy(&self) -> f32 {
        self.had_energy
    }

    /// Toggles one status bit; the other bits are untouched.
    pub fn set_status(&mut self, flag: ElectronStatus, status: bool) {
        if status {
            self.status |= flag.bit();
        } else {
            self.status &= !flag.bit();
        }
    }

    /// Reads one status bit.
    pub fn electron_status(&self, flag: ElectronStatus) -> bool {
        self.status & flag.bit() != 0
    }

    /// Value of one MVA input, `None` if the slot was never filled.
    pub fn mva_variable(&self, variable: MvaVariable) -> Option<f32> {
        if self.mva_status & (1 << variable.slot()) != 0 {
            Some(self.mva_variables[variable.slot()])
        } else {
            None
        }
    }

    /// The raw variable vector handed to the MVA evaluator. Slots whose
    /// presence bit is unset hold stale content; check `mva_status` first.
    pub fn mva_variables(&self) -> &[f32; MVA_VARIABLE_COUNT] {
        &self.mva_variables
    }

    /// Presence mask over the variable vector, bit i = slot i filled.
    pub fn mva_status(&self) -> u16 {
        self.mva_status
    }

    fn set_variable(&mut self, variable: MvaVariable, val: f32) {
        self.mva_variables[variable.slot()] = val;
        self.mva_status |= 1 << variable.slot();
    }
}

impl Default for PfElectronExtra {
    fn default() -> Self {
        PfElectronExtra::new()
    }
}
