use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Energy-momentum 4-vector (px, py, pz, E), the kinematic base attribute of
/// every reconstructed object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct LorentzVector {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl LorentzVector {
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        LorentzVector { px, py, pz, e }
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Magnitude of the 3-momentum.
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Pseudorapidity. Zero for a vanishing transverse momentum.
    pub fn eta(&self) -> f64 {
        let pt = self.pt();
        if pt == 0.0 {
            0.0
        } else {
            (self.pz / pt).asinh()
        }
    }

    /// Azimuthal angle in (-pi, pi].
    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }

    pub fn energy(&self) -> f64 {
        self.e
    }

    /// Scales the 3-momentum in place; the energy component is untouched.
    pub fn rescale_momentum(&mut self, factor: f64) {
        self.px *= factor;
        self.py *= factor;
        self.pz *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinematic_accessors() {
        let p4 = LorentzVector::new(3.0, 4.0, 12.0, 13.0);

        assert!((p4.pt() - 5.0).abs() < 1e-12);
        assert!((p4.p() - 13.0).abs() < 1e-12);
        // asinh(12/5) = ln(5)
        assert!((p4.eta() - 5.0f64.ln()).abs() < 1e-12);
        assert!((p4.phi() - (4.0f64).atan2(3.0)).abs() < 1e-12);
        assert!((p4.energy() - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_eta_of_pure_longitudinal_vector() {
        let p4 = LorentzVector::new(0.0, 0.0, 7.0, 7.0);
        assert_eq!(p4.eta(), 0.0);
    }

    #[test]
    fn test_rescale_momentum_leaves_energy() {
        let mut p4 = LorentzVector::new(1.0, -2.0, 3.0, 10.0);
        p4.rescale_momentum(2.5);

        assert!((p4.px - 2.5).abs() < 1e-12);
        assert!((p4.py + 5.0).abs() < 1e-12);
        assert!((p4.pz - 7.5).abs() < 1e-12);
        assert!((p4.e - 10.0).abs() < 1e-12);
    }
}
