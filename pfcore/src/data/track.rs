// Read-only summaries of the quantities the track-fitting subsystems expose.
// These are transient views handed to the record setters together with the
// matching collection handle; they are consulted once and never stored.

/// Fit results of a GSF (gaussian-sum filter) electron track. The mode
/// quantities are the most probable values of the multi-component fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GsfTrack {
    pub pt_mode: f64,
    pub eta_mode: f64,
    pub p_mode: f64,
    pub pt_mode_error: f64,
    pub normalized_chi2: f64,
}

impl GsfTrack {
    pub fn new(pt_mode: f64, eta_mode: f64, p_mode: f64, pt_mode_error: f64, normalized_chi2: f64) -> Self {
        GsfTrack {
            pt_mode,
            eta_mode,
            p_mode,
            pt_mode_error,
            normalized_chi2,
        }
    }
}

/// Fit results of a Kalman-filter track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub normalized_chi2: f64,
    pub tracker_layers_with_measurement: u32,
}

impl Track {
    pub fn new(normalized_chi2: f64, tracker_layers_with_measurement: u32) -> Self {
        Track {
            normalized_chi2,
            tracker_layers_with_measurement,
        }
    }
}
