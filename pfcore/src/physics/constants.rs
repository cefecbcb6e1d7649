// Purpose: To store constants that are used in the program
pub const MASS_ELECTRON_GEV: f64 = 0.00051; // GeV/c^2, value used by the PF electron chain
pub const MASS_MUON_GEV: f64 = 0.1056583755; // GeV/c^2
pub const MASS_PION_GEV: f64 = 0.13957039; // GeV/c^2, charged pion
pub const MASS_PROTON_GEV: f64 = 0.93827208816; // GeV/c^2
