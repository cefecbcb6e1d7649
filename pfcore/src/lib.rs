// physics module
pub mod physics {
    pub mod constants;
    pub mod kinematics;
}

// data module
pub mod data {
    pub mod refs;
    pub mod track;
    pub mod candidate;
    pub mod electron_extra;
}
