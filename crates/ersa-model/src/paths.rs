//! Parameter paths used by the generator.
//!
//! A path is a pipe-delimited segment sequence matching the `variable` text of
//! a `ProgramParameter` node in the template. These literals must match the
//! machine's own addressing exactly.

/// PCB length setpoint.
pub const PCB_LENGTH: &str = "enmProg|enmPcb|enmSngSollLaenge";

/// Conveyor width axis setpoint (PCB width).
pub const CONVEYOR_WIDTH: &str = "enmProg|enmA_AxBr|1|enmSngSoll";

/// CBS mid-board support width setpoint.
pub const CBS_WIDTH: &str = "enmProg|enmA_Tr|1|enmSngSoll";

/// CBS mid-board support enable flag.
pub const CBS_ACTIVE: &str = "enmProg|enmA_Tr|1|enmBlnSollAktiv";

/// Park position enable flag on the middle axis.
pub const PARK_ACTIVE: &str = "enmProg|enmA_AxMu|1|enmBlnParkPosSollAktiv";
