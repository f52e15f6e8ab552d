//! Repair and delivery workflow stages.
//!
//! Both stage sets are closed and ordered. The order drives progress
//! display only; no transition rules are enforced here, so any stage may be
//! written over any other. Database rows and query parameters carry stages
//! as plain strings, which is why the string predicates
//! ([`is_repair_stage`], [`is_delivery_stage`]) sit next to the enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Enum generator
// ---------------------------------------------------------------------------

/// Define a closed stage enum backed by exact `snake_case` string values.
///
/// Variants are listed in flow order; the first one is the default.
macro_rules! define_stage_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal, $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $value)] $variant ),+
        }

        impl $name {
            /// Every variant, in flow order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Every database string value, in flow order.
            pub const VALUES: &'static [&'static str] = &[$( $value ),+];

            /// Convert to the database string value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $value ),+
                }
            }

            /// Parse a stage string from the database or a request.
            ///
            /// Matching is exact and case-sensitive.
            pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
                match s {
                    $( $value => Ok(Self::$variant), )+
                    _ => Err(CoreError::Validation(format!(
                        "Invalid {} stage '{s}'. Must be one of: {}",
                        $kind,
                        Self::VALUES.join(", ")
                    ))),
                }
            }

            /// Human-readable label for dashboards.
            pub fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }

            /// Zero-based index of this stage in flow order.
            pub fn position(self) -> usize {
                self as usize
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_str_db(s)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Repair stages
// ---------------------------------------------------------------------------

define_stage_enum! {
    /// Lifecycle position of a device-repair job.
    RepairStage("repair") {
        /// Booked, no technician yet.
        PendingAssignment => "pending_assignment", "Pending assignment",
        Diagnostics => "diagnostics", "Diagnostics",
        WaitingForParts => "waiting_for_parts", "Waiting for parts",
        InProgress => "in_progress", "In progress",
        QualityCheck => "quality_check", "Quality check",
        ReadyForDelivery => "ready_for_delivery", "Ready for delivery",
        Completed => "completed", "Completed",
        Cancelled => "cancelled", "Cancelled",
    }
}

/// All valid repair stage strings, in flow order.
pub const REPAIR_STAGES: &[&str] = RepairStage::VALUES;

/// Repair stages counted as in-flight work.
///
/// Flow order minus `pending_assignment` and `cancelled`.
pub const ACTIVE_REPAIR_STAGES: &[RepairStage] = &[
    RepairStage::Diagnostics,
    RepairStage::WaitingForParts,
    RepairStage::InProgress,
    RepairStage::QualityCheck,
    RepairStage::ReadyForDelivery,
    RepairStage::Completed,
];

impl RepairStage {
    /// Whether this stage counts as in-flight work on dashboards.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::PendingAssignment | Self::Cancelled)
    }

    /// Whether the job has reached an end state.
    ///
    /// Informational only: nothing prevents a job from leaving these stages.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Returns true iff `value` is exactly one of the repair stage strings.
pub fn is_repair_stage(value: &str) -> bool {
    REPAIR_STAGES.contains(&value)
}

/// The in-flight repair stages, in flow order.
pub fn active_repair_stages() -> &'static [RepairStage] {
    ACTIVE_REPAIR_STAGES
}

/// Validate that a string is a repair stage.
pub fn validate_repair_stage(value: &str) -> Result<(), CoreError> {
    RepairStage::from_str_db(value).map(|_| ())
}

// ---------------------------------------------------------------------------
// Delivery stages
// ---------------------------------------------------------------------------

define_stage_enum! {
    /// Logistics state of the courier leg attached to a repair job.
    DeliveryStage("delivery") {
        /// The customer drops off and collects the device in person.
        NotRequired => "not_required", "Not required",
        PendingAssignment => "pending_assignment", "Pending assignment",
        PickupScheduled => "pickup_scheduled", "Pickup scheduled",
        PickedUp => "picked_up", "Picked up",
        DeliveredToService => "delivered_to_service", "Delivered to service",
        ReadyForReturn => "ready_for_return", "Ready for return",
        OutForDelivery => "out_for_delivery", "Out for delivery",
        Delivered => "delivered", "Delivered",
        Cancelled => "cancelled", "Cancelled",
    }
}

/// All valid delivery stage strings, in flow order.
pub const DELIVERY_STAGES: &[&str] = DeliveryStage::VALUES;

impl DeliveryStage {
    /// Starting stage for a new booking.
    pub fn initial(delivery_required: bool) -> Self {
        if delivery_required {
            Self::PendingAssignment
        } else {
            Self::NotRequired
        }
    }

    /// Whether the courier leg has reached an end state. Informational only.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// Returns true iff `value` is exactly one of the delivery stage strings.
pub fn is_delivery_stage(value: &str) -> bool {
    DELIVERY_STAGES.contains(&value)
}

/// Validate that a string is a delivery stage.
pub fn validate_delivery_stage(value: &str) -> Result<(), CoreError> {
    DeliveryStage::from_str_db(value).map(|_| ())
}

// ---------------------------------------------------------------------------
// Stage kind
// ---------------------------------------------------------------------------

/// Which of the two stage sets a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Repair,
    Delivery,
}

impl StageKind {
    /// Parse a kind string from a request.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "repair" => Ok(Self::Repair),
            "delivery" => Ok(Self::Delivery),
            _ => Err(CoreError::Validation(format!(
                "Invalid stage kind '{s}'. Must be one of: repair, delivery"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Repair => "repair",
            Self::Delivery => "delivery",
        }
    }

    /// Membership test against this kind's stage set.
    pub fn contains(self, value: &str) -> bool {
        match self {
            Self::Repair => is_repair_stage(value),
            Self::Delivery => is_delivery_stage(value),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn all_repair_stages_are_valid() {
        for s in REPAIR_STAGES {
            assert!(is_repair_stage(s), "Stage '{s}' should be a repair stage");
        }
        assert_eq!(REPAIR_STAGES.len(), 8);
    }

    #[test]
    fn unknown_repair_stages_are_invalid() {
        assert!(!is_repair_stage(""));
        assert!(!is_repair_stage("unknown"));
        assert!(!is_repair_stage("DIAGNOSTICS"));
        assert!(!is_repair_stage(" diagnostics"));
        assert!(!is_repair_stage("pickup_scheduled"));
    }

    #[test]
    fn all_delivery_stages_are_valid() {
        for s in DELIVERY_STAGES {
            assert!(is_delivery_stage(s), "Stage '{s}' should be a delivery stage");
        }
        assert_eq!(DELIVERY_STAGES.len(), 9);
    }

    #[test]
    fn unknown_delivery_stages_are_invalid() {
        assert!(!is_delivery_stage(""));
        assert!(!is_delivery_stage("unknown"));
        assert!(!is_delivery_stage("Delivered"));
        assert!(!is_delivery_stage("in_progress"));
    }

    #[test]
    fn quality_check_is_repair_only() {
        assert!(is_repair_stage("quality_check"));
        assert!(!is_delivery_stage("quality_check"));
    }

    #[test]
    fn cancelled_is_shared_but_not_active() {
        assert!(is_repair_stage("cancelled"));
        assert!(is_delivery_stage("cancelled"));
        assert!(!active_repair_stages().contains(&RepairStage::Cancelled));
    }

    #[test]
    fn active_stages_are_the_six_in_flight_stages() {
        let active: Vec<&str> = active_repair_stages().iter().map(|s| s.as_str()).collect();
        assert_eq!(
            active,
            vec![
                "diagnostics",
                "waiting_for_parts",
                "in_progress",
                "quality_check",
                "ready_for_delivery",
                "completed",
            ]
        );
    }

    #[test]
    fn active_list_matches_is_active_in_flow_order() {
        let derived: Vec<RepairStage> = RepairStage::ALL
            .iter()
            .copied()
            .filter(|s| s.is_active())
            .collect();
        assert_eq!(derived, ACTIVE_REPAIR_STAGES);
    }

    #[test]
    fn predicates_are_stable_across_calls() {
        for _ in 0..3 {
            assert!(is_repair_stage("in_progress"));
            assert!(!is_delivery_stage("in_progress"));
            assert_eq!(active_repair_stages().len(), 6);
        }
    }

    #[test]
    fn enum_and_string_forms_agree() {
        for (stage, value) in RepairStage::ALL.iter().zip(REPAIR_STAGES) {
            assert_eq!(stage.as_str(), *value);
            assert_eq!(RepairStage::from_str_db(value).unwrap(), *stage);
        }
        for (stage, value) in DeliveryStage::ALL.iter().zip(DELIVERY_STAGES) {
            assert_eq!(stage.as_str(), *value);
            assert_eq!(value.parse::<DeliveryStage>().unwrap(), *stage);
        }
    }

    #[test]
    fn positions_follow_flow_order() {
        assert_eq!(RepairStage::PendingAssignment.position(), 0);
        assert_eq!(RepairStage::QualityCheck.position(), 4);
        assert_eq!(RepairStage::Cancelled.position(), 7);
        assert_eq!(DeliveryStage::NotRequired.position(), 0);
        assert_eq!(DeliveryStage::Cancelled.position(), 8);
    }

    #[test]
    fn defaults_are_first_stage() {
        assert_eq!(RepairStage::default(), RepairStage::PendingAssignment);
        assert_eq!(DeliveryStage::default(), DeliveryStage::NotRequired);
    }

    #[test]
    fn initial_delivery_stage_depends_on_booking() {
        assert_eq!(DeliveryStage::initial(true), DeliveryStage::PendingAssignment);
        assert_eq!(DeliveryStage::initial(false), DeliveryStage::NotRequired);
    }

    #[test]
    fn terminal_stages() {
        assert!(RepairStage::Completed.is_terminal());
        assert!(RepairStage::Cancelled.is_terminal());
        assert!(!RepairStage::QualityCheck.is_terminal());
        assert!(DeliveryStage::Delivered.is_terminal());
        assert!(!DeliveryStage::OutForDelivery.is_terminal());
    }

    #[test]
    fn from_str_db_rejects_wrong_case() {
        let err = RepairStage::from_str_db("Completed").unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.contains("Invalid repair stage"));
    }

    #[test]
    fn validate_helpers_agree_with_predicates() {
        for s in ["", "completed", "picked_up", "cancelled", "not_required"] {
            assert_eq!(validate_repair_stage(s).is_ok(), is_repair_stage(s));
            assert_eq!(validate_delivery_stage(s).is_ok(), is_delivery_stage(s));
        }
    }

    #[test]
    fn serde_uses_database_strings() {
        let json = serde_json::to_string(&RepairStage::WaitingForParts).unwrap();
        assert_eq!(json, "\"waiting_for_parts\"");
        let parsed: DeliveryStage = serde_json::from_str("\"delivered_to_service\"").unwrap();
        assert_eq!(parsed, DeliveryStage::DeliveredToService);
        assert!(serde_json::from_str::<RepairStage>("\"DIAGNOSTICS\"").is_err());
    }

    #[test]
    fn stage_kind_routes_to_matching_set() {
        assert!(StageKind::Repair.contains("quality_check"));
        assert!(!StageKind::Delivery.contains("quality_check"));
        assert_matches!(StageKind::from_str_db("repair"), Ok(StageKind::Repair));
        assert_matches!(StageKind::from_str_db("Repair"), Err(CoreError::Validation(_)));
    }
}
