//! Audit logger and approval gate
//!
//! Every calculation is recorded in an append-only log before the
//! price is released; the store exposes no update or delete API, and
//! the record type itself is write-once (see `models::audit`). The
//! approval gate turns large price swings into a workflow signal, not
//! an error.

use crate::models::{ApprovalLevel, ApprovalRequirement, ApprovalRules, PriceCalculation,
    PriceChange, PriceLog};
use crate::util::snowflake_id;

/// Append-only audit trail for price calculations.
///
/// Records can be appended and read, never changed or removed. The
/// caller's storage layer persists entries asynchronously after the
/// calculation returns.
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: Vec<PriceLog>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a calculation. Assigns a unique id and stamps the record
    /// with the caller-supplied timestamp (Unix millis), then returns a
    /// borrow of the stored entry.
    pub fn log_price_calculation(
        &mut self,
        calculation: PriceCalculation,
        timestamp_ms: i64,
    ) -> &PriceLog {
        let record = PriceLog::new(snowflake_id(), timestamp_ms, calculation);
        tracing::debug!(id = record.id(), "price calculation recorded");
        self.entries.push(record);
        self.entries.last().expect("entry just pushed")
    }

    pub fn entries(&self) -> &[PriceLog] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decide whether a price change needs human approval.
///
/// Percent change is `|new - old| / old * 100`. Below the auto-approve
/// threshold no approval is needed; between the thresholds one approver
/// suffices; above the upper threshold the change escalates to multiple
/// approvers. A change with no prior price always escalates.
pub fn determine_approval_requirements(
    change: &PriceChange,
    rules: &ApprovalRules,
) -> ApprovalRequirement {
    let Some(percent) = change.percent_change() else {
        return ApprovalRequirement {
            required: true,
            level: ApprovalLevel::Multiple,
            reason: Some("no prior price to compare against".to_string()),
        };
    };

    if percent < rules.auto_approve_threshold {
        return ApprovalRequirement {
            required: false,
            level: ApprovalLevel::None,
            reason: None,
        };
    }

    if percent <= rules.requires_approval_threshold {
        return ApprovalRequirement {
            required: true,
            level: ApprovalLevel::Single,
            reason: Some(format!(
                "price change of {:.1}% exceeds the {:.1}% auto-approve threshold",
                percent, rules.auto_approve_threshold
            )),
        };
    }

    ApprovalRequirement {
        required: true,
        level: ApprovalLevel::Multiple,
        reason: Some(format!(
            "price change of {:.1}% exceeds the {:.1}% approval threshold",
            percent, rules.requires_approval_threshold
        )),
    }
}
