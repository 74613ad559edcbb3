//! Fatal errors raised by the reconciliation core

/// Errors that abort a reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// No row in the sheet carries every required label
    HeaderNotFound { sheet: String, required: Vec<String> },
    /// The workbook has no sheet with the expected name
    SheetNotFound { sheet: String },
    /// Header row matched but the manager-name column is not left of business area
    StructuralAssertion {
        manager_column: usize,
        business_area_column: usize,
    },
    /// A label expected in a matched header row could not be resolved
    MissingColumn { label: String },
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::HeaderNotFound { sheet, required } => write!(
                f,
                "no valid header row found in {:?} (required: {})",
                sheet,
                required.join(", ")
            ),
            RosterError::SheetNotFound { sheet } => write!(f, "sheet {:?} not found", sheet),
            RosterError::StructuralAssertion {
                manager_column,
                business_area_column,
            } => write!(
                f,
                "invalid ALLOPS header: 'manager - name' (column {}) must come before \
                 'business area' (column {})",
                manager_column + 1,
                business_area_column + 1
            ),
            RosterError::MissingColumn { label } => {
                write!(f, "column {:?} missing from header row", label)
            }
        }
    }
}

impl std::error::Error for RosterError {}
