//! Static registry of the tables users can edit through the form screen.
//!
//! The database holds ten tables, but only four of them are exposed for
//! interactive data entry. Each registered table carries an explicit,
//! ordered column list: the form builder walks this list to generate one
//! input per column, and the record writer walks the same list to pair
//! every value with its column name. Surrogate primary keys are not
//! listed because the database assigns them on insert.

use std::fmt;

/// Declared SQLite affinity of a registered column.
///
/// The registry only distinguishes the two affinities the schema uses.
/// Nothing upstream validates input against this; it is shown next to
/// the field label so users know what the store expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// `INTEGER` affinity.
    Integer,
    /// `TEXT` affinity.
    Text,
}

impl ColumnType {
    /// Short uppercase tag rendered alongside column names in the UI.
    pub fn label(self) -> &'static str {
        match self {
            ColumnType::Integer => "INT",
            ColumnType::Text => "TEXT",
        }
    }
}

/// One editable column of a registered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name exactly as it appears in the schema.
    pub name: &'static str,
    /// Declared affinity, used for field labeling only.
    pub column_type: ColumnType,
}

/// A user-entered value paired with the column it belongs to.
///
/// `None` means the field was left blank and should be stored as SQL
/// NULL rather than an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnValue {
    /// Name of the column this value targets.
    pub column: &'static str,
    /// The text to bind, or `None` for NULL.
    pub value: Option<String>,
}

/// The tables available for interactive data entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Department,
    Professor,
    Student,
    Course,
}

const DEPARTMENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { name: "dep_name", column_type: ColumnType::Text },
    ColumnSpec { name: "head_id", column_type: ColumnType::Integer },
];

const PROFESSOR_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { name: "f_name", column_type: ColumnType::Text },
    ColumnSpec { name: "last_name", column_type: ColumnType::Text },
    ColumnSpec { name: "email", column_type: ColumnType::Text },
    ColumnSpec { name: "phonenumber", column_type: ColumnType::Text },
];

const STUDENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { name: "f_name", column_type: ColumnType::Text },
    ColumnSpec { name: "last_name", column_type: ColumnType::Text },
    ColumnSpec { name: "address", column_type: ColumnType::Text },
    ColumnSpec { name: "date_of_birth", column_type: ColumnType::Text },
    ColumnSpec { name: "email", column_type: ColumnType::Text },
    ColumnSpec { name: "total_credit_hours", column_type: ColumnType::Integer },
    ColumnSpec { name: "status", column_type: ColumnType::Text },
    ColumnSpec { name: "ssn", column_type: ColumnType::Text },
    ColumnSpec { name: "dep_id", column_type: ColumnType::Integer },
];

const COURSE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { name: "title", column_type: ColumnType::Text },
    ColumnSpec { name: "credit_hours", column_type: ColumnType::Integer },
    ColumnSpec { name: "course_code", column_type: ColumnType::Text },
    ColumnSpec { name: "dep_id", column_type: ColumnType::Integer },
];

impl TableKind {
    /// Every registered table, in the order the picker lists them.
    pub const ALL: [TableKind; 4] = [
        TableKind::Department,
        TableKind::Professor,
        TableKind::Student,
        TableKind::Course,
    ];

    /// Table name exactly as it appears in the schema, safe to splice
    /// into SQL because it comes from this fixed enum.
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Department => "Department",
            TableKind::Professor => "Professor",
            TableKind::Student => "Student",
            TableKind::Course => "Course",
        }
    }

    /// Ordered editable columns. Form fields and insert statements both
    /// derive from this list, so they can never disagree on order.
    pub fn columns(self) -> &'static [ColumnSpec] {
        match self {
            TableKind::Department => DEPARTMENT_COLUMNS,
            TableKind::Professor => PROFESSOR_COLUMNS,
            TableKind::Student => STUDENT_COLUMNS,
            TableKind::Course => COURSE_COLUMNS,
        }
    }
}

/// Renders the schema name so the enum plays nicely with display widgets.
impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
