use std::fmt;

/// The fixed subject taxonomy.
///
/// Labels double as the on-disk folder names and the values stored in the
/// `subject` column, so changing a label orphans existing uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Physics,
    Chemistry,
    Biology,
    HigherMath,
    Bangla,
    Ict,
    English,
}

impl Subject {
    /// All subjects in upload-form order.
    pub const ALL: [Subject; 7] = [
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::HigherMath,
        Subject::Bangla,
        Subject::Ict,
        Subject::English,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Subject::Physics => "Phy.",
            Subject::Chemistry => "Chem.",
            Subject::Biology => "Bio.",
            Subject::HigherMath => "HM",
            Subject::Bangla => "Bang.",
            Subject::Ict => "ICT",
            Subject::English => "Eng.",
        }
    }

    pub fn from_label(label: &str) -> Option<Subject> {
        Subject::ALL.iter().copied().find(|s| s.label() == label)
    }

    /// Comma-separated list of valid labels, for error messages.
    pub fn labels_joined() -> String {
        Subject::ALL
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
