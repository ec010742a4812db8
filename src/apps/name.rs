use std::fmt;

/// Closed set of applications the launcher can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationName {
    ConvertState,
    ErrorCovarianceToolbox,
    HofX4D,
    LocalEnsembleDa,
    Variational,
}

impl ApplicationName {
    pub const ALL: [ApplicationName; 5] = [
        ApplicationName::ConvertState,
        ApplicationName::ErrorCovarianceToolbox,
        ApplicationName::HofX4D,
        ApplicationName::LocalEnsembleDa,
        ApplicationName::Variational,
    ];

    /// Canonical lowercase command-line token.
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationName::ConvertState => "convertstate",
            ApplicationName::ErrorCovarianceToolbox => "bump",
            ApplicationName::HofX4D => "hofx4d",
            ApplicationName::LocalEnsembleDa => "localensembleda",
            ApplicationName::Variational => "variational",
        }
    }

    /// Case-insensitive lookup of a command-line token.
    pub fn parse(token: &str) -> Option<Self> {
        let folded = token.to_ascii_lowercase();
        Self::ALL.into_iter().find(|app| app.as_str() == folded)
    }
}

impl fmt::Display for ApplicationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_ignores_case() {
        for token in ["BUMP", "Bump", "bump", "bUmP"] {
            assert_eq!(
                ApplicationName::parse(token),
                Some(ApplicationName::ErrorCovarianceToolbox)
            );
        }
        assert_eq!(
            ApplicationName::parse("LocalEnsembleDA"),
            Some(ApplicationName::LocalEnsembleDa)
        );
    }

    #[test]
    fn canonical_names_round_trip() {
        for app in ApplicationName::ALL {
            assert_eq!(ApplicationName::parse(app.as_str()), Some(app));
            assert_eq!(app.to_string(), app.as_str());
        }
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(ApplicationName::parse("bogus"), None);
        assert_eq!(ApplicationName::parse(""), None);
        assert_eq!(ApplicationName::parse("convert-state"), None);
    }
}
