//! Operation identifiers shared across provider contracts.
//!
//! Identifiers are a closed set so a typo in a catalog fails to compile, and
//! an unknown token in JSON or on the command line fails at parse time.
//!
//! Wire form is SCREAMING_SNAKE_CASE: `GET_TEST_CASES`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::diagnostics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Authenticate,
    GetProjects,
    GetProject,
    GetUsers,
    GetCustomFields,
    GetFolders,
    GetModules,
    GetTestCases,
    GetTestCase,
    GetTestSteps,
    GetTestCycles,
    GetTestRuns,
    GetTestExecutions,
    GetAttachments,
    CreateFolder,
    CreateTestCase,
    CreateTestCycle,
    CreateTestRun,
    CreateTestExecution,
    UploadAttachment,
}

impl OperationType {
    pub const ALL: [OperationType; 20] = [
        OperationType::Authenticate,
        OperationType::GetProjects,
        OperationType::GetProject,
        OperationType::GetUsers,
        OperationType::GetCustomFields,
        OperationType::GetFolders,
        OperationType::GetModules,
        OperationType::GetTestCases,
        OperationType::GetTestCase,
        OperationType::GetTestSteps,
        OperationType::GetTestCycles,
        OperationType::GetTestRuns,
        OperationType::GetTestExecutions,
        OperationType::GetAttachments,
        OperationType::CreateFolder,
        OperationType::CreateTestCase,
        OperationType::CreateTestCycle,
        OperationType::CreateTestRun,
        OperationType::CreateTestExecution,
        OperationType::UploadAttachment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Authenticate => "AUTHENTICATE",
            OperationType::GetProjects => "GET_PROJECTS",
            OperationType::GetProject => "GET_PROJECT",
            OperationType::GetUsers => "GET_USERS",
            OperationType::GetCustomFields => "GET_CUSTOM_FIELDS",
            OperationType::GetFolders => "GET_FOLDERS",
            OperationType::GetModules => "GET_MODULES",
            OperationType::GetTestCases => "GET_TEST_CASES",
            OperationType::GetTestCase => "GET_TEST_CASE",
            OperationType::GetTestSteps => "GET_TEST_STEPS",
            OperationType::GetTestCycles => "GET_TEST_CYCLES",
            OperationType::GetTestRuns => "GET_TEST_RUNS",
            OperationType::GetTestExecutions => "GET_TEST_EXECUTIONS",
            OperationType::GetAttachments => "GET_ATTACHMENTS",
            OperationType::CreateFolder => "CREATE_FOLDER",
            OperationType::CreateTestCase => "CREATE_TEST_CASE",
            OperationType::CreateTestCycle => "CREATE_TEST_CYCLE",
            OperationType::CreateTestRun => "CREATE_TEST_RUN",
            OperationType::CreateTestExecution => "CREATE_TEST_EXECUTION",
            OperationType::UploadAttachment => "UPLOAD_ATTACHMENT",
        }
    }

    /// True for operations that write into the target system.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            OperationType::CreateFolder
                | OperationType::CreateTestCase
                | OperationType::CreateTestCycle
                | OperationType::CreateTestRun
                | OperationType::CreateTestExecution
                | OperationType::UploadAttachment
        )
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        OperationType::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == wanted)
            .ok_or_else(|| {
                anyhow::anyhow!(diagnostics::error_message(format!(
                    "unknown operation type: {}",
                    s
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_matches_wire_form() {
        for op in OperationType::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op));
        }
    }

    #[test]
    fn parse_accepts_kebab_and_lowercase() {
        assert_eq!(
            "get-test-cases".parse::<OperationType>().unwrap(),
            OperationType::GetTestCases
        );
        assert_eq!(
            "AUTHENTICATE".parse::<OperationType>().unwrap(),
            OperationType::Authenticate
        );
    }

    #[test]
    fn parse_rejects_unknown_token() {
        let err = "DELETE_EVERYTHING".parse::<OperationType>().unwrap_err();
        assert!(err.to_string().contains("DELETE_EVERYTHING"));
    }

    #[test]
    fn unknown_token_fails_deserialization() {
        let res: Result<OperationType, _> = serde_json::from_str("\"X\"");
        assert!(res.is_err());
    }

    #[test]
    fn write_operations() {
        assert!(OperationType::CreateTestCase.is_write());
        assert!(!OperationType::GetTestCases.is_write());
    }
}
