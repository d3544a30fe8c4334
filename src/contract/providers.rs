//! Built-in provider catalogs.
//!
//! Every catalog is rooted at AUTHENTICATE and only references operations it
//! defines itself.

use super::{ParameterValidator, ProviderApiContract, ProviderId};
use crate::Result;
use crate::operation::OperationDefinition as Op;
use crate::operation::OperationType::*;

use std::collections::BTreeMap;

pub(super) fn build(provider: ProviderId) -> Result<ProviderApiContract> {
    match provider {
        ProviderId::Zephyr => zephyr(),
        ProviderId::Qtest => qtest(),
        ProviderId::AzureDevops => azure_devops(),
        ProviderId::Rally => rally(),
        ProviderId::Testrail => testrail(),
        ProviderId::Jama => jama(),
    }
}

fn rules(entries: Vec<(&str, ParameterValidator)>) -> BTreeMap<String, ParameterValidator> {
    entries
        .into_iter()
        .map(|(name, rule)| (name.to_string(), rule))
        .collect()
}

fn zephyr() -> Result<ProviderApiContract> {
    let operations = vec![
        Op::new(Authenticate, "Authenticate against Zephyr Scale with an API token")
            .required()
            .params(&["baseUrl", "apiToken"])
            .cost(0.5),
        Op::new(GetProjects, "List Jira projects visible to Zephyr")
            .depends_on([Authenticate])
            .required()
            .cost(1.0),
        Op::new(GetFolders, "List the test case folder tree of a project")
            .depends_on([GetProjects])
            .params(&["projectKey"]),
        Op::new(GetTestCases, "Page through test cases of a project")
            .depends_on([GetProjects, GetFolders])
            .required()
            .params(&["projectKey"])
            .cost(5.0),
        Op::new(GetTestSteps, "Fetch the test script of a test case")
            .depends_on([GetTestCases])
            .params(&["testCaseKey"]),
        Op::new(GetTestCycles, "List test cycles of a project")
            .depends_on([GetProjects])
            .params(&["projectKey"]),
        Op::new(GetTestExecutions, "List executions recorded against test cycles")
            .depends_on([GetTestCycles, GetTestCases])
            .params(&["projectKey"])
            .cost(4.0),
        Op::new(GetAttachments, "Download attachments of a test case")
            .depends_on([GetTestCases])
            .params(&["testCaseKey"])
            .cost(8.0),
        Op::new(CreateFolder, "Create a test case folder")
            .depends_on([GetProjects])
            .params(&["projectKey", "name"]),
        Op::new(CreateTestCase, "Create a test case")
            .depends_on([GetProjects, CreateFolder])
            .required()
            .params(&["projectKey", "name"]),
        Op::new(CreateTestCycle, "Create a test cycle")
            .depends_on([GetProjects])
            .params(&["projectKey", "name"]),
        Op::new(CreateTestExecution, "Record an execution of a test case in a cycle")
            .depends_on([CreateTestCycle, CreateTestCase])
            .params(&["projectKey", "testCaseKey", "testCycleKey"]),
        Op::new(UploadAttachment, "Attach a file to a test case")
            .depends_on([CreateTestCase])
            .params(&["testCaseKey"]),
    ];

    ProviderApiContract::new(
        ProviderId::Zephyr,
        operations,
        rules(vec![
            ("baseUrl", ParameterValidator::pattern(r"^https?://")?),
            ("apiToken", ParameterValidator::NonEmpty),
            ("projectKey", ParameterValidator::pattern(r"^[A-Z][A-Z0-9_]+$")?),
            ("testCaseKey", ParameterValidator::pattern(r"^[A-Z][A-Z0-9_]+-T\d+$")?),
            ("testCycleKey", ParameterValidator::pattern(r"^[A-Z][A-Z0-9_]+-R\d+$")?),
        ]),
    )
}

fn qtest() -> Result<ProviderApiContract> {
    let operations = vec![
        Op::new(Authenticate, "Exchange credentials for a qTest bearer token")
            .required()
            .params(&["instanceUrl", "apiToken"])
            .cost(0.5),
        Op::new(GetProjects, "List qTest projects")
            .depends_on([Authenticate])
            .required(),
        Op::new(GetModules, "List the module tree of a project")
            .depends_on([GetProjects])
            .params(&["projectId"]),
        Op::new(GetTestCases, "Page through test cases of a project")
            .depends_on([GetModules])
            .required()
            .params(&["projectId"])
            .cost(5.0),
        Op::new(GetTestCase, "Fetch one test case with its steps")
            .depends_on([GetTestCases])
            .params(&["projectId", "testCaseId"]),
        Op::new(GetTestCycles, "List test cycles of a project")
            .depends_on([GetProjects])
            .params(&["projectId"]),
        Op::new(GetTestRuns, "List test runs under a test cycle")
            .depends_on([GetTestCycles])
            .params(&["projectId"]),
        Op::new(GetTestExecutions, "List test logs of a test run")
            .depends_on([GetTestRuns])
            .params(&["projectId"])
            .cost(4.0),
        Op::new(GetAttachments, "Download attachments of a test case")
            .depends_on([GetTestCases])
            .params(&["projectId", "testCaseId"])
            .cost(8.0),
        Op::new(CreateTestCase, "Create a test case under a module")
            .depends_on([GetModules])
            .required()
            .params(&["projectId", "moduleId", "name"]),
        Op::new(CreateTestCycle, "Create a test cycle")
            .depends_on([GetProjects])
            .params(&["projectId", "name"]),
        Op::new(CreateTestRun, "Create a test run linking a case to a cycle")
            .depends_on([CreateTestCycle, CreateTestCase])
            .params(&["projectId", "testCaseId"]),
        Op::new(CreateTestExecution, "Submit a test log for a test run")
            .depends_on([CreateTestRun])
            .params(&["projectId", "testRunId"]),
        Op::new(UploadAttachment, "Attach a file to a test case")
            .depends_on([CreateTestCase])
            .params(&["projectId", "testCaseId"]),
    ];

    ProviderApiContract::new(
        ProviderId::Qtest,
        operations,
        rules(vec![
            ("instanceUrl", ParameterValidator::pattern(r"^https?://")?),
            ("apiToken", ParameterValidator::NonEmpty),
            ("projectId", ParameterValidator::PositiveInteger),
            ("moduleId", ParameterValidator::PositiveInteger),
            ("testCaseId", ParameterValidator::PositiveInteger),
            ("testRunId", ParameterValidator::PositiveInteger),
        ]),
    )
}

fn azure_devops() -> Result<ProviderApiContract> {
    let operations = vec![
        Op::new(Authenticate, "Validate a personal access token for the organization")
            .required()
            .params(&["organization", "personalAccessToken"]),
        Op::new(GetProjects, "List team projects of the organization")
            .depends_on([Authenticate])
            .required()
            .params(&["organization"]),
        Op::new(GetTestCases, "Query Test Case work items of a project")
            .depends_on([GetProjects])
            .required()
            .params(&["organization", "project"])
            .cost(5.0),
        Op::new(GetTestSteps, "Read the steps field of a Test Case work item")
            .depends_on([GetTestCases])
            .params(&["organization", "project"]),
        Op::new(GetTestRuns, "List test runs of a project")
            .depends_on([GetProjects])
            .params(&["organization", "project"]),
        Op::new(GetTestExecutions, "List results of a test run")
            .depends_on([GetTestRuns])
            .params(&["organization", "project", "runId"]),
        Op::new(CreateTestCase, "Create a Test Case work item")
            .depends_on([GetProjects])
            .required()
            .params(&["organization", "project", "title"]),
        Op::new(CreateTestRun, "Create a test run")
            .depends_on([GetProjects])
            .params(&["organization", "project", "name"]),
        Op::new(CreateTestExecution, "Add results to a test run")
            .depends_on([CreateTestRun, CreateTestCase])
            .params(&["organization", "project", "runId"]),
        Op::new(UploadAttachment, "Upload an attachment and link it to a work item")
            .depends_on([CreateTestCase])
            .params(&["organization", "project"]),
    ];

    ProviderApiContract::new(
        ProviderId::AzureDevops,
        operations,
        rules(vec![
            ("organization", ParameterValidator::NonEmpty),
            ("project", ParameterValidator::NonEmpty),
            ("personalAccessToken", ParameterValidator::NonEmpty),
            ("runId", ParameterValidator::PositiveInteger),
        ]),
    )
}

fn rally() -> Result<ProviderApiContract> {
    let operations = vec![
        Op::new(Authenticate, "Validate a Rally API key")
            .required()
            .params(&["apiKey"]),
        Op::new(GetProjects, "List projects of a workspace")
            .depends_on([Authenticate])
            .required()
            .params(&["workspace"]),
        Op::new(GetFolders, "List test folders of a project")
            .depends_on([GetProjects])
            .params(&["workspace", "project"]),
        Op::new(GetTestCases, "Query test cases of a project")
            .depends_on([GetProjects, GetFolders])
            .required()
            .params(&["workspace", "project"])
            .cost(5.0),
        Op::new(GetTestExecutions, "Query test case results")
            .depends_on([GetTestCases])
            .params(&["workspace", "project"]),
        Op::new(GetAttachments, "Download attachments of a test case")
            .depends_on([GetTestCases])
            .params(&["workspace"])
            .cost(8.0),
        Op::new(CreateFolder, "Create a test folder")
            .depends_on([GetProjects])
            .params(&["workspace", "project", "name"]),
        Op::new(CreateTestCase, "Create a test case")
            .depends_on([GetProjects])
            .required()
            .params(&["workspace", "project", "name"]),
        Op::new(CreateTestExecution, "Create a test case result")
            .depends_on([CreateTestCase])
            .params(&["workspace", "build", "verdict"]),
        Op::new(UploadAttachment, "Attach a file to a test case")
            .depends_on([CreateTestCase])
            .params(&["workspace"]),
    ];

    ProviderApiContract::new(
        ProviderId::Rally,
        operations,
        rules(vec![
            ("apiKey", ParameterValidator::NonEmpty),
            ("workspace", ParameterValidator::pattern(r"^/workspace/\d+$")?),
            ("project", ParameterValidator::pattern(r"^/project/\d+$")?),
            (
                "verdict",
                ParameterValidator::pattern(r"^(Pass|Fail|Blocked|Error|Inconclusive)$")?,
            ),
        ]),
    )
}

fn testrail() -> Result<ProviderApiContract> {
    let operations = vec![
        Op::new(Authenticate, "Check basic-auth credentials against the TestRail API")
            .required()
            .params(&["baseUrl", "username", "apiKey"]),
        Op::new(GetProjects, "List TestRail projects")
            .depends_on([Authenticate])
            .required(),
        Op::new(GetCustomFields, "List case custom fields")
            .depends_on([Authenticate]),
        Op::new(GetFolders, "List sections of a suite")
            .depends_on([GetProjects])
            .params(&["projectId", "suiteId"]),
        Op::new(GetTestCases, "List cases of a suite")
            .depends_on([GetFolders, GetCustomFields])
            .required()
            .params(&["projectId", "suiteId"])
            .cost(5.0),
        Op::new(GetTestRuns, "List runs of a project")
            .depends_on([GetProjects])
            .params(&["projectId"]),
        Op::new(GetTestExecutions, "List results of a run")
            .depends_on([GetTestRuns])
            .params(&["runId"]),
        Op::new(CreateFolder, "Add a section")
            .depends_on([GetProjects])
            .params(&["projectId", "suiteId", "name"]),
        Op::new(CreateTestCase, "Add a case to a section")
            .depends_on([CreateFolder, GetCustomFields])
            .required()
            .params(&["sectionId", "title"]),
        Op::new(CreateTestRun, "Add a run")
            .depends_on([GetProjects])
            .params(&["projectId", "suiteId"]),
        Op::new(CreateTestExecution, "Add a result for a case in a run")
            .depends_on([CreateTestRun, CreateTestCase])
            .params(&["runId", "caseId", "statusId"]),
        Op::new(UploadAttachment, "Add an attachment to a case")
            .depends_on([CreateTestCase])
            .params(&["caseId"]),
    ];

    ProviderApiContract::new(
        ProviderId::Testrail,
        operations,
        rules(vec![
            ("baseUrl", ParameterValidator::pattern(r"^https?://")?),
            ("username", ParameterValidator::NonEmpty),
            ("apiKey", ParameterValidator::NonEmpty),
            ("projectId", ParameterValidator::PositiveInteger),
            ("suiteId", ParameterValidator::PositiveInteger),
            ("sectionId", ParameterValidator::PositiveInteger),
            ("runId", ParameterValidator::PositiveInteger),
            ("caseId", ParameterValidator::PositiveInteger),
            ("statusId", ParameterValidator::Range { min: 1, max: 5 }),
        ]),
    )
}

fn jama() -> Result<ProviderApiContract> {
    let operations = vec![
        Op::new(Authenticate, "Obtain an OAuth token with client credentials")
            .required()
            .params(&["baseUrl", "clientId", "clientSecret"]),
        Op::new(GetProjects, "List Jama projects")
            .depends_on([Authenticate])
            .required(),
        Op::new(GetUsers, "List users for author mapping")
            .depends_on([Authenticate]),
        Op::new(GetTestCases, "Page through test case items of a project")
            .depends_on([GetProjects, GetUsers])
            .required()
            .params(&["projectId", "pageSize"])
            .cost(5.0),
        Op::new(GetTestCycles, "List test cycles of a test plan")
            .depends_on([GetProjects])
            .params(&["testPlanId"]),
        Op::new(GetTestRuns, "List test runs of a test cycle")
            .depends_on([GetTestCycles])
            .params(&["testCycleId", "pageSize"]),
        Op::new(GetAttachments, "Download attachments of an item")
            .depends_on([GetTestCases])
            .cost(8.0),
        Op::new(CreateTestCase, "Create a test case item")
            .depends_on([GetProjects])
            .required()
            .params(&["projectId"]),
        Op::new(CreateTestCycle, "Create a test cycle in a test plan")
            .depends_on([GetProjects])
            .params(&["testPlanId"]),
        Op::new(UploadAttachment, "Upload a file to an attachment item")
            .depends_on([CreateTestCase])
            .params(&["projectId"]),
    ];

    ProviderApiContract::new(
        ProviderId::Jama,
        operations,
        rules(vec![
            ("baseUrl", ParameterValidator::pattern(r"^https?://")?),
            ("clientId", ParameterValidator::NonEmpty),
            ("clientSecret", ParameterValidator::NonEmpty),
            ("projectId", ParameterValidator::PositiveInteger),
            ("testPlanId", ParameterValidator::PositiveInteger),
            ("testCycleId", ParameterValidator::PositiveInteger),
            ("pageSize", ParameterValidator::Range { min: 1, max: 50 }),
        ]),
    )
}
