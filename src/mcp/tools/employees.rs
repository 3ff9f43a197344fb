//! Tools for the employee directory.
//!
//! `get_employees` lists the directory with optional department/status/
//! location filters; `get_employee` dumps a single record including salary.

use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};

use crate::mcp::error::HrError;
use crate::mcp::http::HrApiClient;
use crate::mcp::tools::{field, money, object_schema, present_filters, required_text, with_query};

/// Filter arguments in the order the upstream expects them.
const FILTERS: [(&str, &str); 3] = [
    ("department", "department"),
    ("status", "status"),
    ("location", "location"),
];

const LIST_LIMIT: usize = 10;

pub(crate) fn get_employees_tool() -> Tool {
    Tool::new(
        "get_employees",
        "Get list of employees with optional filtering by department, status, or location",
        object_schema(json!({
            "type": "object",
            "properties": {
                "department": {
                    "type": "string",
                    "description": "Filter by department (optional)"
                },
                "status": {
                    "type": "string",
                    "enum": ["active", "inactive", "terminated"],
                    "description": "Filter by employment status (optional)"
                },
                "location": {
                    "type": "string",
                    "description": "Filter by work location (optional)"
                }
            }
        })),
    )
}

pub(crate) fn get_employee_tool() -> Tool {
    Tool::new(
        "get_employee",
        "Get detailed information about a specific employee by ID",
        object_schema(json!({
            "type": "object",
            "properties": {
                "employee_id": {
                    "type": "integer",
                    "description": "Employee ID to retrieve"
                }
            },
            "required": ["employee_id"]
        })),
    )
}

pub async fn get_employees(client: &HrApiClient, args: &JsonObject) -> Result<String, HrError> {
    let filters = present_filters(args, &FILTERS);
    let result = client.get(&with_query("/employees", &filters)).await?;
    Ok(format_employee_list(&result, &filters))
}

pub async fn get_employee(client: &HrApiClient, args: &JsonObject) -> Result<String, HrError> {
    let employee_id = required_text(args, "employee_id")?;
    let result = client.get(&format!("/employees/{employee_id}")).await?;
    Ok(format_employee_details(&result))
}

fn format_employee_list(result: &Value, filters: &[(&'static str, String)]) -> String {
    let empty = Vec::new();
    let employees = result["employees"].as_array().unwrap_or(&empty);

    let mut summary = format!("Found {} employees", employees.len());
    if !filters.is_empty() {
        let described: Vec<String> = filters.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        summary.push_str(&format!(" (filtered by {})", described.join(", ")));
    }

    let mut lines: Vec<String> = employees
        .iter()
        .take(LIST_LIMIT)
        .map(|emp| {
            format!(
                "• {} {} ({}) - {} in {}",
                field(emp, "firstName"),
                field(emp, "lastName"),
                field(emp, "employeeId"),
                field(emp, "position"),
                field(emp, "department"),
            )
        })
        .collect();
    if employees.len() > LIST_LIMIT {
        lines.push(format!("... and {} more employees", employees.len() - LIST_LIMIT));
    }

    format!("{summary}\n\n{}", lines.join("\n"))
}

fn format_employee_details(emp: &Value) -> String {
    format!(
        "Employee Details:\n\
         • Name: {} {}\n\
         • Employee ID: {}\n\
         • Email: {}\n\
         • Department: {}\n\
         • Position: {}\n\
         • Manager: {}\n\
         • Hire Date: {}\n\
         • Location: {}\n\
         • Status: {}\n\
         • Salary: {}",
        field(emp, "firstName"),
        field(emp, "lastName"),
        field(emp, "employeeId"),
        field(emp, "email"),
        field(emp, "department"),
        field(emp, "position"),
        field(emp, "manager"),
        field(emp, "hireDate"),
        field(emp, "location"),
        field(emp, "status"),
        money(&emp["salary"]),
    )
}
