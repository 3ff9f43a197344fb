//! Tools for job postings.
//!
//! Listing keeps the blocks short; the detail view adds the description and
//! bulleted requirements/benefits.

use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};

use crate::mcp::error::HrError;
use crate::mcp::http::HrApiClient;
use crate::mcp::tools::{
    field, money, object_schema, present_filters, required_text, text_value, with_query,
};

const FILTERS: [(&str, &str); 4] = [
    ("department", "department"),
    ("location", "location"),
    ("status", "status"),
    ("level", "level"),
];

const LIST_LIMIT: usize = 5;

pub(crate) fn get_job_postings_tool() -> Tool {
    Tool::new(
        "get_job_postings",
        "Get list of job postings with optional filtering",
        object_schema(json!({
            "type": "object",
            "properties": {
                "department": {
                    "type": "string",
                    "description": "Filter by department (optional)"
                },
                "location": {
                    "type": "string",
                    "description": "Filter by location (optional)"
                },
                "status": {
                    "type": "string",
                    "enum": ["open", "closed", "on_hold"],
                    "description": "Filter by job status (optional)"
                },
                "level": {
                    "type": "string",
                    "enum": ["entry", "junior", "mid", "senior", "executive"],
                    "description": "Filter by job level (optional)"
                }
            }
        })),
    )
}

pub(crate) fn get_job_details_tool() -> Tool {
    Tool::new(
        "get_job_details",
        "Get detailed information about a specific job posting",
        object_schema(json!({
            "type": "object",
            "properties": {
                "job_id": {
                    "type": "integer",
                    "description": "Job ID to retrieve"
                }
            },
            "required": ["job_id"]
        })),
    )
}

pub async fn get_job_postings(client: &HrApiClient, args: &JsonObject) -> Result<String, HrError> {
    let filters = present_filters(args, &FILTERS);
    let result = client.get(&with_query("/jobs", &filters)).await?;
    Ok(format_job_postings(&result))
}

pub async fn get_job_details(client: &HrApiClient, args: &JsonObject) -> Result<String, HrError> {
    let job_id = required_text(args, "job_id")?;
    let result = client.get(&format!("/jobs/{job_id}")).await?;
    Ok(format_job_details(&result))
}

fn format_job_postings(result: &Value) -> String {
    let empty = Vec::new();
    let jobs = result["jobs"].as_array().unwrap_or(&empty);

    let summary = format!("Found {} job postings", jobs.len());
    let mut blocks: Vec<String> = jobs
        .iter()
        .take(LIST_LIMIT)
        .map(|job| {
            format!(
                "• {} (ID: {}) - {} in {}\n  \
                 Level: {}, Type: {}, Status: {}\n  \
                 Salary: {} - {}\n  \
                 Applicants: {}",
                field(job, "title"),
                field(job, "id"),
                field(job, "department"),
                field(job, "location"),
                field(job, "level"),
                field(job, "type"),
                field(job, "status"),
                money(&job["salary"]["min"]),
                money(&job["salary"]["max"]),
                field(job, "applicantCount"),
            )
        })
        .collect();
    if jobs.len() > LIST_LIMIT {
        blocks.push(format!("... and {} more job postings", jobs.len() - LIST_LIMIT));
    }

    format!("{summary}\n\n{}", blocks.join("\n"))
}

fn format_job_details(job: &Value) -> String {
    format!(
        "Job Details - {}:\n\
         • Job ID: {}\n\
         • Department: {}\n\
         • Location: {}\n\
         • Employment Type: {}\n\
         • Level: {}\n\
         • Salary Range: {} - {} {}\n\
         • Hiring Manager: {}\n\
         • Posted Date: {}\n\
         • Closing Date: {}\n\
         • Status: {}\n\
         • Applications: {}\n\
         \n\
         Description:\n{}\n\
         \n\
         Requirements:\n{}\n\
         \n\
         Benefits:\n{}",
        field(job, "title"),
        field(job, "id"),
        field(job, "department"),
        field(job, "location"),
        field(job, "type"),
        field(job, "level"),
        money(&job["salary"]["min"]),
        money(&job["salary"]["max"]),
        field(&job["salary"], "currency"),
        field(job, "hiringManager"),
        field(job, "postedDate"),
        field(job, "closingDate"),
        field(job, "status"),
        field(job, "applicantCount"),
        field(job, "description"),
        bullet_list(&job["requirements"]),
        bullet_list(&job["benefits"]),
    )
}

fn bullet_list(items: &Value) -> String {
    let empty = Vec::new();
    items
        .as_array()
        .unwrap_or(&empty)
        .iter()
        .map(|item| format!("• {}", text_value(item)))
        .collect::<Vec<String>>()
        .join("\n")
}
