//! Tools for vacation requests and balances.
//!
//! Covers listing requests, per-employee balance breakdowns, and submitting
//! new requests. Submission remaps the tool's snake_case arguments to the
//! upstream's camelCase field names. The simplified toolset registers the
//! same submission handler under the `create_vacation_request` name.

use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};

use crate::mcp::error::HrError;
use crate::mcp::http::HrApiClient;
use crate::mcp::tools::{field, object_schema, present_filters, required, required_text, with_query};

const FILTERS: [(&str, &str); 2] = [("employee_id", "employeeId"), ("status", "status")];

const LIST_LIMIT: usize = 10;

pub(crate) fn get_vacation_requests_tool() -> Tool {
    Tool::new(
        "get_vacation_requests",
        "Get vacation requests with optional filtering by employee or status",
        object_schema(json!({
            "type": "object",
            "properties": {
                "employee_id": {
                    "type": "string",
                    "description": "Filter by employee ID (optional)"
                },
                "status": {
                    "type": "string",
                    "enum": ["pending", "approved", "rejected", "cancelled"],
                    "description": "Filter by request status (optional)"
                }
            }
        })),
    )
}

pub(crate) fn get_vacation_balance_tool() -> Tool {
    Tool::new(
        "get_vacation_balance",
        "Get vacation balance for a specific employee",
        object_schema(json!({
            "type": "object",
            "properties": {
                "employee_id": {
                    "type": "string",
                    "description": "Employee ID to get vacation balance for"
                }
            },
            "required": ["employee_id"]
        })),
    )
}

pub(crate) fn submit_vacation_request_tool() -> Tool {
    Tool::new(
        "submit_vacation_request",
        "Submit a new vacation request for an employee",
        object_schema(request_schema()),
    )
}

/// Simplified-toolset alias: same schema and handler, different name.
pub(crate) fn create_vacation_request_tool() -> Tool {
    Tool::new(
        "create_vacation_request",
        "Create a new vacation request for an employee",
        object_schema(request_schema()),
    )
}

fn request_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "employee_id": {
                "type": "string",
                "description": "Employee ID submitting the request"
            },
            "type": {
                "type": "string",
                "enum": ["annual", "sick", "personal", "maternity", "paternity"],
                "description": "Type of vacation"
            },
            "start_date": {
                "type": "string",
                "format": "date",
                "description": "Start date (YYYY-MM-DD)"
            },
            "end_date": {
                "type": "string",
                "format": "date",
                "description": "End date (YYYY-MM-DD)"
            },
            "days": {
                "type": "integer",
                "description": "Number of vacation days"
            },
            "reason": {
                "type": "string",
                "description": "Reason for vacation (optional)"
            }
        },
        "required": ["employee_id", "type", "start_date", "end_date", "days"]
    })
}

pub async fn get_vacation_requests(
    client: &HrApiClient,
    args: &JsonObject,
) -> Result<String, HrError> {
    let filters = present_filters(args, &FILTERS);
    let result = client.get(&with_query("/vacations", &filters)).await?;
    Ok(format_vacation_requests(&result))
}

pub async fn get_vacation_balance(
    client: &HrApiClient,
    args: &JsonObject,
) -> Result<String, HrError> {
    let employee_id = required_text(args, "employee_id")?;
    let result = client.get(&format!("/vacations/balance/{employee_id}")).await?;
    Ok(format_vacation_balance(&employee_id, &result))
}

pub async fn submit_vacation_request(
    client: &HrApiClient,
    args: &JsonObject,
) -> Result<String, HrError> {
    let employee_id = required(args, "employee_id")?;
    let leave_type = required(args, "type")?;
    let start_date = required(args, "start_date")?;
    let end_date = required(args, "end_date")?;
    let days = required(args, "days")?;

    // Upstream field names differ from the tool's argument names.
    let mut body = json!({
        "employeeId": employee_id,
        "type": leave_type,
        "startDate": start_date,
        "endDate": end_date,
        "days": days,
    });
    if let Some(reason) = args.get("reason").filter(|v| !v.is_null()) {
        body["reason"] = reason.clone();
    }

    let result = client.post("/vacations", &body).await?;
    Ok(format_submission(&result))
}

fn format_vacation_requests(result: &Value) -> String {
    let empty = Vec::new();
    let vacations = result["vacations"].as_array().unwrap_or(&empty);

    let summary = format!("Found {} vacation requests", vacations.len());
    let mut lines: Vec<String> = vacations
        .iter()
        .take(LIST_LIMIT)
        .map(|vac| {
            format!(
                "• {}: {} leave from {} to {} ({} days) - Status: {}",
                field(vac, "employeeId"),
                field(vac, "type"),
                field(vac, "startDate"),
                field(vac, "endDate"),
                field(vac, "days"),
                field(vac, "status"),
            )
        })
        .collect();
    if vacations.len() > LIST_LIMIT {
        lines.push(format!("... and {} more requests", vacations.len() - LIST_LIMIT));
    }

    format!("{summary}\n\n{}", lines.join("\n"))
}

fn format_vacation_balance(employee_id: &str, balance: &Value) -> String {
    format!(
        "Vacation Balance for {employee_id}:\n\
         • Annual Leave: {}/{} days remaining\n\
         • Sick Leave: {}/{} days remaining\n\
         • Personal Leave: {}/{} days remaining\n\
         \n\
         Used This Year:\n\
         • Annual: {} days\n\
         • Sick: {} days\n\
         • Personal: {} days",
        field(balance, "remainingAnnual"),
        field(balance, "annualDays"),
        field(balance, "remainingSick"),
        field(balance, "sickDays"),
        field(balance, "remainingPersonal"),
        field(balance, "personalDays"),
        field(balance, "usedAnnual"),
        field(balance, "usedSick"),
        field(balance, "usedPersonal"),
    )
}

fn format_submission(result: &Value) -> String {
    format!(
        "Vacation request submitted successfully! Request ID: {}\n\
         Status: {}\n\
         Type: {}\n\
         Dates: {} to {} ({} days)",
        field(result, "id"),
        field(result, "status"),
        field(result, "type"),
        field(result, "startDate"),
        field(result, "endDate"),
        field(result, "days"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn submit_posts_remapped_body_and_confirms() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/vacations"))
            .and(body_json(json!({
                "employeeId": "EMP001",
                "type": "annual",
                "startDate": "2024-01-01",
                "endDate": "2024-01-05",
                "days": 5,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "V1",
                "status": "pending",
                "type": "annual",
                "startDate": "2024-01-01",
                "endDate": "2024-01-05",
                "days": 5,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HrApiClient::new(server.uri(), "test-key");
        let mut args = JsonObject::new();
        args.insert("employee_id".into(), json!("EMP001"));
        args.insert("type".into(), json!("annual"));
        args.insert("start_date".into(), json!("2024-01-01"));
        args.insert("end_date".into(), json!("2024-01-05"));
        args.insert("days".into(), json!(5));

        let text = submit_vacation_request(&client, &args).await.unwrap();
        assert!(text.contains("Request ID: V1"), "{text}");
        assert!(text.contains("(5 days)"), "{text}");
        assert!(text.contains("Status: pending"));
    }

    #[tokio::test]
    async fn submit_forwards_optional_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/vacations"))
            .and(body_json(json!({
                "employeeId": "EMP001",
                "type": "sick",
                "startDate": "2024-02-01",
                "endDate": "2024-02-02",
                "days": 2,
                "reason": "flu",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "V2",
                "status": "pending",
                "type": "sick",
                "startDate": "2024-02-01",
                "endDate": "2024-02-02",
                "days": 2,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HrApiClient::new(server.uri(), "test-key");
        let mut args = JsonObject::new();
        args.insert("employee_id".into(), json!("EMP001"));
        args.insert("type".into(), json!("sick"));
        args.insert("start_date".into(), json!("2024-02-01"));
        args.insert("end_date".into(), json!("2024-02-02"));
        args.insert("days".into(), json!(2));
        args.insert("reason".into(), json!("flu"));

        let text = submit_vacation_request(&client, &args).await.unwrap();
        assert!(text.contains("Request ID: V2"));
    }

    #[tokio::test]
    async fn submit_with_missing_field_never_reaches_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let client = HrApiClient::new(server.uri(), "test-key");
        let mut args = JsonObject::new();
        args.insert("employee_id".into(), json!("EMP001"));
        args.insert("type".into(), json!("annual"));
        args.insert("start_date".into(), json!("2024-01-01"));
        args.insert("end_date".into(), json!("2024-01-05"));

        let err = submit_vacation_request(&client, &args).await.unwrap_err();
        assert!(matches!(err, HrError::MissingArgument("days")));
    }

    #[test]
    fn request_list_truncates_after_ten() {
        let vacations: Vec<Value> = (1..=11)
            .map(|n| {
                json!({
                    "employeeId": format!("EMP{n:03}"),
                    "type": "annual",
                    "startDate": "2024-07-01",
                    "endDate": "2024-07-05",
                    "days": 5,
                    "status": "pending",
                })
            })
            .collect();
        let text = format_vacation_requests(&json!({ "vacations": vacations }));
        assert!(text.starts_with("Found 11 vacation requests\n\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with('•')).count(), 10);
        assert!(text.ends_with("... and 1 more requests"), "{text}");
        assert!(text.contains(
            "• EMP001: annual leave from 2024-07-01 to 2024-07-05 (5 days) - Status: pending"
        ));
    }

    #[test]
    fn balance_renders_remaining_and_used() {
        let balance = json!({
            "annualDays": 20,
            "usedAnnual": 6,
            "remainingAnnual": 14,
            "sickDays": 10,
            "usedSick": 2,
            "remainingSick": 8,
            "personalDays": 5,
            "usedPersonal": 0,
            "remainingPersonal": 5,
        });
        let text = format_vacation_balance("EMP001", &balance);
        assert!(text.starts_with("Vacation Balance for EMP001:"));
        assert!(text.contains("• Annual Leave: 14/20 days remaining"));
        assert!(text.contains("• Sick Leave: 8/10 days remaining"));
        assert!(text.contains("Used This Year:\n• Annual: 6 days"));
    }
}
