//! Tools for performance reviews and analytics.

use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};

use crate::mcp::error::HrError;
use crate::mcp::http::HrApiClient;
use crate::mcp::tools::{field, object_schema, present_filters, text_value, with_query};

const REVIEW_FILTERS: [(&str, &str); 3] = [
    ("employee_id", "employeeId"),
    ("review_period", "reviewPeriod"),
    ("status", "status"),
];

const ANALYTICS_FILTERS: [(&str, &str); 2] = [("department", "department"), ("period", "period")];

const LIST_LIMIT: usize = 5;

pub(crate) fn get_performance_reviews_tool() -> Tool {
    Tool::new(
        "get_performance_reviews",
        "Get performance reviews with optional filtering",
        object_schema(json!({
            "type": "object",
            "properties": {
                "employee_id": {
                    "type": "string",
                    "description": "Filter by employee ID (optional)"
                },
                "review_period": {
                    "type": "string",
                    "description": "Filter by review period (optional)"
                },
                "status": {
                    "type": "string",
                    "enum": ["draft", "in-progress", "completed", "approved"],
                    "description": "Filter by review status (optional)"
                }
            }
        })),
    )
}

pub(crate) fn get_performance_analytics_tool() -> Tool {
    Tool::new(
        "get_performance_analytics",
        "Get performance analytics and metrics",
        object_schema(json!({
            "type": "object",
            "properties": {
                "department": {
                    "type": "string",
                    "description": "Filter analytics by department (optional)"
                },
                "period": {
                    "type": "string",
                    "description": "Analysis period (optional)"
                }
            }
        })),
    )
}

pub async fn get_performance_reviews(
    client: &HrApiClient,
    args: &JsonObject,
) -> Result<String, HrError> {
    let filters = present_filters(args, &REVIEW_FILTERS);
    let result = client.get(&with_query("/performance/reviews", &filters)).await?;
    Ok(format_reviews(&result))
}

pub async fn get_performance_analytics(
    client: &HrApiClient,
    args: &JsonObject,
) -> Result<String, HrError> {
    let filters = present_filters(args, &ANALYTICS_FILTERS);
    let result = client.get(&with_query("/performance/analytics", &filters)).await?;
    Ok(format_analytics(&result))
}

fn format_reviews(result: &Value) -> String {
    let empty = Vec::new();
    let reviews = result["reviews"].as_array().unwrap_or(&empty);

    let summary = format!("Found {} performance reviews", reviews.len());
    let mut blocks: Vec<String> = reviews
        .iter()
        .take(LIST_LIMIT)
        .map(|review| {
            format!(
                "• {} - {} ({})\n  \
                 Overall Rating: {}/5.0, Status: {}\n  \
                 Reviewer: {}, Date: {}",
                field(review, "employeeId"),
                field(review, "reviewPeriod"),
                field(review, "reviewType"),
                field(review, "overallRating"),
                field(review, "status"),
                field(review, "reviewer"),
                field(review, "reviewDate"),
            )
        })
        .collect();
    if reviews.len() > LIST_LIMIT {
        blocks.push(format!("... and {} more reviews", reviews.len() - LIST_LIMIT));
    }

    format!("{summary}\n\n{}", blocks.join("\n"))
}

fn format_analytics(result: &Value) -> String {
    // Distribution keys arrive in the upstream's order and are kept that way.
    let distribution: Vec<String> = result["ratingDistribution"]
        .as_object()
        .map(|dist| {
            dist.iter()
                .map(|(rating, count)| format!("• {rating} stars: {} reviews", text_value(count)))
                .collect()
        })
        .unwrap_or_default();

    let empty = Vec::new();
    let top_performers: Vec<String> = result["topPerformers"]
        .as_array()
        .unwrap_or(&empty)
        .iter()
        .map(|perf| format!("• {}: {}/5.0", field(perf, "employeeId"), field(perf, "rating")))
        .collect();

    format!(
        "Performance Analytics:\n\
         • Period: {}\n\
         • Total Reviews: {}\n\
         • Average Rating: {}/5.0\n\
         • Goal Achievement Rate: {}%\n\
         \n\
         Rating Distribution:\n{}\n\
         \n\
         Top Performers:\n{}",
        field(result, "period"),
        field(result, "totalReviews"),
        field(result, "averageRating"),
        field(result, "goalAchievementRate"),
        distribution.join("\n"),
        top_performers.join("\n"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn review_filters_are_remapped_to_upstream_names() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/performance/reviews"))
            .and(query_param("employeeId", "EMP001"))
            .and(query_param("reviewPeriod", "2024-Q1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reviews": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HrApiClient::new(server.uri(), "test-key");
        let mut args = JsonObject::new();
        args.insert("employee_id".into(), json!("EMP001"));
        args.insert("review_period".into(), json!("2024-Q1"));
        let text = get_performance_reviews(&client, &args).await.unwrap();
        assert!(text.starts_with("Found 0 performance reviews"));
    }

    #[test]
    fn reviews_render_blocks_and_truncate_after_five() {
        let reviews: Vec<Value> = (1..=7)
            .map(|n| {
                json!({
                    "employeeId": format!("EMP{n:03}"),
                    "reviewPeriod": "2024-Q1",
                    "reviewType": "annual",
                    "overallRating": 4.2,
                    "status": "completed",
                    "reviewer": "Jane Smith",
                    "reviewDate": "2024-04-01",
                })
            })
            .collect();
        let text = format_reviews(&json!({ "reviews": reviews }));
        assert!(text.starts_with("Found 7 performance reviews\n\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with('•')).count(), 5);
        assert!(text.ends_with("... and 2 more reviews"), "{text}");
        assert!(text.contains("• EMP001 - 2024-Q1 (annual)"));
        assert!(text.contains("Overall Rating: 4.2/5.0, Status: completed"));
    }

    #[test]
    fn analytics_render_distribution_in_upstream_order() {
        let result = json!({
            "period": "2024-Q1",
            "totalReviews": 42,
            "averageRating": 4.05,
            "goalAchievementRate": 78.5,
            "ratingDistribution": { "5": 10, "4": 20, "3": 9, "2": 3 },
            "topPerformers": [
                { "employeeId": "EMP002", "rating": 4.9 },
                { "employeeId": "EMP001", "rating": 4.7 },
            ],
        });
        let text = format_analytics(&result);
        assert!(text.contains("• Period: 2024-Q1"));
        assert!(text.contains("• Average Rating: 4.05/5.0"));
        assert!(text.contains("• Goal Achievement Rate: 78.5%"));
        assert!(text.contains(
            "Rating Distribution:\n• 5 stars: 10 reviews\n• 4 stars: 20 reviews\n• 3 stars: 9 reviews\n• 2 stars: 3 reviews"
        ));
        assert!(text.contains("Top Performers:\n• EMP002: 4.9/5.0\n• EMP001: 4.7/5.0"));
    }
}
