use serde_json::Value;

/// Looks up `issue.html_url` in a GitHub webhook payload.
///
/// Payloads are not validated against any schema: a missing key, a `null`, or a value of the
/// wrong type at any step of the path all mean "no issue URL" rather than an error. Events
/// other than `issues` simply don't carry the field.
pub fn issue_url(event: &Value) -> Option<&str> {
    event.get("issue")?.get("html_url")?.as_str()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn issue_opened() {
        let event = json!({
            "action": "opened",
            "issue": {
                "number": 1347,
                "html_url": "https://github.com/octocat/Hello-World/issues/1347",
                "title": "Found a bug",
            },
            "repository": { "full_name": "octocat/Hello-World" },
        });

        assert_eq!(
            issue_url(&event),
            Some("https://github.com/octocat/Hello-World/issues/1347")
        );
    }

    #[test]
    fn no_issue() {
        let push = json!({ "ref": "refs/heads/main", "commits": [] });
        assert_eq!(issue_url(&push), None);

        let issue_without_url = json!({ "issue": { "number": 1 } });
        assert_eq!(issue_url(&issue_without_url), None);
    }

    #[test]
    fn wrong_shape_is_not_found() {
        for event in [
            json!(null),
            json!("issue"),
            json!([{ "issue": { "html_url": "https://github.com" } }]),
            json!({ "issue": null }),
            json!({ "issue": "https://github.com/octocat/Hello-World/issues/1" }),
            json!({ "issue": { "html_url": null } }),
            json!({ "issue": { "html_url": 1347 } }),
            json!({ "issue": { "html_url": { "href": "https://github.com" } } }),
        ] {
            assert_eq!(issue_url(&event), None, "event: {}", event);
        }
    }

    #[test]
    fn empty_url_is_returned_as_is() {
        let event = json!({ "issue": { "html_url": "" } });
        assert_eq!(issue_url(&event), Some(""));
    }
}
